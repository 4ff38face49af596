use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Embedded target the no_std crates must build for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// How a failing step is reported.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OnFailure {
    Abort,
    Warn,
}

struct Step {
    label: &'static str,
    args: &'static [&'static str],
    on_failure: OnFailure,
}

const STEPS: &[Step] = &[
    Step {
        label: "platform crate (no_std)",
        args: &["check", "-p", "platform", "--target", EMBEDDED_TARGET, "--no-default-features"],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "buttons crate (no_std)",
        args: &["check", "-p", "buttons", "--target", EMBEDDED_TARGET, "--no-default-features"],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "buttons crate (no_std + defmt)",
        args: &["check", "-p", "buttons", "--target", EMBEDDED_TARGET, "--features", "defmt"],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "workspace (host)",
        args: &["check", "--workspace", "--all-targets"],
        on_failure: OnFailure::Abort,
    },
    Step {
        label: "clippy lints",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        on_failure: OnFailure::Warn,
    },
    Step {
        label: "code formatting",
        args: &["fmt", "--all", "--check"],
        on_failure: OnFailure::Warn,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in STEPS {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(step.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!("  ✓ {} passed in {:.2}s", step.label, start.elapsed().as_secs_f64()).green()
            );
        } else if step.on_failure == OnFailure::Warn {
            eprintln!("{}", format!("  ⚠ {} reported problems", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        } else {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", step.label);
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
