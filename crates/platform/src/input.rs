//! Raw-sample acquisition capabilities
//!
//! Each trait is the single read operation the gesture adapters need from a
//! driver. Reads are synchronous and infallible from the adapter's point of
//! view: a driver that cannot produce a sample must report the idle value
//! (line released, ADC at reference, no keys closed).
//!
//! Adapters borrow a driver only for the duration of one `poll` call, so the
//! same driver may be shared with other code between polls.

/// A single dedicated digital button line.
pub trait LineDriver {
    /// Sample the line. `true` means the contact is closed (button down),
    /// regardless of the electrical polarity of the pin.
    fn read(&mut self) -> bool;
}

/// One ADC channel shared by a resistor ladder of buttons.
pub trait AdcDriver {
    /// Take one raw conversion.
    fn read(&mut self) -> u16;
}

/// A key matrix of `N` slots scanned into a bitmap of closed contacts.
pub trait ScanDriver<const N: usize> {
    /// Scan every slot once. Index `i` is `true` when key `i` is closed.
    fn scan(&mut self) -> [bool; N];
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    fn read(&mut self) -> bool {
        (**self).read()
    }
}

impl<T: AdcDriver + ?Sized> AdcDriver for &mut T {
    fn read(&mut self) -> u16 {
        (**self).read()
    }
}

impl<const N: usize, T: ScanDriver<N> + ?Sized> ScanDriver<N> for &mut T {
    fn scan(&mut self) -> [bool; N] {
        (**self).scan()
    }
}

/// [`LineDriver`] backed by a closure.
///
/// ```
/// use platform::{FnLine, LineDriver};
///
/// let mut line = FnLine(|| true);
/// assert!(line.read());
/// ```
pub struct FnLine<F>(pub F);

impl<F: FnMut() -> bool> LineDriver for FnLine<F> {
    fn read(&mut self) -> bool {
        (self.0)()
    }
}

/// [`AdcDriver`] backed by a closure.
pub struct FnAdc<F>(pub F);

impl<F: FnMut() -> u16> AdcDriver for FnAdc<F> {
    fn read(&mut self) -> u16 {
        (self.0)()
    }
}

/// [`ScanDriver`] backed by a closure.
pub struct FnScan<F>(pub F);

impl<const N: usize, F: FnMut() -> [bool; N]> ScanDriver<N> for FnScan<F> {
    fn scan(&mut self) -> [bool; N] {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_twice<L: LineDriver>(mut line: L) -> (bool, bool) {
        (line.read(), line.read())
    }

    #[test]
    fn fn_line_calls_closure_each_read() {
        let mut level = false;
        let line = FnLine(move || {
            level = !level;
            level
        });
        assert_eq!(sample_twice(line), (true, false));
    }

    #[test]
    fn fn_adc_returns_closure_value() {
        let mut adc = FnAdc(|| 1234);
        assert_eq!(adc.read(), 1234);
    }

    #[test]
    fn fn_scan_returns_bitmap() {
        let mut scan = FnScan(|| [true, false, true]);
        assert_eq!(scan.scan(), [true, false, true]);
    }

    fn read_owned<A: AdcDriver>(mut adc: A) -> u16 {
        adc.read()
    }

    #[test]
    fn mut_reference_forwards_to_driver() {
        let mut adc = FnAdc(|| 7);
        assert_eq!(read_owned(&mut adc), 7);
        assert_eq!(adc.read(), 7);
    }
}
