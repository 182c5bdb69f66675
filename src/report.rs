//! Console reporting
//!
//! Formats accelerometer samples into a fixed-size buffer and writes them to
//! a byte-oriented console such as a UART.

use core::fmt::Write as _;

use embedded_io::Write;
use heapless::String;

use crate::types::{Acceleration, FullScale};

/// Capacity of the formatting buffer for one console line
pub const LINE_CAPACITY: usize = 128;

/// Failure to emit a report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportError<E> {
    /// The formatted line did not fit in [`LINE_CAPACITY`] bytes
    Overflow,
    /// The console rejected the write
    Console(E),
}

#[cfg(feature = "embedded")]
impl<E: core::fmt::Debug> defmt::Format for ReportError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Overflow => defmt::write!(f, "report line overflow"),
            Self::Console(e) => defmt::write!(f, "console error: {}", defmt::Debug2Format(e)),
        }
    }
}

/// Sink for accelerometer samples and status text
pub trait Reporter {
    /// Error produced when a report cannot be emitted
    type Error;

    /// Emit a free-form status message
    ///
    /// # Errors
    ///
    /// Returns the reporter's error if the message could not be written.
    fn print(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Emit one labelled sample
    ///
    /// # Errors
    ///
    /// Returns the reporter's error if the sample could not be written.
    fn report(&mut self, scale: FullScale, sample: &Acceleration) -> Result<(), Self::Error>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    type Error = R::Error;

    fn print(&mut self, message: &str) -> Result<(), Self::Error> {
        (**self).print(message)
    }

    fn report(&mut self, scale: FullScale, sample: &Acceleration) -> Result<(), Self::Error> {
        (**self).report(scale, sample)
    }
}

/// Format one sample line
///
/// Values are printed with six decimals:
/// `Scale: 2g \t x = 0.000000g, y = 0.000000g, z = 1.000000g \n`
///
/// # Errors
///
/// Returns `core::fmt::Error` if the line exceeds [`LINE_CAPACITY`].
pub fn format_sample(
    scale: FullScale,
    sample: &Acceleration,
) -> Result<String<LINE_CAPACITY>, core::fmt::Error> {
    let mut line = String::new();
    writeln!(
        line,
        "Scale: {} \t x = {:.6}g, y = {:.6}g, z = {:.6}g ",
        scale, sample.x, sample.y, sample.z
    )?;
    Ok(line)
}

/// [`Reporter`] writing text lines to an [`embedded_io::Write`] console
pub struct ConsoleReporter<W> {
    console: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Wrap a console writer
    #[must_use]
    pub const fn new(console: W) -> Self {
        Self { console }
    }

    /// Give back the console writer
    pub fn release(self) -> W {
        self.console
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    type Error = ReportError<W::Error>;

    fn print(&mut self, message: &str) -> Result<(), Self::Error> {
        self.console
            .write_all(message.as_bytes())
            .map_err(ReportError::Console)
    }

    fn report(&mut self, scale: FullScale, sample: &Acceleration) -> Result<(), Self::Error> {
        let line = format_sample(scale, sample).map_err(|_| ReportError::Overflow)?;
        self.print(&line)?;
        self.console.flush().map_err(ReportError::Console)
    }
}
