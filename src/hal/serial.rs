//! Serial console
//!
//! Blocking UART transmitter exposed as an `embedded_io::Write` sink for the
//! console reporter.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, UartTx};

/// UART transmit failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleError(pub usart::Error);

impl embedded_io::Error for ConsoleError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// Transmit half of the console UART
pub struct Console<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> Console<'d> {
    /// Wrap a blocking UART transmitter
    #[must_use]
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl embedded_io::ErrorType for Console<'_> {
    type Error = ConsoleError;
}

impl embedded_io::Write for Console<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.blocking_write(buf).map_err(ConsoleError)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush().map_err(ConsoleError)
    }
}
