//! Sensor Polling Loop
//!
//! Waits a fixed interval, takes one blocking accelerometer sample and
//! reports it, forever. The interval is a plain busy-wait on the clock; the
//! calibrated pulse engine is not involved.
//!
//! The loop has no exit condition and no cancellation. It only returns when
//! the sensor or the reporter fails, and the caller is expected to treat that
//! as fatal. Stopping it otherwise requires a reset.

use core::convert::Infallible;
use core::time::Duration;

use crate::clock::{delay, Clock};
use crate::drivers::Accelerometer;
use crate::report::Reporter;
use crate::types::Acceleration;

/// Why the polling loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollError<S, R> {
    /// The accelerometer read failed
    Sensor(S),
    /// The sample could not be reported
    Report(R),
}

#[cfg(feature = "embedded")]
impl<S: defmt::Format, R: defmt::Format> defmt::Format for PollError<S, R> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Sensor(e) => defmt::write!(f, "sensor: {}", e),
            Self::Report(e) => defmt::write!(f, "report: {}", e),
        }
    }
}

/// The acquisition loop and the peripherals it owns
pub struct PollingLoop<C, A, R> {
    interval: Duration,
    clock: C,
    sensor: A,
    reporter: R,
}

impl<C, A, R> PollingLoop<C, A, R>
where
    C: Clock,
    A: Accelerometer,
    R: Reporter,
{
    /// Build a loop that samples once per `interval`
    #[must_use]
    pub const fn new(interval: Duration, clock: C, sensor: A, reporter: R) -> Self {
        Self {
            interval,
            clock,
            sensor,
            reporter,
        }
    }

    /// Time waited before every sample
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait one interval, then acquire and report a single sample
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Sensor`] if the read fails (nothing is reported)
    /// or [`PollError::Report`] if the sample could not be emitted.
    pub fn poll_once(&mut self) -> Result<Acceleration, PollError<A::Error, R::Error>> {
        delay(&mut self.clock, self.interval);
        let sample = self.sensor.read().map_err(PollError::Sensor)?;
        self.reporter
            .report(self.sensor.full_scale(), &sample)
            .map_err(PollError::Report)?;
        Ok(sample)
    }

    /// Poll until something fails
    ///
    /// # Errors
    ///
    /// This only ever returns an error; see [`PollingLoop::poll_once`].
    pub fn run_forever(&mut self) -> Result<Infallible, PollError<A::Error, R::Error>> {
        loop {
            self.poll_once()?;
        }
    }

    /// Give back the peripherals
    pub fn release(self) -> (C, A, R) {
        (self.clock, self.sensor, self.reporter)
    }
}

/// Sample `sensor` every `interval` and report each reading, forever
///
/// # Errors
///
/// Returns the first sensor or reporter failure. There is no other way out.
pub fn run_forever<C, A, R>(
    interval: Duration,
    clock: C,
    sensor: A,
    reporter: R,
) -> Result<Infallible, PollError<A::Error, R::Error>>
where
    C: Clock,
    A: Accelerometer,
    R: Reporter,
{
    PollingLoop::new(interval, clock, sensor, reporter).run_forever()
}
