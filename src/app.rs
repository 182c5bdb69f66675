//! Application entry
//!
//! Board bring-up hands the application a [`HardwareMap`] of already
//! constructed peripherals. The application prints a banner, emits one
//! calibrated square-wave period on the output pin, then hands the clock, bus
//! and console to the polling loop for good.
//!
//! Cancellation contract: none. [`application`] only returns on a fatal
//! peripheral error; otherwise the device runs until it is reset.

use core::convert::Infallible;

use embedded_hal::i2c::I2c;
use embedded_io::Write;

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::drivers::lis3dhtr::{Lis3dhtr, SensorError};
use crate::poll::{PollError, PollingLoop};
use crate::pulse::{LevelPin, PulseEngine};
use crate::report::{ConsoleReporter, ReportError, Reporter};
use crate::types::Level;

/// Peripheral handles shared with the application routine
pub struct HardwareMap<'a, C, W, P, I> {
    /// Free-running tick counter
    pub clock: &'a mut C,
    /// Text console
    pub console: &'a mut W,
    /// Output driven by the calibrated pulse engine
    pub output_pin: &'a mut P,
    /// Bus the accelerometer sits on
    pub i2c: &'a mut I,
}

/// Fatal application failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppError<W, B> {
    /// Console output failed
    Report(ReportError<W>),
    /// Accelerometer probe or read failed
    Sensor(SensorError<B>),
}

impl<W, B> From<PollError<SensorError<B>, ReportError<W>>> for AppError<W, B> {
    fn from(err: PollError<SensorError<B>, ReportError<W>>) -> Self {
        match err {
            PollError::Sensor(e) => Self::Sensor(e),
            PollError::Report(e) => Self::Report(e),
        }
    }
}

#[cfg(feature = "embedded")]
impl<W: core::fmt::Debug, B: core::fmt::Debug> defmt::Format for AppError<W, B> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Report(e) => defmt::write!(f, "{}", e),
            Self::Sensor(e) => defmt::write!(f, "{}", e),
        }
    }
}

/// Run the demo with the compiled-in configuration
///
/// # Errors
///
/// Returns only on a fatal console or accelerometer failure.
pub fn application<C, W, P, I>(
    map: HardwareMap<'_, C, W, P, I>,
) -> Result<Infallible, AppError<W::Error, I::Error>>
where
    C: Clock,
    W: Write,
    P: LevelPin,
    I: I2c,
{
    application_with(map, &AppConfig::DEFAULT)
}

/// Run the demo with explicit parameters
///
/// # Errors
///
/// Returns only on a fatal console or accelerometer failure.
pub fn application_with<C, W, P, I>(
    map: HardwareMap<'_, C, W, P, I>,
    config: &AppConfig,
) -> Result<Infallible, AppError<W::Error, I::Error>>
where
    C: Clock,
    W: Write,
    P: LevelPin,
    I: I2c,
{
    let HardwareMap {
        clock,
        console,
        output_pin,
        i2c,
    } = map;

    let mut reporter = ConsoleReporter::new(console);
    reporter
        .print(crate::config::STARTUP_BANNER)
        .map_err(AppError::Report)?;

    let mut engine = PulseEngine::new(&mut *clock, output_pin);
    let [_high, _low] = engine.square_wave(Level::High, config.pulse_width);
    #[cfg(feature = "embedded")]
    defmt::debug!("square wave: {} / {}", _high, _low);
    engine.settle(config.settle_level);

    let sensor = Lis3dhtr::with_config(
        i2c,
        config.sensor_address,
        config.full_scale,
        config.data_rate,
    )
    .map_err(AppError::Sensor)?;
    #[cfg(feature = "embedded")]
    defmt::info!(
        "LIS3DHTR at 0x{:02X}, {} @ {}",
        config.sensor_address,
        config.full_scale,
        config.data_rate
    );

    PollingLoop::new(config.poll_interval, clock, sensor, reporter)
        .run_forever()
        .map_err(AppError::from)
}
