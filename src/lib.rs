//! Calibrated Pulse and Accelerometer Polling Firmware
//!
//! This library drives a small STM32G474 demo: it holds a digital output
//! for a software-timed, self-calibrating duration and then samples a
//! LIS3DHTR accelerometer over I2C forever, printing each reading to the
//! serial console.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        app::application(HardwareMap) -> never returns        │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │   CALIBRATED DELAY ENGINE    │     SENSOR POLLING LOOP       │
//! │   pulse::timed_pulse         │     poll::run_forever         │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │        clock::Clock  │  drivers::lis3dhtr  │  report         │
//! ├─────────────────────────────────────────────────────────────┤
//! │              HAL (embassy-stm32 / embassy-time)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything above the HAL is generic over small traits (`Clock`,
//! `LevelPin`, `embedded_hal::i2c::I2c`, `embedded_io::Write`) so it runs
//! unchanged on the host under the `std` feature.
//!
//! # Execution model
//!
//! Single-threaded and strictly sequential. Both delays are busy-waits on
//! a polled counter; no interrupts are involved and nothing can cancel
//! them. Once the polling loop starts only a fatal peripheral error or an
//! external reset ends it.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Embassy-backed clock, output pin and console.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// The LIS3DHTR accelerometer and the accelerometer contract.
pub mod drivers;

/// Monotonic clock contract and tick arithmetic
pub mod clock;

/// Calibrated Delay Engine
pub mod pulse;

/// Sensor Polling Loop
pub mod poll;

/// Console reporting of samples
pub mod report;

/// Application entry routine and hardware map
pub mod app;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::app::{application, application_with, AppError, HardwareMap};
    pub use crate::clock::Clock;
    pub use crate::config::*;
    pub use crate::drivers::lis3dhtr::{Lis3dhtr, SensorError};
    pub use crate::drivers::Accelerometer;
    pub use crate::pulse::{timed_pulse, LevelPin, PulseEngine};
    pub use crate::report::{ConsoleReporter, Reporter};
    pub use crate::types::*;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use crate::hal::{gpio::PulsePin, serial::Console, timer::EmbassyClock};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
