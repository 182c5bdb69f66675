//! System configuration and hardware constants
//!
//! Compile-time constants for the demo: timing, bus addresses and pin
//! assignments. [`AppConfig`] bundles the values the application routine
//! consumes so they can be overridden for bring-up or tests.

use core::time::Duration;

use crate::types::{DataRate, FullScale, Level};

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// I2C bus frequency for the accelerometer (standard mode)
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// LIS3DHTR I2C address (SA0 high on the Grove board)
pub const LIS3DHTR_I2C_ADDR: u8 = 0x19;

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

/// Length of each phase of the calibrated square wave
pub const PULSE_WIDTH: Duration = Duration::from_millis(10);

/// Level the output pin is left at once the square wave is done
pub const SETTLE_LEVEL: Level = Level::High;

/// Wait between accelerometer samples
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Accelerometer measurement range
pub const ACCEL_FULL_SCALE: FullScale = FullScale::G2;

/// Accelerometer output data rate
pub const ACCEL_DATA_RATE: DataRate = DataRate::Hz100;

/// Banner printed before anything else
pub const STARTUP_BANNER: &str = "Starting lis3dhtr_i2c Application...\n";

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments (NUCLEO-G474RE)

    /// Calibrated pulse output (user LED)
    pub const PULSE_OUT: &str = "PA5";

    /// I2C1 SCL (LIS3DHTR)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (LIS3DHTR)
    pub const I2C1_SDA: &str = "PB9";

    /// LPUART1 TX (ST-LINK virtual COM port)
    pub const CONSOLE_TX: &str = "PA2";
}

/// Runtime parameters for the application routine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Length of each square-wave phase
    pub pulse_width: Duration,
    /// Level to leave the pin at afterwards
    pub settle_level: Level,
    /// Wait between samples
    pub poll_interval: Duration,
    /// Accelerometer bus address
    pub sensor_address: u8,
    /// Accelerometer range
    pub full_scale: FullScale,
    /// Accelerometer output data rate
    pub data_rate: DataRate,
}

impl AppConfig {
    /// The compiled-in defaults
    pub const DEFAULT: Self = Self {
        pulse_width: PULSE_WIDTH,
        settle_level: SETTLE_LEVEL,
        poll_interval: POLL_INTERVAL,
        sensor_address: LIS3DHTR_I2C_ADDR,
        full_scale: ACCEL_FULL_SCALE,
        data_rate: ACCEL_DATA_RATE,
    };
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
