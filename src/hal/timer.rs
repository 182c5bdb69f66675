//! Timer Abstractions
//!
//! Tick source for the calibrated delay engine and the polling loop.

use embassy_time::{Instant, TICK_HZ};

use crate::clock::Clock;

/// The embassy time driver counter, read through `Instant::now()`
///
/// Runs at `TICK_HZ` (1 MHz with the default embassy-time configuration).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Create a handle to the time driver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for EmbassyClock {
    fn uptime(&mut self) -> u64 {
        Instant::now().as_ticks()
    }

    fn frequency(&self) -> u64 {
        TICK_HZ
    }
}

impl defmt::Format for EmbassyClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EmbassyClock({}Hz)", TICK_HZ);
    }
}
