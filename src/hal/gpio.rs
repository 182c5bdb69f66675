//! GPIO Abstractions
//!
//! Output pin wrapper driven by the calibrated pulse engine.

use embassy_stm32::gpio::{self, Output};

use crate::pulse::LevelPin;
use crate::types::Level;

/// Push-pull output used for the calibrated pulse
pub struct PulsePin<'d> {
    pin: Output<'d>,
    level: Level,
}

impl<'d> PulsePin<'d> {
    /// Wrap an output; `initial` must match the level it was created with
    #[must_use]
    pub fn new(pin: Output<'d>, initial: Level) -> Self {
        Self {
            pin,
            level: initial,
        }
    }

    /// Last level written
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl LevelPin for PulsePin<'_> {
    #[inline(always)]
    fn set_level(&mut self, level: Level) {
        self.pin.set_level(match level {
            Level::High => gpio::Level::High,
            Level::Low => gpio::Level::Low,
        });
        self.level = level;
    }
}

impl defmt::Format for PulsePin<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PulsePin({})", self.level);
    }
}
