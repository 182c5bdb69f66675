//! Shared types used across the firmware
//!
//! Domain types for output levels, accelerometer samples and sensor
//! configuration. Kept free of hardware dependencies so the timing and
//! polling logic can be exercised on the host.

use core::fmt;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

/// Logic level driven onto a digital output pin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Level {
    /// Pin driven low
    #[default]
    Low,
    /// Pin driven high
    High,
}

impl Level {
    /// The opposite level
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    /// `true` for [`Level::High`]
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "LOW"),
            Self::High => defmt::write!(f, "HIGH"),
        }
    }
}

/// Three-axis acceleration in units of g
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Acceleration {
    /// X axis
    pub x: f32,
    /// Y axis
    pub y: f32,
    /// Z axis
    pub z: f32,
}

impl Acceleration {
    /// Create a sample from its three axes
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the vector (≈1.0 at rest)
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Acceleration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "x={}g y={}g z={}g", self.x, self.y, self.z);
    }
}

/// Accelerometer full-scale measurement range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FullScale {
    /// ±2 g
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl FullScale {
    /// Range in g
    #[must_use]
    pub const fn as_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Sensitivity in milli-g per digit for 12-bit high-resolution samples
    #[must_use]
    pub const fn mg_per_digit(self) -> f32 {
        match self {
            Self::G2 => 1.0,
            Self::G4 => 2.0,
            Self::G8 => 4.0,
            Self::G16 => 12.0,
        }
    }

    /// FS[1:0] field value, already shifted into place for `CTRL_REG4`
    #[must_use]
    pub const fn as_reg(self) -> u8 {
        match self {
            Self::G2 => 0b00 << 4,
            Self::G4 => 0b01 << 4,
            Self::G8 => 0b10 << 4,
            Self::G16 => 0b11 << 4,
        }
    }
}

impl fmt::Display for FullScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.as_g())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FullScale {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}g", self.as_g());
    }
}

/// Accelerometer output data rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataRate {
    /// 1 Hz
    Hz1,
    /// 10 Hz
    Hz10,
    /// 25 Hz
    Hz25,
    /// 50 Hz
    Hz50,
    /// 100 Hz
    #[default]
    Hz100,
    /// 200 Hz
    Hz200,
    /// 400 Hz
    Hz400,
}

impl DataRate {
    /// Rate in Hz
    #[must_use]
    pub const fn as_hz(self) -> u16 {
        match self {
            Self::Hz1 => 1,
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
            Self::Hz400 => 400,
        }
    }

    /// ODR[3:0] field value, already shifted into place for `CTRL_REG1`
    #[must_use]
    pub const fn as_reg(self) -> u8 {
        let odr = match self {
            Self::Hz1 => 0b0001,
            Self::Hz10 => 0b0010,
            Self::Hz25 => 0b0011,
            Self::Hz50 => 0b0100,
            Self::Hz100 => 0b0101,
            Self::Hz200 => 0b0110,
            Self::Hz400 => 0b0111,
        };
        odr << 4
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DataRate {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}Hz", self.as_hz());
    }
}
