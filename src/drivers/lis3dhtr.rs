//! LIS3DHTR Accelerometer Driver
//!
//! Blocking I2C driver for the ST LIS3DH(TR) three-axis accelerometer, as
//! fitted to the Grove 3-Axis Digital Accelerometer board.
//!
//! The device is configured for high-resolution (12-bit) output with block
//! data update enabled, so one six-byte burst read returns a consistent
//! X/Y/Z triple.

use embedded_hal::i2c::I2c;

use super::Accelerometer;
use crate::types::{Acceleration, DataRate, FullScale};

/// LIS3DH register addresses
mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL_REG1: u8 = 0x20;
    pub const CTRL_REG4: u8 = 0x23;
    pub const STATUS_REG: u8 = 0x27;
    pub const OUT_X_L: u8 = 0x28;
}

/// Register bit fields
mod bits {
    /// Sub-address auto-increment for multi-byte reads
    pub const AUTO_INCREMENT: u8 = 0x80;
    /// X, Y and Z axis enable (CTRL_REG1)
    pub const XYZ_ENABLE: u8 = 0b0000_0111;
    /// Block data update (CTRL_REG4)
    pub const BDU: u8 = 0b1000_0000;
    /// High-resolution output mode (CTRL_REG4)
    pub const HR: u8 = 0b0000_1000;
    /// New X, Y and Z data available (STATUS_REG)
    pub const ZYXDA: u8 = 0b0000_1000;
}

/// Driver errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorError<E> {
    /// The I2C transaction failed
    Bus(E),
    /// `WHO_AM_I` returned something other than a LIS3DH
    WrongDevice(u8),
}

impl<E> From<E> for SensorError<E> {
    fn from(err: E) -> Self {
        Self::Bus(err)
    }
}

#[cfg(feature = "embedded")]
impl<E: core::fmt::Debug> defmt::Format for SensorError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(e) => defmt::write!(f, "I2C error: {}", defmt::Debug2Format(e)),
            Self::WrongDevice(id) => defmt::write!(f, "unexpected WHO_AM_I 0x{:02X}", id),
        }
    }
}

/// LIS3DHTR driver
pub struct Lis3dhtr<I2C> {
    i2c: I2C,
    address: u8,
    scale: FullScale,
    rate: DataRate,
}

impl<I2C: I2c> Lis3dhtr<I2C> {
    /// Address with SA0 pulled high (Grove board default)
    pub const DEFAULT_ADDRESS: u8 = 0x19;

    /// Address with SA0 pulled low
    pub const ALTERNATE_ADDRESS: u8 = 0x18;

    /// Expected `WHO_AM_I` value
    pub const DEVICE_ID: u8 = 0x33;

    /// Probe and configure the sensor at ±2 g, 100 Hz
    ///
    /// # Errors
    ///
    /// Fails on any bus error, or with [`SensorError::WrongDevice`] if the
    /// device at `address` does not identify as a LIS3DH.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, SensorError<I2C::Error>> {
        Self::with_config(i2c, address, FullScale::G2, DataRate::Hz100)
    }

    /// Probe and configure the sensor with an explicit range and rate
    ///
    /// # Errors
    ///
    /// See [`Lis3dhtr::new`].
    pub fn with_config(
        i2c: I2C,
        address: u8,
        scale: FullScale,
        rate: DataRate,
    ) -> Result<Self, SensorError<I2C::Error>> {
        let mut sensor = Self {
            i2c,
            address,
            scale,
            rate,
        };

        let id = sensor.who_am_i()?;
        if id != Self::DEVICE_ID {
            return Err(SensorError::WrongDevice(id));
        }

        sensor.write_ctrl_reg1()?;
        sensor.write_ctrl_reg4()?;
        Ok(sensor)
    }

    /// Read the identification register
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Bus`] if the transaction fails.
    pub fn who_am_i(&mut self) -> Result<u8, SensorError<I2C::Error>> {
        self.read_reg(reg::WHO_AM_I)
    }

    /// Change the measurement range
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Bus`] if the transaction fails; the previous
    /// range is kept in that case.
    pub fn set_full_scale(&mut self, scale: FullScale) -> Result<(), SensorError<I2C::Error>> {
        let previous = self.scale;
        self.scale = scale;
        self.write_ctrl_reg4().inspect_err(|_| self.scale = previous)
    }

    /// Change the output data rate
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Bus`] if the transaction fails; the previous
    /// rate is kept in that case.
    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), SensorError<I2C::Error>> {
        let previous = self.rate;
        self.rate = rate;
        self.write_ctrl_reg1().inspect_err(|_| self.rate = previous)
    }

    /// Current output data rate
    #[must_use]
    pub const fn data_rate(&self) -> DataRate {
        self.rate
    }

    /// Bus address in use
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Whether a new X/Y/Z sample is waiting
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Bus`] if the transaction fails.
    pub fn data_ready(&mut self) -> Result<bool, SensorError<I2C::Error>> {
        Ok(self.read_reg(reg::STATUS_REG)? & bits::ZYXDA != 0)
    }

    /// Read the three 12-bit samples, sign-extended
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Bus`] if the transaction fails.
    pub fn read_raw(&mut self) -> Result<[i16; 3], SensorError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUT_X_L | bits::AUTO_INCREMENT], &mut buf)?;
        Ok(decode_samples(&buf))
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_ctrl_reg1(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_reg(reg::CTRL_REG1, self.rate.as_reg() | bits::XYZ_ENABLE)
    }

    fn write_ctrl_reg4(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_reg(reg::CTRL_REG4, bits::BDU | self.scale.as_reg() | bits::HR)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), SensorError<I2C::Error>> {
        self.i2c.write(self.address, &[reg, value])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, SensorError<I2C::Error>> {
        let mut buf = [0u8];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }
}

impl<I2C: I2c> Accelerometer for Lis3dhtr<I2C> {
    type Error = SensorError<I2C::Error>;

    fn read(&mut self) -> Result<Acceleration, Self::Error> {
        let [x, y, z] = self.read_raw()?;
        Ok(Acceleration::new(
            to_g(x, self.scale),
            to_g(y, self.scale),
            to_g(z, self.scale),
        ))
    }

    fn full_scale(&self) -> FullScale {
        self.scale
    }
}

/// Split a six-byte `OUT_X_L..OUT_Z_H` burst into left-justified 12-bit samples
fn decode_samples(buf: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_le_bytes([buf[0], buf[1]]) >> 4,
        i16::from_le_bytes([buf[2], buf[3]]) >> 4,
        i16::from_le_bytes([buf[4], buf[5]]) >> 4,
    ]
}

fn to_g(raw: i16, scale: FullScale) -> f32 {
    f32::from(raw) * scale.mg_per_digit() / 1000.0
}
