//! Peripheral Drivers
//!
//! Drivers for external ICs on the board bus.

pub mod lis3dhtr;

use crate::types::{Acceleration, FullScale};

/// A three-axis accelerometer that can be sampled on demand
pub trait Accelerometer {
    /// Error produced by a failed bus transaction
    type Error;

    /// Take one sample, blocking until the bus transaction completes
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the bus transaction fails.
    fn read(&mut self) -> Result<Acceleration, Self::Error>;

    /// Range the returned samples are scaled to
    fn full_scale(&self) -> FullScale;
}

impl<A: Accelerometer + ?Sized> Accelerometer for &mut A {
    type Error = A::Error;

    fn read(&mut self) -> Result<Acceleration, Self::Error> {
        (**self).read()
    }

    fn full_scale(&self) -> FullScale {
        (**self).full_scale()
    }
}
