//! Hardware Abstraction Layer
//!
//! Binds the portable clock, pin and console contracts to STM32G474
//! peripherals through embassy.

pub mod gpio;
pub mod serial;
pub mod timer;
