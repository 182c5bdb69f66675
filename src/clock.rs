//! Monotonic clock capability and tick arithmetic
//!
//! The timing code never talks to a hardware timer directly. It reads a
//! free-running counter through [`Clock`] and converts wall-clock durations
//! into tick budgets using the counter frequency.

use core::time::Duration;

/// Nanoseconds per second
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A free-running, non-decreasing tick counter
///
/// Implementations must never return a smaller value than a previous read.
/// Busy-waits built on top of this trait hang if the counter stalls.
pub trait Clock {
    /// Current counter value in ticks
    fn uptime(&mut self) -> u64;

    /// Counter rate in ticks per second
    fn frequency(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn uptime(&mut self) -> u64 {
        (**self).uptime()
    }

    fn frequency(&self) -> u64 {
        (**self).frequency()
    }
}

/// Negative tick budget rejected by [`checked_ticks`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickError {
    /// The requested duration was negative by this many ticks
    Negative(i64),
}

#[cfg(feature = "embedded")]
impl defmt::Format for TickError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Negative(ticks) => defmt::write!(f, "negative duration ({} ticks)", ticks),
        }
    }
}

/// Length of one tick in nanoseconds (truncating)
///
/// Frequencies above 1 GHz would truncate to zero; the result is clamped to
/// one nanosecond so it can always be used as a divisor.
#[must_use]
pub const fn wavelength_ns(frequency_hz: u64) -> u64 {
    if frequency_hz == 0 {
        return NANOS_PER_SEC;
    }
    let ns = NANOS_PER_SEC / frequency_hz;
    if ns == 0 {
        1
    } else {
        ns
    }
}

/// Signed tick count for a signed nanosecond duration
///
/// Integer division truncates toward zero, so partial ticks are dropped.
#[must_use]
pub const fn ticks_for_nanos(duration_ns: i64, frequency_hz: u64) -> i64 {
    // wavelength_ns() is at most NANOS_PER_SEC, which fits in i64
    duration_ns / wavelength_ns(frequency_hz) as i64
}

/// Reinterpret a signed tick count as an unsigned deadline offset
///
/// This is a bit-level reinterpretation: `-1` becomes `u64::MAX` and any
/// negative input produces a near-maximal budget. Use [`checked_ticks`] when
/// the sign of the input is not already guaranteed.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn reinterpret_ticks(ticks: i64) -> u64 {
    ticks as u64
}

/// Convert a signed tick count, rejecting negative values
///
/// # Errors
///
/// Returns [`TickError::Negative`] if `ticks < 0`.
pub const fn checked_ticks(ticks: i64) -> Result<u64, TickError> {
    if ticks < 0 {
        Err(TickError::Negative(ticks))
    } else {
        Ok(reinterpret_ticks(ticks))
    }
}

/// Tick budget for a (non-negative) duration at the given frequency
#[must_use]
pub fn ticks_for(duration: Duration, frequency_hz: u64) -> u64 {
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    nanos / wavelength_ns(frequency_hz)
}

/// Busy-wait for `duration` without any overhead compensation
///
/// Used for coarse waits such as the sensor poll interval.
pub fn delay<C: Clock + ?Sized>(clock: &mut C, duration: Duration) {
    let ticks = ticks_for(duration, clock.frequency());
    let deadline = clock.uptime().saturating_add(ticks);
    while clock.uptime() < deadline {}
}
