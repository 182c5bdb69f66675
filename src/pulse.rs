//! Calibrated Delay Engine
//!
//! Holds a digital output at a level for a requested duration using only a
//! polled tick counter. Before each pulse the engine measures two sources of
//! error on the running target:
//!
//! - **calibration overhead**: the cost of one clock read, taken from two
//!   back-to-back reads
//! - **latency**: the cost of changing the pin level, bracketed by two reads
//!
//! The pulse start is back-dated by the latency and every sample in the wait
//! loop is advanced by the calibration overhead, so the loop exits when the
//! *next* read would already be past the deadline.
//!
//! There is no timeout. A counter that stops advancing hangs the caller.

use core::time::Duration;

use crate::clock::{checked_ticks, ticks_for, ticks_for_nanos, Clock, TickError};
use crate::types::Level;

/// A digital output whose level can be set without failure
pub trait LevelPin {
    /// Drive the pin to `level`
    fn set_level(&mut self, level: Level);
}

impl<P: LevelPin + ?Sized> LevelPin for &mut P {
    fn set_level(&mut self, level: Level) {
        (**self).set_level(level);
    }
}

/// Overheads measured immediately before a timed phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Overhead {
    /// Ticks between two consecutive clock reads
    pub calibration: u64,
    /// Ticks spent changing the pin level
    pub latency: u64,
}

impl Overhead {
    /// Measure both overheads, leaving the pin at `level`
    pub fn measure<C, P>(level: Level, clock: &mut C, pin: &mut P) -> Self
    where
        C: Clock + ?Sized,
        P: LevelPin + ?Sized,
    {
        let first = clock.uptime();
        let second = clock.uptime();
        let calibration = second.saturating_sub(first);

        let before = clock.uptime();
        pin.set_level(level);
        let after = clock.uptime();

        Self {
            calibration,
            latency: after.saturating_sub(before),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Overhead {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Overhead(read={}t, pin={}t)",
            self.calibration,
            self.latency
        );
    }
}

/// What happened during one calibrated pulse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseTiming {
    /// Level the pin was held at
    pub level: Level,
    /// Overheads used to correct the deadline
    pub overhead: Overhead,
    /// Requested length in ticks
    pub ticks: u64,
    /// Back-dated start of the pulse
    pub start: u64,
    /// Tick at which the wait was satisfied
    pub deadline: u64,
    /// Last corrected sample taken by the wait loop
    pub exit_sample: u64,
}

impl PulseTiming {
    /// Ticks from the back-dated start to the loop exit sample
    #[must_use]
    pub const fn realized_ticks(&self) -> u64 {
        self.exit_sample.saturating_sub(self.start)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PulseTiming {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Pulse({} for {}t, {}, exit +{}t)",
            self.level,
            self.ticks,
            self.overhead,
            self.realized_ticks()
        );
    }
}

/// Drive `pin` to `level` and hold it there for `duration`
///
/// Both overheads are measured fresh on every call. A zero duration returns
/// after a single sample of the clock.
pub fn timed_pulse<C, P>(level: Level, duration: Duration, clock: &mut C, pin: &mut P) -> PulseTiming
where
    C: Clock + ?Sized,
    P: LevelPin + ?Sized,
{
    let overhead = Overhead::measure(level, clock, pin);
    let ticks = ticks_for(duration, clock.frequency());
    hold(level, ticks, overhead, clock, pin)
}

/// Like [`timed_pulse`] but for a signed nanosecond duration
///
/// # Errors
///
/// Returns [`TickError::Negative`] without touching the pin if the duration
/// converts to a negative tick count.
pub fn try_timed_pulse_nanos<C, P>(
    level: Level,
    duration_ns: i64,
    clock: &mut C,
    pin: &mut P,
) -> Result<PulseTiming, TickError>
where
    C: Clock + ?Sized,
    P: LevelPin + ?Sized,
{
    let ticks = checked_ticks(ticks_for_nanos(duration_ns, clock.frequency()))?;
    let overhead = Overhead::measure(level, clock, pin);
    Ok(hold(level, ticks, overhead, clock, pin))
}

fn hold<C, P>(level: Level, ticks: u64, overhead: Overhead, clock: &mut C, pin: &mut P) -> PulseTiming
where
    C: Clock + ?Sized,
    P: LevelPin + ?Sized,
{
    pin.set_level(level);
    let start = clock.uptime().saturating_sub(overhead.latency);
    let deadline = start.saturating_add(ticks);

    let exit_sample = loop {
        let sample = clock.uptime().saturating_add(overhead.calibration);
        if sample >= deadline {
            break sample;
        }
    };

    PulseTiming {
        level,
        overhead,
        ticks,
        start,
        deadline,
        exit_sample,
    }
}

/// A clock and output pin paired for calibrated pulse generation
pub struct PulseEngine<C, P> {
    clock: C,
    pin: P,
}

impl<C: Clock, P: LevelPin> PulseEngine<C, P> {
    /// Pair a clock with an output pin
    #[must_use]
    pub const fn new(clock: C, pin: P) -> Self {
        Self { clock, pin }
    }

    /// Hold the pin at `level` for `duration`
    pub fn pulse(&mut self, level: Level, duration: Duration) -> PulseTiming {
        timed_pulse(level, duration, &mut self.clock, &mut self.pin)
    }

    /// One period of a 50% duty square wave: `first` for `half_period`, then
    /// the opposite level for `half_period`
    ///
    /// Each phase is calibrated independently.
    pub fn square_wave(&mut self, first: Level, half_period: Duration) -> [PulseTiming; 2] {
        let leading = self.pulse(first, half_period);
        let trailing = self.pulse(first.inverted(), half_period);
        [leading, trailing]
    }

    /// Drive the pin to `level` with no timing
    pub fn settle(&mut self, level: Level) {
        self.pin.set_level(level);
    }

    /// Give back the clock and pin
    pub fn release(self) -> (C, P) {
        (self.clock, self.pin)
    }
}
