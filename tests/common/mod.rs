//! Host-side fakes for the clock, pin, bus, console and sensor
//!
//! All fakes that need a notion of time share one `SharedTime` so the tests
//! can see exactly when each pin edge and bus read happened.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use pulse_accel_firmware::clock::Clock;
use pulse_accel_firmware::drivers::Accelerometer;
use pulse_accel_firmware::pulse::LevelPin;
use pulse_accel_firmware::report::Reporter;
use pulse_accel_firmware::types::{Acceleration, FullScale, Level};

// =============================================================================
// Time
// =============================================================================

/// Tick counter shared between fakes
#[derive(Clone, Default)]
pub struct SharedTime(Rc<Cell<u64>>);

impl SharedTime {
    pub fn starting_at(tick: u64) -> Self {
        Self(Rc::new(Cell::new(tick)))
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, ticks: u64) {
        self.0.set(self.0.get() + ticks);
    }
}

/// Clock whose every read costs `step` ticks
pub struct FakeClock {
    pub time: SharedTime,
    pub step: u64,
    pub frequency_hz: u64,
    pub reads: usize,
}

impl FakeClock {
    pub fn new(time: &SharedTime, step: u64, frequency_hz: u64) -> Self {
        Self {
            time: time.clone(),
            step,
            frequency_hz,
            reads: 0,
        }
    }
}

impl Clock for FakeClock {
    fn uptime(&mut self) -> u64 {
        let now = self.time.now();
        self.time.advance(self.step);
        self.reads += 1;
        now
    }

    fn frequency(&self) -> u64 {
        self.frequency_hz
    }
}

// =============================================================================
// Output pin
// =============================================================================

/// Pin that records every level change and costs `cost` ticks to drive
pub struct RecordingPin {
    pub time: SharedTime,
    pub cost: u64,
    pub edges: Vec<(Level, u64)>,
}

impl RecordingPin {
    pub fn new(time: &SharedTime, cost: u64) -> Self {
        Self {
            time: time.clone(),
            cost,
            edges: Vec::new(),
        }
    }

    pub fn levels(&self) -> Vec<Level> {
        self.edges.iter().map(|&(level, _)| level).collect()
    }

    pub fn last_edge(&self) -> u64 {
        self.edges.last().map_or(0, |&(_, at)| at)
    }
}

impl LevelPin for RecordingPin {
    fn set_level(&mut self, level: Level) {
        self.edges.push((level, self.time.now()));
        self.time.advance(self.cost);
    }
}

// =============================================================================
// I2C bus with a LIS3DH register file behind it
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault;

impl embedded_hal::i2c::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub const OUT_X_L: u8 = 0x28;

/// Register-file model of a LIS3DH on an I2C bus
pub struct RegisterBus {
    pub address: u8,
    pub regs: [u8; 0x40],
    /// Register writes as (register, value) pairs
    pub writes: Vec<(u8, u8)>,
    /// Register pointers sent before each read
    pub pointers: Vec<u8>,
    /// Fail every transaction
    pub fail_all: bool,
    /// Number of register writes allowed before the bus faults
    pub register_writes_before_fault: Option<usize>,
    /// Number of sample reads allowed before the bus faults
    pub samples_before_fault: Option<usize>,
    pub samples_read: usize,
    /// When set, sample reads are time-stamped and cost `read_cost` ticks
    pub time: Option<SharedTime>,
    pub read_cost: u64,
    pub read_times: Vec<u64>,
    pointer: u8,
}

impl RegisterBus {
    pub fn lis3dh(address: u8) -> Self {
        let mut regs = [0u8; 0x40];
        regs[0x0F] = 0x33;
        Self {
            address,
            regs,
            writes: Vec::new(),
            pointers: Vec::new(),
            fail_all: false,
            register_writes_before_fault: None,
            samples_before_fault: None,
            samples_read: 0,
            time: None,
            read_cost: 0,
            read_times: Vec::new(),
            pointer: 0,
        }
    }

    /// Load 12-bit digits into OUT_X_L..OUT_Z_H, left-justified
    pub fn set_sample(&mut self, digits: [i16; 3]) {
        for (axis, value) in digits.iter().enumerate() {
            let bytes = (value << 4).to_le_bytes();
            let base = usize::from(OUT_X_L) + axis * 2;
            self.regs[base] = bytes[0];
            self.regs[base + 1] = bytes[1];
        }
    }

    pub fn reg(&self, reg: u8) -> u8 {
        self.regs[usize::from(reg)]
    }
}

impl ErrorType for RegisterBus {
    type Error = BusFault;
}

impl I2c for RegisterBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_all || address != self.address {
            return Err(BusFault);
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let (&first, rest) = bytes.split_first().ok_or(BusFault)?;
                    self.pointer = first;
                    let reg = usize::from(first & 0x7F);
                    if let Some(limit) = self.register_writes_before_fault {
                        if !rest.is_empty() && self.writes.len() >= limit {
                            return Err(BusFault);
                        }
                    }
                    for (i, &value) in rest.iter().enumerate() {
                        self.regs[reg + i] = value;
                        self.writes.push((first & 0x7F, value));
                    }
                }
                Operation::Read(buf) => {
                    self.pointers.push(self.pointer);
                    let reg = usize::from(self.pointer & 0x7F);
                    let increment = self.pointer & 0x80 != 0;

                    if reg == usize::from(OUT_X_L) {
                        if let Some(limit) = self.samples_before_fault {
                            if self.samples_read >= limit {
                                return Err(BusFault);
                            }
                        }
                        self.samples_read += 1;
                        if let Some(time) = &self.time {
                            self.read_times.push(time.now());
                            time.advance(self.read_cost);
                        }
                    }

                    for (i, byte) in buf.iter_mut().enumerate() {
                        let offset = if increment { i } else { 0 };
                        *byte = self.regs[reg + offset];
                    }
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Console
// =============================================================================

/// Byte console capturing everything written to it
#[derive(Default)]
pub struct RecordingConsole {
    pub out: Vec<u8>,
    pub flushes: usize,
    pub fail: bool,
}

impl RecordingConsole {
    pub fn text(&self) -> String {
        String::from_utf8(self.out.clone()).unwrap()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl embedded_io::ErrorType for RecordingConsole {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for RecordingConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail {
            return Err(embedded_io::ErrorKind::BrokenPipe);
        }
        self.out.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(embedded_io::ErrorKind::BrokenPipe);
        }
        self.flushes += 1;
        Ok(())
    }
}

// =============================================================================
// Sensor and reporter
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorFault;

/// Accelerometer that replays queued samples, then fails
pub struct ScriptedSensor {
    pub time: SharedTime,
    pub read_cost: u64,
    pub samples: VecDeque<Acceleration>,
    pub read_times: Vec<u64>,
    pub scale: FullScale,
}

impl ScriptedSensor {
    pub fn new(time: &SharedTime, read_cost: u64, samples: &[Acceleration]) -> Self {
        Self {
            time: time.clone(),
            read_cost,
            samples: samples.iter().copied().collect(),
            read_times: Vec::new(),
            scale: FullScale::G2,
        }
    }
}

impl Accelerometer for ScriptedSensor {
    type Error = SensorFault;

    fn read(&mut self) -> Result<Acceleration, Self::Error> {
        self.read_times.push(self.time.now());
        self.time.advance(self.read_cost);
        self.samples.pop_front().ok_or(SensorFault)
    }

    fn full_scale(&self) -> FullScale {
        self.scale
    }
}

/// Reporter that keeps every sample it is given
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
    pub samples: Vec<(FullScale, Acceleration)>,
}

impl Reporter for RecordingReporter {
    type Error = Infallible;

    fn print(&mut self, message: &str) -> Result<(), Self::Error> {
        self.messages.push(message.to_owned());
        Ok(())
    }

    fn report(&mut self, scale: FullScale, sample: &Acceleration) -> Result<(), Self::Error> {
        self.samples.push((scale, *sample));
        Ok(())
    }
}
