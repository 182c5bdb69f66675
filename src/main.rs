//! Calibrated pulse + LIS3DHTR demo
//!
//! Brings up the board, builds the hardware map and hands it to the
//! application routine. The routine never returns under normal operation;
//! a fatal peripheral error panics and halts the probe.
//!
//! ```text
//! NUCLEO-G474RE <-> LIS3DHTR (Grove)
//! GND           <-> GND
//! +3.3V         <-> VCC
//! PB9           <-> SDA
//! PB8           <-> SCL
//!
//! PA5 = calibrated pulse output (user LED)
//! PA2 = LPUART1 TX (ST-LINK virtual COM port)
//! ```

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::gpio::{Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, UartTx};
use {defmt_rtt as _, panic_probe as _};

use pulse_accel_firmware::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pulse/accelerometer firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    let mut clock = EmbassyClock::new();
    info!("{}", clock);

    // Pulse output on the user LED
    let mut output_pin = PulsePin::new(
        Output::new(p.PA5, embassy_stm32::gpio::Level::Low, Speed::VeryHigh),
        Level::Low,
    );

    // Console on the virtual COM port
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = CONSOLE_BAUD;
    let mut console = Console::new(UartTx::new_blocking(p.LPUART1, p.PA2, uart_config).unwrap());

    // I2C1 for the LIS3DHTR, PB8 = SCL, PB9 = SDA
    let mut i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!("I2C1 initialized at {}Hz", I2C_FREQUENCY_HZ);

    let map = HardwareMap {
        clock: &mut clock,
        console: &mut console,
        output_pin: &mut output_pin,
        i2c: &mut i2c,
    };

    match application(map) {
        Ok(never) => match never {},
        Err(e) => defmt::panic!("application halted: {}", e),
    }
}
