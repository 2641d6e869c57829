//! FCB - FlawCon e-paper badge firmware
//!
//! Brings up the RP2040 peripherals, builds the badge's drivers once and
//! hands them to the board-agnostic runtime in `fcb-core`.

#![no_std]
#![no_main]

extern crate alloc;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use fcb_core::config::RuntimeConfig;
use fcb_core::traits::TouchError;
use fcb_core::{AppRegistry, Badge, Runtime};
use fcb_drivers::epd::EpdConfig;
use fcb_drivers::sensor::adt75;
use fcb_drivers::touch::cap1296;
use fcb_drivers::{Adt75, Cap1296, Cap1296Config, Epd, FlashConfigStore, SerialConsole};
use fcb_hal::{I2cRegisterBus, SpiCommandBus};
use fcb_hal_rp2040::Rp2040FlashStorage;

use crate::board::{I2cBus, Rp2040Board, CONSOLE_BAUD, I2C_FREQUENCY, SPI_FREQUENCY};

// Heap allocator for boxed apps
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 16KB
const HEAP_SIZE: usize = 16 * 1024;

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Shared by the touch controller and the temperature sensor
static I2C_BUS: StaticCell<RefCell<I2cBus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FCB badge firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // I2C0: CAP1296 touch controller and ADT75 sensor
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let i2c: &'static RefCell<I2cBus> = I2C_BUS.init(RefCell::new(i2c));

    let touch = Cap1296::new(
        I2cRegisterBus::new(RefCellDevice::new(i2c), cap1296::ADDRESS),
        Cap1296Config::default(),
    );
    let sensor = Adt75::new(I2cRegisterBus::new(RefCellDevice::new(i2c), adt75::ADDRESS));
    let alert = Input::new(p.PIN_10, Pull::Up);

    // SPI1: e-paper panel, write-only
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_14, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_15, Level::High);
    let spi = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let dc = Output::new(p.PIN_8, Level::Low);
    let reset = Output::new(p.PIN_0, Level::High);
    let busy = Input::new(p.PIN_16, Pull::None);
    let display = Epd::new(
        SpiCommandBus::new(spi, dc),
        reset,
        busy,
        Delay,
        EpdConfig::default(),
    );

    // UART0: serial console
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = CONSOLE_BAUD;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_12, p.PIN_13, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let console = SerialConsole::new(uart);

    // Owner record in the last 64K of flash
    let store = FlashConfigStore::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));

    let badge: Badge<Rp2040Board> = Badge::new(display, touch, sensor, console, store);
    let mut runtime = Runtime::new(badge, AppRegistry::with_builtins(), RuntimeConfig::default());

    if let Err(e) = configure_touch(runtime.badge()) {
        // Power-on defaults already sense every pad
        warn!("Touch controller setup failed: {}", e);
    }

    if let Err(e) = runtime.boot() {
        error!("Boot failed: {}", e);
    }

    spawner.spawn(tasks::touch_alert_task(alert)).unwrap();
    spawner.spawn(tasks::runtime_task(runtime)).unwrap();

    info!("All tasks spawned, badge running");
}

/// Enable every pad and its alert, and report simultaneous touches
fn configure_touch(badge: &mut Badge<Rp2040Board>) -> Result<(), TouchError> {
    badge.enable_keys(&[])?;
    badge.enable_interrupt(&[])?;
    badge.enable_multitouch(true, 1)
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
