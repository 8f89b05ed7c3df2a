//! BitDog - Serial Peripherals Firmware
//!
//! Main firmware binary for the RP2040-based BitDogLab board.
//! Characters typed on the serial console are shown on the OLED; digits
//! are also drawn on the 5x5 LED matrix. Buttons A and B toggle the
//! green and blue channels of the RGB LED.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{I2C1, PIO0, UART0};
use embassy_rp::pio::Pio;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bitdog_core::config::{BoardPins, Timing, DISPLAY_I2C_HZ, UART_BAUDRATE};
use bitdog_core::screen::show_help;
use bitdog_core::{ButtonId, EventLoop, LedMatrix, SharedState};
use bitdog_drivers::display::Ssd1306;
use bitdog_hal_rp2040::{PioWs2812, UartCharSource};

mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// Executor for the button tasks, driven by a software interrupt
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

// State shared between the button tasks and the event loop
static SHARED: StaticCell<SharedState> = StaticCell::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Iniciando programa...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let pins = BoardPins::default();
    info!("Peripherals initialized, pin map: {}", pins);

    let shared: &'static SharedState = SHARED.init(SharedState::new());

    // Setup PIO0 for the WS2812 matrix (GPIO7) and show the initial digit
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.PIN_7);
    let mut matrix = LedMatrix::new(ws2812);
    if let Err(e) = matrix.show_digit(0).await {
        warn!("Failed to draw initial digit: {:?}", e);
    }

    info!("LED matrix initialized");

    // RGB LED channels (GPIO11 green, GPIO12 blue), both off
    let led_green = Output::new(p.PIN_11, Level::Low);
    let led_blue = Output::new(p.PIN_12, Level::Low);

    // Setup I2C1 for the OLED (GPIO14 SDA, GPIO15 SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);

    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init().await {
        defmt::panic!("Failed to initialize display: {:?}", e);
    }
    if let Err(e) = show_help(&mut display).await {
        defmt::panic!("Failed to draw help screen: {:?}", e);
    }

    info!("Display inicializado.");

    // Setup UART0 for the serial console (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized at {} baud", UART_BAUDRATE);

    // Buttons (GPIO5 A, GPIO6 B), active low
    let button_a = Input::new(p.PIN_5, Pull::Up);
    let button_b = Input::new(p.PIN_6, Pull::Up);

    // Button tasks preempt the event loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    unwrap!(high_spawner.spawn(tasks::button_task(
        ButtonId::A,
        button_a,
        led_green,
        shared
    )));
    unwrap!(high_spawner.spawn(tasks::button_task(
        ButtonId::B,
        button_b,
        led_blue,
        shared
    )));

    let event_loop: tasks::MainLoop =
        EventLoop::new(shared, UartCharSource::new(rx), display, matrix)
            .with_timing(Timing::default());
    unwrap!(spawner.spawn(tasks::event_loop_task(event_loop)));

    info!("All tasks spawned, firmware running");

    // The UART transmit half stays alive with this frame
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
