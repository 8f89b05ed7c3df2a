//! Main event loop task
//!
//! Polls the serial console and services the dirty flags raised by the
//! button tasks. Runs forever on the thread-mode executor.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};

use bitdog_core::{EventLoop, LoopError};
use bitdog_drivers::display::Ssd1306;
use bitdog_hal_rp2040::{PioWs2812, UartCharSource};

/// The event loop wired to the board peripherals
pub type MainLoop = EventLoop<
    'static,
    UartCharSource,
    Ssd1306<I2c<'static, I2C1, Async>>,
    PioWs2812<'static, PIO0, 0>,
>;

/// Event loop task
#[embassy_executor::task]
pub async fn event_loop_task(mut event_loop: MainLoop) {
    info!("Event loop started");

    loop {
        match event_loop.step().await {
            Ok(tick) => {
                if let Some(byte) = tick.received {
                    debug!("Serial: {}", byte as char);
                }
                if tick.display_refreshed {
                    trace!("Display refreshed");
                }
                if tick.matrix_refreshed {
                    debug!("Atualizando matriz para: {}", event_loop.current_digit());
                }
            }
            Err(LoopError::Display(e)) => {
                warn!("Display refresh failed: {:?}", e);
            }
            Err(LoopError::Matrix(e)) => {
                warn!("Matrix refresh failed: {:?}", e);
            }
        }
    }
}
