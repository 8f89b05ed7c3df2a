//! Button tasks
//!
//! One task per button, spawned on the high-priority interrupt executor.
//! Each falling edge goes through the debounced latch; an accepted press
//! toggles the LED and asks the main loop for a display refresh.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::Instant;

use bitdog_core::{ButtonHandler, ButtonId, SharedState};

/// Button task - toggles one LED per accepted press
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(
    id: ButtonId,
    mut button: Input<'static>,
    led: Output<'static>,
    shared: &'static SharedState,
) {
    info!("Button {} task started", id);

    let mut handler = ButtonHandler::new(id, shared, led);

    loop {
        button.wait_for_falling_edge().await;

        // Truncation wraps every ~71 minutes; the latch compares with wrapping arithmetic
        let now_us = Instant::now().as_micros() as u32;

        match handler.on_falling_edge(now_us) {
            Ok(Some(on)) => {
                info!(
                    "Botao {}: {} {}",
                    id,
                    id.led_label(),
                    if on { "Ligado" } else { "Desligado" }
                );
            }
            Ok(None) => {
                trace!("Button {}: edge inside debounce window", id);
            }
            Err(e) => match e {},
        }
    }
}
