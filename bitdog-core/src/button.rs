//! Debounced push-button latches
//!
//! Each button toggles a boolean on its falling edge. An edge is accepted
//! only if more than the debounce window has passed since the last
//! accepted edge of the same button; anything sooner is contact bounce
//! and is dropped without a trace.
//!
//! The handler runs in interrupt context. It never blocks: it flips the
//! latch, mirrors the new state onto the status LED and raises the
//! display flag.

use embedded_hal::digital::{OutputPin, PinState};
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::Timing;
use crate::shared::SharedState;

/// On-board push buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A, toggles the green LED
    A,
    /// Button B, toggles the blue LED
    B,
}

impl ButtonId {
    /// Label of the LED this button controls, as shown on the display
    pub fn led_label(self) -> &'static str {
        match self {
            ButtonId::A => "LED Verde",
            ButtonId::B => "LED Azul",
        }
    }
}

/// Toggle state and debounce timestamp for one button
///
/// Written only by that button's handler; read by anyone.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    on: AtomicBool,
    /// Microseconds since boot of the last accepted edge (wrapping)
    last_accepted_us: AtomicU32,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            on: AtomicBool::new(false),
            last_accepted_us: AtomicU32::new(0),
        }
    }

    /// Current toggle state
    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    /// Timestamp of the last accepted edge
    pub fn last_accepted_us(&self) -> u32 {
        self.last_accepted_us.load(Ordering::Acquire)
    }

    /// Process a falling edge seen at `now_us`
    ///
    /// Returns the new state if the edge was accepted, `None` if it fell
    /// inside the debounce window. Elapsed time uses wrapping arithmetic,
    /// so the 32-bit microsecond counter may roll over.
    pub fn on_falling_edge(&self, now_us: u32, window_us: u32) -> Option<bool> {
        let elapsed = now_us.wrapping_sub(self.last_accepted_us());
        if elapsed <= window_us {
            return None;
        }

        let on = !self.on.load(Ordering::Relaxed);
        self.on.store(on, Ordering::Release);
        self.last_accepted_us.store(now_us, Ordering::Release);
        Some(on)
    }
}

/// Falling-edge handler for one button
///
/// Binds the button's latch in the shared state to its status LED.
pub struct ButtonHandler<'a, P> {
    id: ButtonId,
    shared: &'a SharedState,
    led: P,
    debounce_us: u32,
}

impl<'a, P: OutputPin> ButtonHandler<'a, P> {
    /// Create a handler with the default debounce window
    pub fn new(id: ButtonId, shared: &'a SharedState, led: P) -> Self {
        Self {
            id,
            shared,
            led,
            debounce_us: Timing::default().debounce_us,
        }
    }

    /// Override the debounce window
    pub fn with_debounce(mut self, debounce_us: u32) -> Self {
        self.debounce_us = debounce_us;
        self
    }

    /// Which button this handler serves
    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Access the status LED
    pub fn led(&self) -> &P {
        &self.led
    }

    /// Handle a falling edge seen at `now_us`
    ///
    /// On acceptance the LED is driven to the new state and the display
    /// flag is raised. The flag is raised even if the LED write fails;
    /// the write error is returned afterwards.
    pub fn on_falling_edge(&mut self, now_us: u32) -> Result<Option<bool>, P::Error> {
        let Some(on) = self
            .shared
            .latch(self.id)
            .on_falling_edge(now_us, self.debounce_us)
        else {
            return Ok(None);
        };

        let written = self.led.set_state(PinState::from(on));
        self.shared.flags.raise_display();
        written.map(|()| Some(on))
    }
}
