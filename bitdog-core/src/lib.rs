//! Board-agnostic core logic for the BitDog serial peripherals firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (character input, text panel, LED word sink)
//! - WS2812 pixel encoding and the 5x5 matrix driver
//! - Digit pattern table
//! - Debounced button latches and the shared dirty flags
//! - Status screen layout
//! - The flag-dispatching event loop

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod event_loop;
pub mod matrix;
pub mod patterns;
pub mod pixel;
pub mod screen;
pub mod shared;
pub mod traits;

pub use button::{ButtonHandler, ButtonId, ButtonLatch};
pub use event_loop::{EventLoop, LoopError, Tick};
pub use matrix::{LedMatrix, MatrixError};
pub use pixel::Brightness;
pub use shared::{DirtyFlags, SharedState};
