//! RP2040-specific peripheral glue for the BitDog firmware
//!
//! This crate provides RP2040 implementations of the `bitdog-core`
//! hardware seams:
//!
//! - PIO-based WS2812 word sink for the 5x5 LED matrix
//! - Buffered UART character source with bounded polling

#![no_std]

pub mod serial;
pub mod ws2812;

pub use serial::UartCharSource;
pub use ws2812::PioWs2812;
