//! Peripheral driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in bitdog-core for the board's peripherals:
//!
//! - SSD1306 128x64 OLED over I2C (text panel)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
