//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod matrix;
pub mod serial;

pub use display::TextPanel;
pub use matrix::WordSink;
pub use serial::CharSource;
