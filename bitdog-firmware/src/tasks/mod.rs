//! Embassy async tasks
//!
//! Button tasks run on the interrupt executor; the event loop runs on
//! the thread-mode executor. They share state only through `SharedState`.

pub mod button;
pub mod event_loop;

pub use button::button_task;
pub use event_loop::{event_loop_task, MainLoop};
