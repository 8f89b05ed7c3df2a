//! State shared between the button interrupt context and the main loop
//!
//! Everything here is lock-free. Producers (button handlers, input
//! classification) only raise flags; the event loop is the single
//! consumer and clears a flag with an atomic swap *before* acting on it,
//! so a flag raised again during a refresh survives until the next
//! iteration.

use portable_atomic::{AtomicBool, Ordering};

use crate::button::{ButtonId, ButtonLatch};

/// Deferred-refresh flags
#[derive(Debug, Default)]
pub struct DirtyFlags {
    display: AtomicBool,
    matrix: AtomicBool,
}

impl DirtyFlags {
    /// Create with both flags clear
    pub const fn new() -> Self {
        Self {
            display: AtomicBool::new(false),
            matrix: AtomicBool::new(false),
        }
    }

    /// Request a display refresh
    pub fn raise_display(&self) {
        self.display.store(true, Ordering::Release);
    }

    /// Request a matrix refresh
    pub fn raise_matrix(&self) {
        self.matrix.store(true, Ordering::Release);
    }

    /// Clear the display flag, returning whether it was set
    pub fn take_display(&self) -> bool {
        self.display.swap(false, Ordering::AcqRel)
    }

    /// Clear the matrix flag, returning whether it was set
    pub fn take_matrix(&self) -> bool {
        self.matrix.swap(false, Ordering::AcqRel)
    }

    /// Check the display flag without clearing it
    pub fn display_pending(&self) -> bool {
        self.display.load(Ordering::Acquire)
    }

    /// Check the matrix flag without clearing it
    pub fn matrix_pending(&self) -> bool {
        self.matrix.load(Ordering::Acquire)
    }
}

/// Context object shared by the event loop and both button handlers
///
/// Created once by the startup routine and handed out by reference.
#[derive(Debug, Default)]
pub struct SharedState {
    pub flags: DirtyFlags,
    button_a: ButtonLatch,
    button_b: ButtonLatch,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            flags: DirtyFlags::new(),
            button_a: ButtonLatch::new(),
            button_b: ButtonLatch::new(),
        }
    }

    /// Latch belonging to a button
    pub fn latch(&self, id: ButtonId) -> &ButtonLatch {
        match id {
            ButtonId::A => &self.button_a,
            ButtonId::B => &self.button_b,
        }
    }

    /// Current toggle state of a button
    pub fn button_on(&self, id: ButtonId) -> bool {
        self.latch(id).is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let flags = DirtyFlags::new();
        assert!(!flags.take_display());

        flags.raise_display();
        assert!(flags.display_pending());
        assert!(flags.take_display());
        assert!(!flags.take_display());
        assert!(!flags.display_pending());
    }

    #[test]
    fn test_flags_are_independent() {
        let flags = DirtyFlags::new();
        flags.raise_matrix();

        assert!(!flags.take_display());
        assert!(flags.matrix_pending());
        assert!(flags.take_matrix());
    }

    #[test]
    fn test_raise_after_take_is_kept() {
        let flags = DirtyFlags::new();
        flags.raise_display();
        assert!(flags.take_display());

        // Producer fires while the consumer is still refreshing
        flags.raise_display();
        assert!(flags.take_display());
    }

    #[test]
    fn test_shared_state_starts_idle() {
        let shared = SharedState::new();
        assert!(!shared.button_on(ButtonId::A));
        assert!(!shared.button_on(ButtonId::B));
        assert!(!shared.flags.display_pending());
        assert!(!shared.flags.matrix_pending());
    }
}
