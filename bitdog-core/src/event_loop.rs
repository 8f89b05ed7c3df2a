//! Flag-dispatching event loop
//!
//! One iteration:
//!
//! 1. Poll the serial input with a bounded wait. A received byte becomes
//!    the last received character and raises the display flag; an ASCII
//!    digit also updates the current digit and raises the matrix flag.
//! 2. If the display flag was set, clear it and refresh the display, then
//!    forget the last received character.
//! 3. If the matrix flag was set, clear it and redraw the current digit.
//!
//! The display refresh always runs before the matrix refresh. Flags are
//! cleared before their refresh starts, so a button press landing in the
//! middle of a refresh triggers another one on the next iteration.

use crate::button::ButtonId;
use crate::config::Timing;
use crate::matrix::{LedMatrix, MatrixError};
use crate::screen::Status;
use crate::shared::SharedState;
use crate::traits::{CharSource, TextPanel, WordSink};

/// Classification of a received byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Received {
    /// ASCII digit with its numeric value
    Digit(u8),
    /// Any other byte
    Other(u8),
}

impl Received {
    pub fn classify(byte: u8) -> Self {
        if byte.is_ascii_digit() {
            Received::Digit(byte - b'0')
        } else {
            Received::Other(byte)
        }
    }
}

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Byte received this iteration
    pub received: Option<u8>,
    /// Display was refreshed
    pub display_refreshed: bool,
    /// Matrix was redrawn
    pub matrix_refreshed: bool,
}

/// Errors from one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopError<E> {
    /// Display flush failed
    Display(E),
    /// Matrix refresh failed
    Matrix(MatrixError),
}

/// The main loop and the state only it touches
pub struct EventLoop<'a, C, D, W> {
    shared: &'a SharedState,
    input: C,
    panel: D,
    matrix: LedMatrix<W>,
    timing: Timing,
    last_char: Option<u8>,
    current_digit: u8,
}

impl<'a, C, D, W> EventLoop<'a, C, D, W>
where
    C: CharSource,
    D: TextPanel,
    W: WordSink,
{
    /// Create the event loop with default timing
    ///
    /// The current digit starts at 0 and no character is pending.
    pub fn new(shared: &'a SharedState, input: C, panel: D, matrix: LedMatrix<W>) -> Self {
        Self {
            shared,
            input,
            panel,
            matrix,
            timing: Timing::default(),
            last_char: None,
            current_digit: 0,
        }
    }

    /// Override the timing parameters
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Digit currently shown on the matrix
    pub fn current_digit(&self) -> u8 {
        self.current_digit
    }

    /// Character received but not yet shown
    pub fn last_char(&self) -> Option<u8> {
        self.last_char
    }

    /// Get access to the display
    pub fn panel(&self) -> &D {
        &self.panel
    }

    /// Get access to the matrix driver
    pub fn matrix(&self) -> &LedMatrix<W> {
        &self.matrix
    }

    /// Record a received byte and raise the matching flags
    pub fn accept_char(&mut self, byte: u8) -> Received {
        self.last_char = Some(byte);
        self.shared.flags.raise_display();

        let received = Received::classify(byte);
        if let Received::Digit(digit) = received {
            self.current_digit = digit;
            self.shared.flags.raise_matrix();
        }
        received
    }

    /// Snapshot of what the display should show right now
    pub fn status(&self) -> Status {
        Status {
            last_char: self.last_char,
            digit: self.current_digit,
            green_on: self.shared.button_on(ButtonId::A),
            blue_on: self.shared.button_on(ButtonId::B),
        }
    }

    /// Run one iteration
    ///
    /// A display error is returned before the matrix step; the matrix
    /// flag stays raised and is serviced on the next iteration.
    pub async fn step(&mut self) -> Result<Tick, LoopError<D::Error>> {
        let mut tick = Tick::default();

        if let Some(byte) = self.input.poll_char(self.timing.input_poll_timeout_us).await {
            self.accept_char(byte);
            tick.received = Some(byte);
        }

        if self.shared.flags.take_display() {
            let rendered = self.status().render(&mut self.panel).await;
            self.last_char = None;
            rendered.map_err(LoopError::Display)?;
            tick.display_refreshed = true;
        }

        if self.shared.flags.take_matrix() {
            self.matrix
                .show_digit(self.current_digit)
                .await
                .map_err(LoopError::Matrix)?;
            tick.matrix_refreshed = true;
        }

        Ok(tick)
    }
}
