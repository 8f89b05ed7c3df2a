//! Status screen layout
//!
//! The OLED shows four lines, 16 pixels apart:
//!
//! ```text
//! Serial: a
//! Matriz: 7
//! LED Verde: ON
//! LED Azul: OFF
//! ```

use core::fmt::Write;

use heapless::String;

use crate::button::ButtonId;
use crate::traits::TextPanel;

/// Maximum characters per line
pub const LINE_CAPACITY: usize = 32;

/// Vertical pixel offset of each status line
pub const LINE_Y: [i32; 4] = [0, 16, 32, 48];

/// One rendered line of text
pub type Line = String<LINE_CAPACITY>;

/// Startup help screen heading
pub const HELP_TITLE: &str = "MINUSCULAS:";

/// Startup help screen body, clipped to the panel width when drawn
pub const HELP_BODY: &str = "a b c d e f g h i j k l m n o p q r s t u v w x y z";

/// Snapshot of everything the status screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Character received since the last refresh, if any
    pub last_char: Option<u8>,
    /// Digit currently on the matrix
    pub digit: u8,
    /// Green LED state (button A)
    pub green_on: bool,
    /// Blue LED state (button B)
    pub blue_on: bool,
}

impl Status {
    /// Format the four status lines
    pub fn lines(&self) -> [Line; 4] {
        let mut serial = Line::new();
        match self.last_char {
            Some(c) => {
                let _ = write!(serial, "Serial: {}", char::from(c));
            }
            None => {
                let _ = serial.push_str("Serial: -");
            }
        }

        let mut matrix = Line::new();
        match self.last_char {
            Some(c) if c.is_ascii_digit() => {
                let _ = write!(matrix, "Matriz: {}", char::from(c));
            }
            _ => {
                let _ = write!(matrix, "Matriz: {}", self.digit);
            }
        }

        [
            serial,
            matrix,
            led_line(ButtonId::A, self.green_on),
            led_line(ButtonId::B, self.blue_on),
        ]
    }

    /// Clear the panel, draw the status lines and flush
    pub async fn render<P: TextPanel>(&self, panel: &mut P) -> Result<(), P::Error> {
        panel.clear();
        for (line, &y) in self.lines().iter().zip(LINE_Y.iter()) {
            panel.draw_text(0, y, line);
        }
        panel.flush().await
    }
}

fn led_line(id: ButtonId, on: bool) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{}: {}", id.led_label(), if on { "ON" } else { "OFF" });
    line
}

/// Draw the startup help screen
pub async fn show_help<P: TextPanel>(panel: &mut P) -> Result<(), P::Error> {
    panel.clear();
    panel.draw_text(0, LINE_Y[0], HELP_TITLE);
    panel.draw_text(0, LINE_Y[1], HELP_BODY);
    panel.flush().await
}
