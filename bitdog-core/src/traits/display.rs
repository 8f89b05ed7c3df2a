//! Text panel trait for the OLED display

/// Trait for a buffered text display
///
/// Drawing only touches the local frame buffer; nothing reaches the
/// panel until [`TextPanel::flush`] is called.
#[allow(async_fn_in_trait)]
pub trait TextPanel {
    /// Error returned when the buffer cannot be transmitted
    type Error;

    /// Clear the frame buffer
    fn clear(&mut self);

    /// Draw text with its top-left corner at pixel (`x`, `y`)
    ///
    /// Text running past the right edge is clipped.
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Transmit the frame buffer to the panel
    async fn flush(&mut self) -> Result<(), Self::Error>;
}
