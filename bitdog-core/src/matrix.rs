//! 5x5 LED matrix driver
//!
//! Streams one encoded word per LED to a [`WordSink`]. Pattern element `i`
//! is sent at output position `24 - i`: the strip's first LED is the last
//! element of the table. Pattern tables are stored with that reversal in
//! mind (see [`crate::patterns`]).

use crate::patterns::{digit_pattern, Pattern, MATRIX_PIXELS};
use crate::pixel::Brightness;
use crate::traits::WordSink;

/// Errors from the matrix driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    /// No pattern exists for this value
    InvalidDigit(u8),
}

/// LED matrix on top of a word sink
///
/// Holds a per-channel tint used by [`LedMatrix::draw_tinted`] to color
/// single-channel patterns.
pub struct LedMatrix<S> {
    sink: S,
    tint: Brightness,
}

impl<S: WordSink> LedMatrix<S> {
    /// Create a matrix driver with a green tint
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            tint: Brightness::GREEN,
        }
    }

    /// Get access to the underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current tint
    pub fn tint(&self) -> Brightness {
        self.tint
    }

    /// Set the tint used by [`LedMatrix::draw_tinted`]
    pub fn set_tint(&mut self, tint: Brightness) {
        self.tint = tint;
    }

    /// Draw a pattern on the green channel only
    pub async fn draw(&mut self, pattern: &Pattern) {
        self.emit(pattern, Brightness::GREEN).await;
    }

    /// Draw a pattern with every channel scaled by the stored tint
    pub async fn draw_tinted(&mut self, pattern: &Pattern) {
        let tint = self.tint;
        self.emit(pattern, tint).await;
    }

    /// Turn every LED off
    pub async fn clear(&mut self) {
        let off = Brightness::OFF.encode();
        for _ in 0..MATRIX_PIXELS {
            self.sink.push_word(off).await;
        }
        self.sink.end_frame().await;
    }

    /// Draw the pattern for a digit (0-9) on the green channel
    pub async fn show_digit(&mut self, digit: u8) -> Result<(), MatrixError> {
        let pattern = digit_pattern(digit).ok_or(MatrixError::InvalidDigit(digit))?;
        self.draw(pattern).await;
        Ok(())
    }

    async fn emit(&mut self, pattern: &Pattern, tint: Brightness) {
        for &level in pattern.iter().rev() {
            self.sink.push_word(tint.scaled(level).encode()).await;
        }
        self.sink.end_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::DIGITS;
    use embassy_futures::block_on;
    use proptest::prelude::*;

    // Mock sink that records every word and frame boundary
    #[derive(Default)]
    struct MockSink {
        words: Vec<u32>,
        frames: usize,
    }

    impl WordSink for MockSink {
        async fn push_word(&mut self, word: u32) {
            self.words.push(word);
        }

        async fn end_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn ramp() -> Pattern {
        let mut pattern = [0.0; MATRIX_PIXELS];
        for (i, v) in pattern.iter_mut().enumerate() {
            *v = i as f32 / 24.0;
        }
        pattern
    }

    #[test]
    fn test_draw_reverses_order() {
        let mut matrix = LedMatrix::new(MockSink::default());
        let pattern = ramp();
        block_on(matrix.draw(&pattern));

        let words = &matrix.sink().words;
        assert_eq!(words.len(), MATRIX_PIXELS);
        // First word out is the last element (1.0), last word out is element 0
        assert_eq!(words[0], 0xFF00_0000);
        assert_eq!(words[24], 0);
        assert_eq!(matrix.sink().frames, 1);
    }

    #[test]
    fn test_draw_is_green_only() {
        let mut matrix = LedMatrix::new(MockSink::default());
        matrix.set_tint(Brightness::WHITE);
        block_on(matrix.draw(&[1.0; MATRIX_PIXELS]));

        assert!(matrix.sink().words.iter().all(|&w| w == 0xFF00_0000));
    }

    #[test]
    fn test_draw_tinted_scales_channels() {
        let mut matrix = LedMatrix::new(MockSink::default());
        matrix.set_tint(Brightness::new(1.0, 0.0, 0.5));
        assert_eq!(matrix.tint(), Brightness::new(1.0, 0.0, 0.5));

        let mut pattern = [0.0; MATRIX_PIXELS];
        pattern[24] = 1.0;
        block_on(matrix.draw_tinted(&pattern));

        let words = &matrix.sink().words;
        assert_eq!(words.len(), MATRIX_PIXELS);
        // red 255, blue 127
        assert_eq!(words[0], 0x00FF_7F00);
        assert!(words[1..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_clear_after_pattern() {
        let mut matrix = LedMatrix::new(MockSink::default());
        block_on(matrix.draw(&DIGITS[8]));
        block_on(matrix.clear());

        let words = &matrix.sink().words;
        assert_eq!(words.len(), 2 * MATRIX_PIXELS);
        assert!(words[MATRIX_PIXELS..]
            .iter()
            .all(|&w| w == Brightness::OFF.encode()));
        assert_eq!(matrix.sink().frames, 2);
    }

    #[test]
    fn test_show_digit() {
        let mut matrix = LedMatrix::new(MockSink::default());
        assert_eq!(block_on(matrix.show_digit(7)), Ok(()));

        let expected: Vec<u32> = DIGITS[7]
            .iter()
            .rev()
            .map(|&v| Brightness::green(v).encode())
            .collect();
        assert_eq!(matrix.sink().words, expected);
    }

    #[test]
    fn test_show_digit_out_of_range() {
        let mut matrix = LedMatrix::new(MockSink::default());
        assert_eq!(
            block_on(matrix.show_digit(12)),
            Err(MatrixError::InvalidDigit(12))
        );
        assert!(matrix.sink().words.is_empty());
        assert_eq!(matrix.sink().frames, 0);
    }

    proptest! {
        #[test]
        fn prop_output_k_encodes_element_24_minus_k(
            pattern in proptest::array::uniform25(0.0f32..=1.0)
        ) {
            let mut matrix = LedMatrix::new(MockSink::default());
            block_on(matrix.draw(&pattern));

            let words = &matrix.sink().words;
            prop_assert_eq!(words.len(), MATRIX_PIXELS);
            for (k, &word) in words.iter().enumerate() {
                prop_assert_eq!(word, Brightness::green(pattern[24 - k]).encode());
            }
        }
    }
}
