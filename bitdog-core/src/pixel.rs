//! WS2812 pixel encoding
//!
//! The strip takes 24 bits per LED, green first, shifted out MSB-first.
//! Encoded words carry the color in the upper three bytes so the PIO
//! state machine can shift left with a 24-bit autopull threshold:
//!
//! ```text
//! bits 31..24  green
//! bits 23..16  red
//! bits 15..8   blue
//! bits  7..0   zero
//! ```

/// Per-channel brightness, nominally in `0.0..=1.0`
///
/// Channels are always named; there is no positional (r, g, b) form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Brightness {
    /// All channels off
    pub const OFF: Self = Self::new(0.0, 0.0, 0.0);

    /// Full green, the default matrix color
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    /// All channels at full brightness
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a brightness triple
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Green channel only
    pub const fn green(level: f32) -> Self {
        Self::new(0.0, level, 0.0)
    }

    /// Multiply every channel by `level`
    pub fn scaled(self, level: f32) -> Self {
        Self::new(self.red * level, self.green * level, self.blue * level)
    }

    /// Clamp every channel into `0.0..=1.0`
    pub fn clamped(self) -> Self {
        Self::new(
            self.red.clamp(0.0, 1.0),
            self.green.clamp(0.0, 1.0),
            self.blue.clamp(0.0, 1.0),
        )
    }

    /// Pack into the strip's GRB word
    ///
    /// Each channel is scaled by 255 and truncated. Inputs are not
    /// range-checked: the float-to-byte cast saturates, so negative
    /// values and NaN give 0 and values above 1.0 give 255.
    pub fn encode(self) -> u32 {
        (channel_byte(self.green) << 24)
            | (channel_byte(self.red) << 16)
            | (channel_byte(self.blue) << 8)
    }
}

fn channel_byte(level: f32) -> u32 {
    u32::from((level * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_channel_positions() {
        assert_eq!(Brightness::new(0.0, 1.0, 0.0).encode(), 0xFF00_0000);
        assert_eq!(Brightness::new(1.0, 0.0, 0.0).encode(), 0x00FF_0000);
        assert_eq!(Brightness::new(0.0, 0.0, 1.0).encode(), 0x0000_FF00);
        assert_eq!(Brightness::WHITE.encode(), 0xFFFF_FF00);
        assert_eq!(Brightness::OFF.encode(), 0);
    }

    #[test]
    fn test_encode_truncates() {
        // 0.5 * 255 = 127.5
        assert_eq!(Brightness::green(0.5).encode() >> 24, 127);
        // 0.999 * 255 = 254.7
        assert_eq!(Brightness::green(0.999).encode() >> 24, 254);
        // 0.1 * 255 = 25.5
        assert_eq!(Brightness::green(0.1).encode() >> 24, 25);
    }

    #[test]
    fn test_encode_out_of_range_saturates() {
        assert_eq!(Brightness::new(-0.5, 2.0, f32::NAN).encode(), 0xFF00_0000);
    }

    #[test]
    fn test_clamped() {
        let b = Brightness::new(-1.0, 0.25, 3.0).clamped();
        assert_eq!(b, Brightness::new(0.0, 0.25, 1.0));
    }

    #[test]
    fn test_scaled() {
        let tint = Brightness::new(1.0, 0.5, 0.0);
        assert_eq!(tint.scaled(0.5), Brightness::new(0.5, 0.25, 0.0));
        assert_eq!(Brightness::GREEN.scaled(0.2), Brightness::green(0.2));
    }

    proptest! {
        #[test]
        fn prop_encode_floors_each_channel(
            red in 0.0f32..=1.0,
            green in 0.0f32..=1.0,
            blue in 0.0f32..=1.0,
        ) {
            let word = Brightness::new(red, green, blue).encode();

            prop_assert_eq!(word >> 24, (green * 255.0).floor() as u32);
            prop_assert_eq!((word >> 16) & 0xFF, (red * 255.0).floor() as u32);
            prop_assert_eq!((word >> 8) & 0xFF, (blue * 255.0).floor() as u32);
            prop_assert_eq!(word & 0xFF, 0);
        }
    }
}
