//! Digit patterns for the 5x5 LED matrix
//!
//! Each pattern holds one brightness value per LED. The matrix driver
//! sends element `i` at strip position `24 - i`, and the BitDogLab strip
//! snakes through the rows starting at the bottom-right corner. With both
//! applied, table index `row * 5 + col` lands on the logical pixel for
//! even rows and `row * 5 + (4 - col)` for odd rows, counting rows from
//! the top. [`table_index`] does that mapping.

/// Matrix side length
pub const MATRIX_SIDE: usize = 5;

/// Number of LEDs in the matrix
pub const MATRIX_PIXELS: usize = MATRIX_SIDE * MATRIX_SIDE;

/// Per-LED brightness for one frame
pub type Pattern = [f32; MATRIX_PIXELS];

/// Brightness of a lit segment
///
/// Kept low: the matrix sits a few centimetres from the user's eyes.
pub const LIT: f32 = 0.2;

/// Table index for the logical pixel at (`row`, `col`), row 0 on top
pub const fn table_index(row: usize, col: usize) -> usize {
    if row % 2 == 0 {
        row * MATRIX_SIDE + col
    } else {
        row * MATRIX_SIDE + (MATRIX_SIDE - 1 - col)
    }
}

/// Build a pattern from five row bitmasks, MSB is the leftmost column
const fn glyph(rows: [u8; MATRIX_SIDE]) -> Pattern {
    let mut out = [0.0; MATRIX_PIXELS];
    let mut row = 0;
    while row < MATRIX_SIDE {
        let mut col = 0;
        while col < MATRIX_SIDE {
            if rows[row] & (1 << (MATRIX_SIDE - 1 - col)) != 0 {
                out[table_index(row, col)] = LIT;
            }
            col += 1;
        }
        row += 1;
    }
    out
}

/// Patterns for digits 0-9
#[rustfmt::skip]
pub const DIGITS: [Pattern; 10] = [
    glyph([0b01110, 0b01010, 0b01010, 0b01010, 0b01110]),
    glyph([0b00100, 0b01100, 0b00100, 0b00100, 0b01110]),
    glyph([0b01110, 0b00010, 0b01110, 0b01000, 0b01110]),
    glyph([0b01110, 0b00010, 0b01110, 0b00010, 0b01110]),
    glyph([0b01010, 0b01010, 0b01110, 0b00010, 0b00010]),
    glyph([0b01110, 0b01000, 0b01110, 0b00010, 0b01110]),
    glyph([0b01110, 0b01000, 0b01110, 0b01010, 0b01110]),
    glyph([0b01110, 0b00010, 0b00100, 0b01000, 0b01000]),
    glyph([0b01110, 0b01010, 0b01110, 0b01010, 0b01110]),
    glyph([0b01110, 0b01010, 0b01110, 0b00010, 0b01110]),
];

/// Look up the pattern for a digit
///
/// Returns `None` for values above 9.
pub fn digit_pattern(digit: u8) -> Option<&'static Pattern> {
    DIGITS.get(usize::from(digit))
}
