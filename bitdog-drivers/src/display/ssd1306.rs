//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.
//! Text is rendered into a local frame buffer with the embedded-graphics
//! 6x10 font and sent to the panel on flush.

use core::convert::Infallible;

use bitdog_core::traits::TextPanel;
use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_async::i2c::I2c;

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
}

/// Power-up sequence for a 128x64 panel with internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_MEMORY_MODE,
    0x00, // Horizontal addressing
    cmd::SET_START_LINE,
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x30, // 0.83 x Vcc
    cmd::SET_CONTRAST,
    0xFF,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::DISPLAY_ON,
];

/// Errors from the SSD1306 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ssd1306Error<E> {
    /// I2C transfer failed
    Bus(E),
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C> Ssd1306<I2C> {
    /// Create a new SSD1306 driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    /// Create a new SSD1306 driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Set or clear one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        let byte = &mut self.buffer[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Read one pixel from the frame buffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw contents of one 8-pixel-high page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.buffer.get(page)
    }
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), Ssd1306Error<I2C::Error>> {
        for &c in INIT_SEQUENCE {
            self.command(c).await?;
        }
        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), Ssd1306Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .await
            .map_err(Ssd1306Error::Bus)
    }

    /// Send the whole frame buffer
    async fn write_frame(&mut self) -> Result<(), Ssd1306Error<I2C::Error>> {
        // Full-screen window; the address pointer then walks every page
        let window = [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ];
        for c in window {
            self.command(c).await?;
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(self.address, &data)
                .await
                .map_err(Ssd1306Error::Bus)?;
        }

        Ok(())
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> TextPanel for Ssd1306<I2C> {
    type Error = Ssd1306Error<I2C::Error>;

    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        // Drawing into the frame buffer cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.write_frame().await
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use std::vec::Vec;

    // Mock I2C bus that records every write
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn page_is_empty(display: &Ssd1306<MockI2c>, page: usize) -> bool {
        display.page(page).unwrap().iter().all(|&b| b == 0)
    }

    #[test]
    fn test_init_sequence() {
        let mut display = Ssd1306::new(MockI2c::default());
        block_on(display.init()).unwrap();

        let bus = display.release();
        assert_eq!(bus.writes.len(), INIT_SEQUENCE.len());
        assert!(bus.writes.iter().all(|(addr, bytes)| *addr == SSD1306_ADDR
            && bytes.len() == 2
            && bytes[0] == CONTROL_COMMAND));
        assert_eq!(bus.writes.first().unwrap().1[1], cmd::DISPLAY_OFF);
        assert_eq!(bus.writes.last().unwrap().1[1], cmd::DISPLAY_ON);
    }

    #[test]
    fn test_custom_address() {
        let mut display = Ssd1306::with_address(MockI2c::default(), 0x3D);
        block_on(display.init()).unwrap();
        assert!(display.release().writes.iter().all(|(addr, _)| *addr == 0x3D));
    }

    #[test]
    fn test_set_pixel() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.set_pixel(3, 10, true);
        assert!(display.pixel(3, 10));
        assert_eq!(display.page(1).unwrap()[3], 0b0000_0100);

        display.set_pixel(3, 10, false);
        assert!(!display.pixel(3, 10));

        // Off-screen writes are ignored
        display.set_pixel(WIDTH, 0, true);
        display.set_pixel(0, HEIGHT, true);
        assert!((0..PAGES).all(|p| page_is_empty(&display, p)));
    }

    #[test]
    fn test_draw_text_rows() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.draw_text(0, 16, "Matriz: 7");

        // 10-pixel font at y=16 covers pages 2 and 3 only
        assert!(page_is_empty(&display, 0));
        assert!(page_is_empty(&display, 1));
        assert!(!page_is_empty(&display, 2));
        assert!((4..PAGES).all(|p| page_is_empty(&display, p)));

        // First glyph starts at the left edge
        assert!((0..6).any(|x| (16..26).any(|y| display.pixel(x, y))));
    }

    #[test]
    fn test_draw_text_clips_long_lines() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.draw_text(0, 0, bitdog_core::screen::HELP_BODY);
        assert!(!page_is_empty(&display, 0));
        assert!((2..PAGES).all(|p| page_is_empty(&display, p)));
    }

    #[test]
    fn test_clear() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.draw_text(0, 0, "Serial: -");
        TextPanel::clear(&mut display);
        assert!((0..PAGES).all(|p| page_is_empty(&display, p)));
    }

    #[test]
    fn test_flush_sends_window_then_pages() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.set_pixel(0, 0, true);
        display.set_pixel(127, 63, true);
        block_on(display.flush()).unwrap();

        let bus = display.release();
        assert_eq!(bus.writes.len(), 6 + PAGES);

        let window: Vec<u8> = bus.writes[..6].iter().map(|(_, b)| b[1]).collect();
        assert_eq!(window, [cmd::SET_COLUMN_ADDR, 0, 127, cmd::SET_PAGE_ADDR, 0, 7]);

        let pages = &bus.writes[6..];
        assert!(pages
            .iter()
            .all(|(_, b)| b.len() == WIDTH + 1 && b[0] == CONTROL_DATA));
        assert_eq!(pages[0].1[1], 0b0000_0001);
        assert_eq!(pages[7].1[WIDTH], 0b1000_0000);
    }

    #[test]
    fn test_bus_error() {
        let mut display = Ssd1306::new(MockI2c {
            fail: true,
            ..Default::default()
        });
        assert_eq!(
            block_on(display.init()),
            Err(Ssd1306Error::Bus(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address
            )))
        );
        assert!(block_on(display.flush()).is_err());
    }
}
