//! Board configuration
//!
//! Pin assignments and timing for the BitDogLab board. Everything is
//! fixed at compile time; there is no runtime configuration surface.

/// Minimum time between two accepted edges of the same button (µs)
pub const DEBOUNCE_US: u32 = 300_000;

/// Upper bound on each serial poll of the event loop (µs)
pub const INPUT_POLL_TIMEOUT_US: u32 = 10_000;

/// Serial baud rate
pub const UART_BAUDRATE: u32 = 115_200;

/// OLED I2C bus frequency (Hz)
pub const DISPLAY_I2C_HZ: u32 = 100_000;

/// Timing parameters shared by the button handlers and the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Debounce window in microseconds
    pub debounce_us: u32,
    /// Serial poll timeout in microseconds
    pub input_poll_timeout_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_us: DEBOUNCE_US,
            input_poll_timeout_us: INPUT_POLL_TIMEOUT_US,
        }
    }
}

/// GPIO assignments on the BitDogLab board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// WS2812 matrix data line
    pub matrix_data: u8,
    /// Green channel of the RGB LED
    pub led_green: u8,
    /// Blue channel of the RGB LED
    pub led_blue: u8,
    /// Button A (active low, pulled up)
    pub button_a: u8,
    /// Button B (active low, pulled up)
    pub button_b: u8,
    /// OLED I2C data
    pub i2c_sda: u8,
    /// OLED I2C clock
    pub i2c_scl: u8,
    /// Serial transmit
    pub uart_tx: u8,
    /// Serial receive
    pub uart_rx: u8,
}

impl Default for BoardPins {
    fn default() -> Self {
        Self {
            matrix_data: 7,
            led_green: 11,
            led_blue: 12,
            button_a: 5,
            button_b: 6,
            i2c_sda: 14,
            i2c_scl: 15,
            uart_tx: 0,
            uart_rx: 1,
        }
    }
}

impl BoardPins {
    /// All assigned GPIO numbers
    pub fn all(&self) -> [u8; 9] {
        [
            self.matrix_data,
            self.led_green,
            self.led_blue,
            self.button_a,
            self.button_b,
            self.i2c_sda,
            self.i2c_scl,
            self.uart_tx,
            self.uart_rx,
        ]
    }

    /// True if no GPIO is assigned twice
    pub fn is_unique(&self) -> bool {
        let pins = self.all();
        pins.iter()
            .enumerate()
            .all(|(i, p)| !pins[i + 1..].contains(p))
    }
}
