//! PIO-based WS2812 driver
//!
//! Uses RP2040's Programmable I/O to generate the 800 kHz single-wire
//! WS2812 waveform. The CPU pushes one 32-bit word per pixel; the state
//! machine shifts out the top 24 bits MSB first.
//!
//! # Bit timing
//!
//! Each bit takes `T1 + T2 + T3` PIO cycles:
//!
//! - `T1` cycles high (start of every bit)
//! - `T2` cycles high for a 1, low for a 0
//! - `T3` cycles low
//!
//! The clock divider is chosen so that one bit lasts 1.25 µs.

use bitdog_core::traits::WordSink;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use embassy_time::Timer;
use fixed::types::U24F8;

/// WS2812 bit rate in Hz
pub const WS2812_FREQ_HZ: u32 = 800_000;

/// PIO cycles per phase of one bit
const T1: u32 = 2;
const T2: u32 = 5;
const T3: u32 = 3;

/// PIO cycles per transmitted bit
pub const CYCLES_PER_BIT: u32 = T1 + T2 + T3;

/// Low time that latches a frame (datasheet minimum is 50 µs)
pub const RESET_DELAY_US: u64 = 55;

/// Bits shifted out per pixel word
const BITS_PER_PIXEL: u8 = 24;

/// Calculate the PIO clock divider for a given system clock
///
/// The state machine must run at `WS2812_FREQ_HZ * CYCLES_PER_BIT`, so:
/// divider = SYS_CLK / (800 kHz * 10)
///
/// Returns (integer_part, fractional_part) for the 16.8 fixed-point divider.
pub fn calc_clock_divider(sys_clk_hz: u32) -> (u16, u8) {
    let pio_hz = WS2812_FREQ_HZ as u64 * CYCLES_PER_BIT as u64;
    let divider_x256 = (sys_clk_hz as u64 * 256) / pio_hz;

    // The divider cannot go below 1.0
    let divider_x256 = divider_x256.clamp(256, 0xFFFF_FF);

    let int_part = (divider_x256 / 256) as u16;
    let frac_part = (divider_x256 % 256) as u8;

    (int_part, frac_part)
}

/// PIO WS2812 driver
///
/// Owns one state machine. Words are fed through the TX FIFO, which is
/// joined to 8 entries deep.
pub struct PioWs2812<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWs2812<'d, PIO, SM> {
    /// Create a new WS2812 driver
    ///
    /// # Arguments
    /// * `common` - PIO common resources (for loading program)
    /// * `sm` - State machine to use
    /// * `pin` - Data output pin (must be PIO-capable)
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        // Side-set drives the data line; delays are T3-1, T1-1, T2-1 and T2-1
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "    out x, 1       side 0 [2]",
            "    jmp !x do_zero side 1 [1]",
            "    jmp bitloop    side 1 [4]",
            "do_zero:",
            "    nop            side 0 [4]",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);
        let out_pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&out_pin]);

        let (int_div, frac_div) = calc_clock_divider(clk_sys_freq());
        cfg.clock_divider = U24F8::from_bits(((int_div as u32) << 8) | (frac_div as u32));

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_PIXEL,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&out_pin]);
        sm.set_enable(true);

        Self { sm }
    }
}

impl<'d, PIO: Instance, const SM: usize> WordSink for PioWs2812<'d, PIO, SM> {
    async fn push_word(&mut self, word: u32) {
        self.sm.tx().wait_push(word).await;
    }

    async fn end_frame(&mut self) {
        Timer::after_micros(RESET_DELAY_US).await;
    }
}
