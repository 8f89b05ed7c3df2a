//! UART character source
//!
//! Wraps the receive half of a buffered UART and turns it into a
//! bounded single-byte poll. Timeouts and line errors both read as
//! "no character".

use bitdog_core::traits::CharSource;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

/// Buffered UART receive half as a `CharSource`
pub struct UartCharSource {
    rx: BufferedUartRx,
}

impl UartCharSource {
    /// Wrap a buffered UART receiver
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }

    /// Release the UART receiver
    pub fn release(self) -> BufferedUartRx {
        self.rx
    }
}

impl CharSource for UartCharSource {
    async fn poll_char(&mut self, timeout_us: u32) -> Option<u8> {
        let mut byte = [0u8; 1];
        let timeout = Duration::from_micros(timeout_us as u64);

        match with_timeout(timeout, self.rx.read(&mut byte)).await {
            Ok(Ok(1)) => Some(byte[0]),
            Ok(Ok(_)) => None,
            Ok(Err(_e)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("UART read error: {:?}", _e);
                None
            }
            Err(_) => None,
        }
    }
}
