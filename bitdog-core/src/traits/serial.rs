//! Character input trait

/// Byte-oriented input stream with a bounded wait
#[allow(async_fn_in_trait)]
pub trait CharSource {
    /// Wait up to `timeout_us` microseconds for one byte
    ///
    /// Returns `None` on timeout or end of stream. Neither is an error.
    async fn poll_char(&mut self, timeout_us: u32) -> Option<u8>;
}
