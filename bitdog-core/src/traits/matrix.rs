//! Word sink trait for addressable LED strips

/// Destination for encoded LED color words
///
/// Implementations feed a hardware transmit queue (PIO FIFO, SPI, ...).
#[allow(async_fn_in_trait)]
pub trait WordSink {
    /// Enqueue one encoded color word
    ///
    /// Suspends the caller until the transmit queue accepts the word.
    async fn push_word(&mut self, word: u32);

    /// Called after the last word of a frame
    ///
    /// WS2812 strips latch once the data line stays low long enough;
    /// sinks that need to enforce that gap do it here.
    async fn end_frame(&mut self) {}
}
