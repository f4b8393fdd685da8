/// Abstraction over a byte buffer for frame-based streaming.
///
/// This trait defines the interface for the rolling buffer used by
/// [`FramedByteStream`](crate::models::streams::framed_byte_stream::FramedByteStream)
/// to hold bytes that have arrived but not yet formed a complete frame.
///
/// It is implemented for `Vec<u8>`, but can also be implemented for alternative
/// byte buffer types (e.g., Tokio's `BytesMut`) where the byte-level IO stack is
/// fixed or externally controlled.
///
/// Implementors must support the following standard `Vec` operations:
/// - Draining consumed bytes
/// - Appending new bytes
/// - Querying the current buffer length
/// - Accessing the internal byte slice
pub trait StreamBuffer: AsRef<[u8]> + Default + 'static {
    /// Create with given capacity.
    fn with_capacity(n: usize) -> Self;

    /// Remove the specified range from the front of the buffer.
    fn drain(&mut self, range: std::ops::Range<usize>);
    /// Current length (in bytes).
    fn len(&self) -> usize;
    /// Whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Append bytes from a slice.
    fn extend_from_slice(&mut self, data: &[u8]);
}

impl StreamBuffer for Vec<u8> {
    fn with_capacity(n: usize) -> Self {
        Vec::with_capacity(n)
    }

    fn drain(&mut self, range: std::ops::Range<usize>) {
        // Call Vec::<T>::drain, ignore the returned Drain iterator
        Vec::<u8>::drain(self, range);
    }

    fn len(&self) -> usize {
        Vec::<u8>::len(self)
    }

    fn extend_from_slice(&mut self, data: &[u8]) {
        Vec::<u8>::extend_from_slice(self, data)
    }
}
