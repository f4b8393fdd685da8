use futures_core::Stream;
use std::io;

/// Generalised trait for any asynchronous, chunked byte stream of the given buffer type.
///
/// Because it is (only) a set of bounds, one can plug in a compliant type without dynamic dispatch.
///
/// Implemented for any `Stream<Item=Result<B, io::Error>>` + Send + Unpin.
pub trait GenByteStream<B>: Stream<Item = Result<B, io::Error>> + Send + Unpin {}
impl<T, B> GenByteStream<B> for T where T: Stream<Item = Result<B, io::Error>> + Send + Unpin {}
