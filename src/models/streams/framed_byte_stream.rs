//! # Generic async framed byte stream
//!
//! Adapts any chunked byte source into a stream of protocol frames using a
//! user-supplied [`FrameDecoder`].
//!
//! - Works with any `GenByteStream<B>` (e.g., network/file sources).
//! - Buffers partial input and yields complete frames as soon as available.
//! - Propagates protocol errors; detects truncated frames at EOF.

use futures_core::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::constants::DEFAULT_FRAME_BUFFER_CAPACITY;
use crate::enums::DecodeResult;
use crate::models::decoders::resp::frame_decoder::RespFrameDecoder;
use crate::traits::byte_stream::GenByteStream;
use crate::traits::frame_decoder::FrameDecoder;
use crate::traits::stream_buffer::StreamBuffer;

/// Asynchronous framed byte stream adapter for binary protocols.
///
/// Converts a chunked byte source (`GenByteStream`) into a stream of
/// protocol-level frames using a user-supplied [`FrameDecoder`].
///
/// ## Behaviour
/// - Decoder output must follow [`DecodeResult`] semantics.
/// - Buffer is only drained after a successful frame decode.
/// - Several frames in one chunk are yielded one at a time before reading again.
/// - On EOF, any remaining bytes in the buffer are treated as a truncated frame and error.
///
/// ## Errors
/// - Protocol errors or truncated buffers result in `io::Error`. After a
///   protocol error the buffer is discarded and decoding restarts with the
///   next chunk.
pub struct FramedByteStream<S, D, B>
where
    S: GenByteStream<B>,
    D: FrameDecoder,
    B: StreamBuffer,
{
    /// The underlying byte source.
    pub(crate) inner: S,
    /// The stateful frame decoder.
    decoder: D,
    /// Rolling internal buffer holding unread/partial bytes.
    buf: B,
}

impl<S, D, B> FramedByteStream<S, D, B>
where
    S: GenByteStream<B>,
    D: FrameDecoder,
    B: StreamBuffer,
{
    /// Create a new framed byte stream with the specified decoder and buffer capacity.
    pub fn new(stream: S, decoder: D, initial_capacity: usize) -> Self {
        Self {
            inner: stream,
            decoder,
            buf: B::with_capacity(initial_capacity),
        }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Bytes received but not yet part of a yielded frame.
    pub fn pending_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> FramedByteStream<S, RespFrameDecoder, B>
where
    S: GenByteStream<B>,
    B: StreamBuffer,
{
    /// RESP message stream with the default decoder and buffer capacity.
    pub fn resp(stream: S) -> Self {
        Self::new(stream, RespFrameDecoder::new(), DEFAULT_FRAME_BUFFER_CAPACITY)
    }
}

/// Implements `Stream` to yield decoded protocol frames from a chunked byte source.
impl<S, D, B> Stream for FramedByteStream<S, D, B>
where
    S: GenByteStream<B>,
    D: FrameDecoder + Unpin,
    B: StreamBuffer + Unpin,
{
    type Item = Result<D::Frame, io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let me = self.get_mut();

        loop {
            // Attempt to extract a frame from what is already buffered.
            if !me.buf.is_empty() {
                match me.decoder.decode(me.buf.as_ref()) {
                    Ok(DecodeResult::Frame { frame, consumed }) => {
                        // Remove consumed bytes from the buffer.
                        me.buf.drain(0..consumed);
                        return Poll::Ready(Some(Ok(frame)));
                    }
                    Ok(DecodeResult::NeedMore) => {
                        // Not enough bytes for a frame—read more data.
                    }
                    Err(e) => {
                        me.buf = B::default();
                        return Poll::Ready(Some(Err(e)));
                    }
                }
            }

            // Fetch the next chunk from the underlying byte stream.
            match Pin::new(&mut me.inner).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    me.buf.extend_from_slice(chunk.as_ref());
                    continue; // Retry decoding with more data.
                }
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => {
                    // End-of-stream: if buffer still contains data, it's a protocol error.
                    if me.buf.is_empty() {
                        return Poll::Ready(None);
                    } else {
                        me.buf = B::default();
                        return Poll::Ready(Some(Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "truncated frame at end of stream",
                        ))));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frames::resp_value::RespValue;
    use futures_util::StreamExt;

    fn chunks(parts: &[&[u8]]) -> Vec<io::Result<Vec<u8>>> {
        parts.iter().map(|p| Ok(p.to_vec())).collect()
    }

    #[tokio::test]
    async fn test_resp_stream() {
        let source = futures_util::stream::iter(chunks(&[
            &b"*2\r\n:1"[..],
            b"\r\n$5\r\nhel",
            b"lo\r\n:7\r\n$-1\r\n",
        ]));
        let mut stream = FramedByteStream::<_, _, Vec<u8>>::resp(source);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(
            first,
            RespValue::Array(vec![RespValue::Integer(1), RespValue::Bulk(b"hello".to_vec())])
        );
        assert_eq!(stream.next().await.unwrap().unwrap(), RespValue::Integer(7));
        assert_eq!(stream.next().await.unwrap().unwrap(), RespValue::Nil);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_truncated_frame_at_eof() {
        let source = futures_util::stream::iter(chunks(&[&b":1\r\n"[..], b"$4\r\nab"]));
        let mut stream: FramedByteStream<_, _, Vec<u8>> =
            FramedByteStream::new(source, RespFrameDecoder::new(), 64);

        assert_eq!(stream.next().await.unwrap().unwrap(), RespValue::Integer(1));
        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_protocol_error_is_reported() {
        let source = futures_util::stream::iter(chunks(&[&b"-ERR oops\r\n"[..]]));
        let mut stream: FramedByteStream<_, _, Vec<u8>> =
            FramedByteStream::new(source, RespFrameDecoder::new(), 64);

        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(stream.pending_bytes().is_empty());
        assert!(stream.next().await.is_none());
    }
}
