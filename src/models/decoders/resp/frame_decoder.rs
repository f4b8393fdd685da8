//! [`FrameDecoder`] over the incremental RESP parser.
//!
//! The framing layer hands the decoder its whole rolling buffer on every call,
//! starting at the first byte of the message in progress. The parser is
//! stateful, so only the bytes past what it has already consumed are fed to it.

use std::io;

use tracing::trace;

use crate::enums::DecodeResult;
use crate::models::decoders::resp::parser::{ParserConfig, RespParser};
use crate::models::decoders::resp::tree_builder::TreeBuilder;
use crate::models::frames::resp_value::RespValue;
use crate::traits::frame_decoder::FrameDecoder;

/// Decodes whole RESP messages into owned [`RespValue`] frames.
pub struct RespFrameDecoder {
    parser: RespParser<TreeBuilder>,
    /// Bytes of the current frame already fed to the parser.
    fed: usize,
}

impl RespFrameDecoder {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: RespParser::with_config(TreeBuilder::new(), config),
            fed: 0,
        }
    }

    /// Drops any partial frame.
    pub fn reset(&mut self) {
        self.parser.reset();
        self.parser.callbacks_mut().clear();
        self.fed = 0;
    }
}

impl Default for RespFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder for RespFrameDecoder {
    type Frame = RespValue;

    fn decode(&mut self, buf: &[u8]) -> io::Result<DecodeResult<Self::Frame>> {
        let Some(fresh) = buf.get(self.fed..) else {
            self.reset();
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "buffer is shorter than the bytes already decoded",
            ));
        };

        let step = self
            .parser
            .decode(fresh)
            .map(|exec| (exec.consumed, exec.is_complete()));
        let (consumed, complete) = match step {
            Ok(step) => step,
            Err(e) => {
                self.reset();
                return Err(e.into());
            }
        };

        if !complete {
            self.fed += consumed;
            return Ok(DecodeResult::NeedMore);
        }

        let consumed = self.fed + consumed;
        self.fed = 0;
        let frame = self.parser.callbacks_mut().take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "parser completed without a value")
        })?;
        trace!(consumed, "frame decoded");
        Ok(DecodeResult::Frame { frame, consumed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RespError;

    #[test]
    fn test_frame_across_calls() {
        let mut decoder = RespFrameDecoder::new();
        let full = b"*2\r\n$3\r\nfoo\r\n:9\r\n";

        let mut buf = Vec::new();
        let mut frames = Vec::new();
        for &b in full.iter() {
            buf.push(b);
            match decoder.decode(&buf).unwrap() {
                DecodeResult::Frame { frame, consumed } => {
                    buf.drain(..consumed);
                    frames.push((frame, consumed));
                }
                DecodeResult::NeedMore => {}
            }
        }

        assert!(buf.is_empty());
        assert_eq!(
            frames,
            vec![(
                RespValue::Array(vec![RespValue::Bulk(b"foo".to_vec()), RespValue::Integer(9)]),
                full.len()
            )]
        );
    }

    #[test]
    fn test_pipelined_frames() {
        let mut decoder = RespFrameDecoder::new();
        let mut buf = b":1\r\n$-1\r\n:2".to_vec();

        let mut frames = Vec::new();
        while let DecodeResult::Frame { frame, consumed } = decoder.decode(&buf).unwrap() {
            buf.drain(..consumed);
            frames.push(frame);
        }
        assert_eq!(frames, vec![RespValue::Integer(1), RespValue::Nil]);
        assert_eq!(buf, b":2");

        buf.extend_from_slice(b"\r\n");
        assert_eq!(
            decoder.decode(&buf).unwrap(),
            DecodeResult::Frame {
                frame: RespValue::Integer(2),
                consumed: 4
            }
        );
    }

    #[test]
    fn test_error_resets_decoder() {
        let mut decoder = RespFrameDecoder::new();
        let err = decoder.decode(b"*1\r\n+OK\r\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<RespError>());
        assert!(matches!(inner, Some(RespError::UnsupportedType(_))));

        assert_eq!(
            decoder.decode(b":3\r\n").unwrap(),
            DecodeResult::Frame {
                frame: RespValue::Integer(3),
                consumed: 4
            }
        );
    }

    #[test]
    fn test_shrunken_buffer_is_rejected() {
        let mut decoder = RespFrameDecoder::new();
        assert_eq!(decoder.decode(b"$5\r\nab").unwrap(), DecodeResult::NeedMore);
        let err = decoder.decode(b"$5").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
