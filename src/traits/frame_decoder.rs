//! Generic frame decoding infrastructure.
//!
//! For implementing minimally-allocating, incremental frame decoders over arbitrary byte streams.
//!
//! In this context, a frame is one complete RESP message: a scalar, or an array
//! together with all of its nested values.
//!
//! A `FrameDecoder` is responsible for detecting protocol frame boundaries within a buffer slice
//! and reporting when a full logical frame has been received.
//
//  Usage:
//  - Call `decode(&mut self, &[u8])` repeatedly as more bytes arrive.
//  - On `Frame { ... }`, consume the reported number of bytes and process the returned frame.
//  - On `NeedMore`, retain all bytes in the buffer and supply more data.
//  - On `Err`, treat as protocol violation or irrecoverable stream error.

use std::io;
use crate::enums::DecodeResult;

/// A trait for pull-based frame decoders.
///
/// The buffer passed to `decode` always starts at the first byte of the frame
/// in progress; bytes are only removed from it after a `Frame` result.
/// Decoders may remember how much of that prefix they have already inspected.
///
/// ### Contract
/// - The decoder musn't mutate or take ownership of the input buffer.
/// - It musn't remove bytes itself—return `consumed`, the caller will drop them.
/// - After returning `Err` it must be ready to decode a fresh stream.
pub trait FrameDecoder {
    /// The type of frame yielded by this decoder.
    type Frame;

    /// Attempt to decode a complete frame from the start of `buf`.
    ///
    /// Return:
    /// - `Ok(Frame { frame, consumed })` if a full frame is present. Caller removes `consumed` bytes.
    /// - `Ok(NeedMore)` if more bytes are required; buffer remains unchanged.
    /// - `Err` if the protocol is violated, or an unrecoverable error is detected.
    fn decode(&mut self, buf: &[u8]) -> io::Result<DecodeResult<Self::Frame>>;
}
