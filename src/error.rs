//! # Decode Errors
//!
//! Error type for the RESP parser.
//!
//! Every variant is terminal for the parser instance that raised it: there is
//! no resynchronisation inside a corrupt stream, and the caller must `reset()`
//! before feeding more data. Offsets are positions in the logical message
//! stream, counted across `execute` calls.

use std::{error, fmt, io};

use crate::enums::ValueType;
use crate::utils::EscapedByte;

/// Unified error type for RESP decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespError {
    /// Unknown tag byte, bytes outside the integer grammar, or a terminator
    /// that is not exactly `\r\n`.
    MalformedHeader { offset: u64, byte: u8 },

    /// Decimal literal outside the signed 64-bit range.
    IntegerOverflow { offset: u64 },

    /// Array nesting needs more value records than the parser was built with.
    NestingTooDeep { capacity: usize },

    /// Simple string or error reply encountered.
    UnsupportedType(ValueType),

    /// A callback returned `Flow::Stop`.
    AbortedByHandler { offset: u64 },
}

impl fmt::Display for RespError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespError::MalformedHeader { offset, byte } => write!(
                f,
                "Malformed header: unexpected byte '{}' at offset {}",
                EscapedByte(*byte),
                offset
            ),
            RespError::IntegerOverflow { offset } => {
                write!(f, "Integer overflow at offset {}", offset)
            }
            RespError::NestingTooDeep { capacity } => {
                write!(f, "Array nesting exceeds stack capacity of {}", capacity)
            }
            RespError::UnsupportedType(ty) => write!(
                f,
                "Unsupported type: {:?} ('{}') values cannot be decoded",
                ty,
                EscapedByte(ty.tag())
            ),
            RespError::AbortedByHandler { offset } => {
                write!(f, "Decoding aborted by handler at offset {}", offset)
            }
        }
    }
}

impl error::Error for RespError {}

// Conversions for error handling

impl From<RespError> for io::Error {
    fn from(e: RespError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
