use crate::constants::{TAG_ARRAY, TAG_BULK_STRING, TAG_ERROR, TAG_INTEGER, TAG_STATUS};

/// The outcome of a single frame decoder step.
///
/// Communicates whether a full frame has been detected or whether more bytes are
/// required. Protocol errors travel separately through `io::Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeResult<F> {
    /// A complete logical frame was detected.
    ///
    /// - `frame`: The decoded frame of the target type.
    /// - `consumed`: The number of bytes from the buffer that should be discarded.
    Frame { frame: F, consumed: usize },

    /// The decoder requires more bytes to detect a full frame.
    ///
    /// No bytes should be removed from the buffer.
    NeedMore,
}

/// RESP value kinds, selected by the leading tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `$` bulk string.
    String,
    /// `*` array of nested values.
    Array,
    /// `:` signed 64-bit integer.
    Integer,
    /// `+` simple string. Recognised but not decodable.
    Status,
    /// `-` error reply. Recognised but not decodable.
    Error,
}

impl ValueType {
    /// Maps a tag byte onto its value kind.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_BULK_STRING => Some(ValueType::String),
            TAG_ARRAY => Some(ValueType::Array),
            TAG_INTEGER => Some(ValueType::Integer),
            TAG_STATUS => Some(ValueType::Status),
            TAG_ERROR => Some(ValueType::Error),
            _ => None,
        }
    }

    /// The tag byte that introduces this kind on the wire.
    pub fn tag(self) -> u8 {
        match self {
            ValueType::String => TAG_BULK_STRING,
            ValueType::Array => TAG_ARRAY,
            ValueType::Integer => TAG_INTEGER,
            ValueType::Status => TAG_STATUS,
            ValueType::Error => TAG_ERROR,
        }
    }

    /// Whether the parser can decode values of this kind.
    pub fn is_supported(self) -> bool {
        !matches!(self, ValueType::Status | ValueType::Error)
    }
}

/// RESP parser state machine.
///
/// One state per byte-level decision. The integer states belong to the
/// header scanner; `Bulk*` states stream a string payload and its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No message in progress. The next byte starts a new root value.
    Idle,

    /// Reading the one-byte type tag of the current value.
    TypeChar,

    /// First byte of the header integer: sign, `0`, or a leading digit.
    IntegerStart,

    /// After `+`, expecting a nonzero leading digit.
    IntegerPos19,

    /// Accumulating digits of a positive integer.
    IntegerPos09,

    /// After `-`, expecting a nonzero leading digit.
    IntegerNeg19,

    /// Accumulating digits of a negative integer.
    IntegerNeg09,

    /// After a lone `0`, expecting `\r`.
    IntegerCr,

    /// Header terminator `\n`. Completes the header.
    IntegerLf,

    /// Streaming bulk string payload bytes.
    Bulk,

    /// Payload done, expecting `\r`.
    BulkCr,

    /// Payload done, expecting `\n`. Completes the string.
    BulkLf,
}

impl ParserState {
    /// Whether the integer scanner owns this state.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ParserState::IntegerStart
                | ParserState::IntegerPos19
                | ParserState::IntegerPos09
                | ParserState::IntegerNeg19
                | ParserState::IntegerNeg09
                | ParserState::IntegerCr
                | ParserState::IntegerLf
        )
    }
}

/// Signal returned by parser callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep decoding.
    #[default]
    Continue,

    /// Abort the current `execute` call. The parser must be reset before reuse.
    Stop,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}
