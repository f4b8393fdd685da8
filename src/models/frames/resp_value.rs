use std::fmt;

use crate::utils::EscapedBytes;

/// Owned RESP value, as produced by the frame decoder.
///
/// Unlike [`ProtocolValue`](crate::models::frames::protocol_value::ProtocolValue),
/// which only records positions, this holds copies of every payload so it can
/// outlive the buffers it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// `$-1\r\n` or `*-1\r\n`.
    Nil,
    Integer(i64),
    Bulk(Vec<u8>),
    Array(Vec<RespValue>),
}

impl RespValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RespValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RespValue::Bulk(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[RespValue]> {
        match self {
            RespValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, RespValue::Nil)
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::Nil => f.write_str("(nil)"),
            RespValue::Integer(n) => write!(f, "(integer) {}", n),
            RespValue::Bulk(b) => write!(f, "\"{}\"", EscapedBytes::new(b, 64)),
            RespValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
