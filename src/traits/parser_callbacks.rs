//! # Parser Callbacks
//!
//! Event interface through which [`RespParser`](crate::models::decoders::resp::parser::RespParser)
//! reports decoded values.
//!
//! - `on_nil`: a nil bulk string or nil array.
//! - `on_array`: an array header, before any of its children.
//! - `on_integer`: an integer value.
//! - `on_string`: one chunk of bulk string payload. A string arriving over
//!   several `execute` calls yields several chunks; the record's `remaining()`
//!   is zero on the last one.
//!
//! Every handler has a default that returns [`Flow::Continue`], so implementors
//! only override what they need. Returning [`Flow::Stop`] aborts the current
//! call with [`RespError::AbortedByHandler`](crate::error::RespError), after
//! which the parser must be reset.

use crate::enums::Flow;
use crate::models::frames::protocol_value::ProtocolValue;

/// Receives decode events from a RESP parser.
///
/// String chunks borrow the buffer passed to that `execute` call and must be
/// copied if they are needed after the handler returns.
pub trait ParserCallbacks {
    /// Application data attached to each value record.
    type Data: Default;

    fn on_nil(&mut self, value: &mut ProtocolValue<Self::Data>) -> Flow {
        let _ = value;
        Flow::Continue
    }

    fn on_array(&mut self, value: &mut ProtocolValue<Self::Data>, len: u64) -> Flow {
        let _ = (value, len);
        Flow::Continue
    }

    fn on_integer(&mut self, value: &mut ProtocolValue<Self::Data>, n: i64) -> Flow {
        let _ = (value, n);
        Flow::Continue
    }

    fn on_string(&mut self, value: &mut ProtocolValue<Self::Data>, chunk: &[u8]) -> Flow {
        let _ = (value, chunk);
        Flow::Continue
    }
}

/// Ignores every event. Useful when only the completed root record matters.
impl ParserCallbacks for () {
    type Data = ();
}
