//! Callback set that assembles parser events into an owned [`RespValue`].
//!
//! Open arrays are tracked on an explicit stack mirroring the parser's own,
//! so building a deeply nested value never recurses.

use crate::constants::MAX_PREALLOCATED_ELEMENTS;
use crate::enums::Flow;
use crate::models::frames::protocol_value::ProtocolValue;
use crate::models::frames::resp_value::RespValue;
use crate::traits::parser_callbacks::ParserCallbacks;

#[derive(Debug)]
struct OpenArray {
    expected: u64,
    items: Vec<RespValue>,
}

/// Copies decoded values into a [`RespValue`] tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    open: Vec<OpenArray>,
    /// Payload of the string currently streaming in.
    bulk: Vec<u8>,
    complete: Option<RespValue>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the last completed value, if any.
    pub fn take(&mut self) -> Option<RespValue> {
        self.complete.take()
    }

    /// Drops any partially built value.
    pub fn clear(&mut self) {
        self.open.clear();
        self.bulk.clear();
        self.complete = None;
    }

    /// Attaches a finished value to its parent, closing every array it fills.
    fn finish(&mut self, mut value: RespValue) {
        loop {
            let Some(parent) = self.open.last_mut() else {
                self.complete = Some(value);
                return;
            };
            parent.items.push(value);
            if (parent.items.len() as u64) < parent.expected {
                return;
            }
            match self.open.pop() {
                Some(done) => value = RespValue::Array(done.items),
                None => return,
            }
        }
    }
}

impl ParserCallbacks for TreeBuilder {
    type Data = ();

    fn on_nil(&mut self, _value: &mut ProtocolValue) -> Flow {
        self.finish(RespValue::Nil);
        Flow::Continue
    }

    fn on_array(&mut self, _value: &mut ProtocolValue, len: u64) -> Flow {
        if len == 0 {
            self.finish(RespValue::Array(Vec::new()));
        } else {
            let reserve = usize::try_from(len)
                .unwrap_or(usize::MAX)
                .min(MAX_PREALLOCATED_ELEMENTS);
            self.open.push(OpenArray {
                expected: len,
                items: Vec::with_capacity(reserve),
            });
        }
        Flow::Continue
    }

    fn on_integer(&mut self, _value: &mut ProtocolValue, n: i64) -> Flow {
        self.finish(RespValue::Integer(n));
        Flow::Continue
    }

    fn on_string(&mut self, value: &mut ProtocolValue, chunk: &[u8]) -> Flow {
        self.bulk.extend_from_slice(chunk);
        if value.remaining() == 0 {
            let bulk = std::mem::take(&mut self.bulk);
            self.finish(RespValue::Bulk(bulk));
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decoders::resp::parser::RespParser;

    fn build(input: &[u8]) -> Option<RespValue> {
        let mut parser = RespParser::new(TreeBuilder::new());
        let complete = parser.execute(input).is_complete();
        assert!(complete, "incomplete: {:?}", input);
        parser.callbacks_mut().take()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(build(b":-7\r\n"), Some(RespValue::Integer(-7)));
        assert_eq!(build(b"$2\r\nhi\r\n"), Some(RespValue::Bulk(b"hi".to_vec())));
        assert_eq!(build(b"$0\r\n\r\n"), Some(RespValue::Bulk(Vec::new())));
        assert_eq!(build(b"$-1\r\n"), Some(RespValue::Nil));
    }

    #[test]
    fn test_nested_arrays() {
        let input = b"*3\r\n*2\r\n:1\r\n*0\r\n$3\r\nabc\r\n*-1\r\n";
        assert_eq!(
            build(input),
            Some(RespValue::Array(vec![
                RespValue::Array(vec![RespValue::Integer(1), RespValue::Array(Vec::new())]),
                RespValue::Bulk(b"abc".to_vec()),
                RespValue::Nil,
            ]))
        );
    }

    #[test]
    fn test_string_chunks_are_joined() {
        let mut parser = RespParser::new(TreeBuilder::new());
        for chunk in [&b"*1\r\n$11\r\nhel"[..], b"lo w", b"orld\r", b"\n"] {
            parser.execute(chunk);
        }
        assert_eq!(
            parser.callbacks_mut().take(),
            Some(RespValue::Array(vec![RespValue::Bulk(b"hello world".to_vec())]))
        );
    }

    #[test]
    fn test_clear_discards_partial_value() {
        let mut builder = TreeBuilder::new();
        let mut record = ProtocolValue::default();
        builder.on_array(&mut record, 2);
        builder.on_integer(&mut record, 1);
        builder.clear();
        builder.on_integer(&mut record, 9);
        assert_eq!(builder.take(), Some(RespValue::Integer(9)));
    }
}
