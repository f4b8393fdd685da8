//! # Test Helpers - *Recording callbacks*
//!
//! A [`ParserCallbacks`] implementation that records every event it sees,
//! optionally stopping the parser at a chosen event.

use crate::enums::Flow;
use crate::models::frames::protocol_value::ProtocolValue;
use crate::traits::parser_callbacks::ParserCallbacks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Nil,
    Array(u64),
    Integer(i64),
    Chunk(Vec<u8>),
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub events: Vec<Event>,
    /// `remaining()` of the string record at each chunk.
    pub remaining_seen: Vec<u64>,
    /// Index of the event to answer with `Flow::Stop`.
    pub stop_at: Option<usize>,
}

impl Recorder {
    pub fn stop_at(index: usize) -> Self {
        Self {
            stop_at: Some(index),
            ..Self::default()
        }
    }

    fn record(&mut self, event: Event) -> Flow {
        let index = self.events.len();
        self.events.push(event);
        if self.stop_at == Some(index) {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}

impl ParserCallbacks for Recorder {
    type Data = ();

    fn on_nil(&mut self, _value: &mut ProtocolValue) -> Flow {
        self.record(Event::Nil)
    }

    fn on_array(&mut self, _value: &mut ProtocolValue, len: u64) -> Flow {
        self.record(Event::Array(len))
    }

    fn on_integer(&mut self, _value: &mut ProtocolValue, n: i64) -> Flow {
        self.record(Event::Integer(n))
    }

    fn on_string(&mut self, value: &mut ProtocolValue, chunk: &[u8]) -> Flow {
        self.remaining_seen.push(value.remaining());
        self.record(Event::Chunk(chunk.to_vec()))
    }
}
