//! # Incremental RESP parser
//!
//! Byte-at-a-time state machine over an explicit stack of [`ProtocolValue`]
//! records. The stack holds the path from the root value down to the value
//! currently being read; nested arrays push records instead of recursing, so
//! nesting depth is bounded by the configured stack capacity.
//!
//! ## Usage
//! - Call [`RespParser::execute`] with each chunk of bytes as it arrives.
//! - `consumed == buf.len()` with no value means more data is needed.
//! - A completed value is returned together with the bytes it used. Any
//!   trailing bytes belong to the next message and should be fed again.
//! - `consumed < buf.len()` with no value means the parser failed. Read the
//!   cause from [`RespParser::error`] and call [`RespParser::reset`].
//!
//! Payload bytes are never copied: string chunks handed to
//! [`ParserCallbacks::on_string`] borrow the caller's buffer.

use tracing::{debug, trace};

use crate::constants::{CRLF_LEN, CR, DEFAULT_STACK_CAPACITY, LF};
use crate::enums::{Flow, ParserState, ValueType};
use crate::error::RespError;
use crate::models::decoders::resp::integer::{IntegerScanner, Step};
use crate::models::frames::protocol_value::ProtocolValue;
use crate::traits::parser_callbacks::ParserCallbacks;

/// Construction-time parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of value records: the root plus one per open array.
    pub stack_capacity: usize,
}

impl ParserConfig {
    pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

/// Outcome of one `execute` call.
#[derive(Debug)]
pub struct Execution<'a, D> {
    /// Bytes of the input that were used.
    pub consumed: usize,
    /// Root record of the message completed during this call, if any.
    pub value: Option<&'a ProtocolValue<D>>,
}

impl<D> Execution<'_, D> {
    pub fn is_complete(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the call ended cleanly mid-message, having used all `len` bytes.
    pub fn needs_more(&self, len: usize) -> bool {
        self.value.is_none() && self.consumed == len
    }
}

/// How a call into the state machine ended.
enum Halt {
    /// Input exhausted mid-message.
    Exhausted,
    /// Root value finished.
    Complete,
    Failed(RespError),
}

/// Incremental, zero-copy RESP decoder.
///
/// One instance decodes one message at a time. Resume state (current state,
/// stack, stream offset and the integer accumulator) lives on the instance, so
/// a message may be split across any number of calls at any byte boundary.
pub struct RespParser<C: ParserCallbacks> {
    callbacks: C,
    stack: Vec<ProtocolValue<C::Data>>,
    capacity: usize,
    /// Index of the current record. Meaningless while `state` is `Idle`.
    top: usize,
    state: ParserState,
    /// Bytes read for the in-progress message.
    nread: u64,
    scanner: IntegerScanner,
    completed: bool,
    error: Option<RespError>,
}

impl<C: ParserCallbacks> RespParser<C> {
    /// Creates a parser with the default stack capacity.
    pub fn new(callbacks: C) -> Self {
        Self::with_config(callbacks, ParserConfig::default())
    }

    pub fn with_config(callbacks: C, config: ParserConfig) -> Self {
        let capacity = config.stack_capacity.max(1);
        Self {
            callbacks,
            stack: Vec::with_capacity(capacity.min(DEFAULT_STACK_CAPACITY)),
            capacity,
            top: 0,
            state: ParserState::Idle,
            nread: 0,
            scanner: IntegerScanner::default(),
            completed: false,
            error: None,
        }
    }

    /// Returns the parser to its ready state, discarding any partial message
    /// and any recorded error. Callbacks are kept.
    pub fn reset(&mut self) {
        self.top = 0;
        self.state = ParserState::Idle;
        self.nread = 0;
        self.scanner = IntegerScanner::default();
        self.completed = false;
        self.error = None;
    }

    /// Feeds a chunk of bytes. See the module docs for how to read the result.
    pub fn execute(&mut self, buf: &[u8]) -> Execution<'_, C::Data> {
        let (consumed, complete) = self.advance(buf);
        Execution {
            consumed,
            value: if complete { self.stack.first() } else { None },
        }
    }

    /// Like [`execute`](Self::execute), but surfaces failures as `Err`.
    pub fn decode(&mut self, buf: &[u8]) -> Result<Execution<'_, C::Data>, RespError> {
        let (consumed, complete) = self.advance(buf);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(Execution {
            consumed,
            value: if complete { self.stack.first() } else { None },
        })
    }

    /// The failure that stopped this parser, if any.
    pub fn error(&self) -> Option<&RespError> {
        self.error.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Root record of the most recently completed message. `None` while a
    /// message is in progress or after a failure.
    pub fn root(&self) -> Option<&ProtocolValue<C::Data>> {
        if self.completed && self.error.is_none() {
            self.stack.first()
        } else {
            None
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Index of the current record, or `None` between messages.
    pub fn depth(&self) -> Option<usize> {
        match self.state {
            ParserState::Idle => None,
            _ => Some(self.top),
        }
    }

    /// Bytes read so far for the in-progress message.
    pub fn nread(&self) -> u64 {
        self.nread
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    /// Runs the state machine and persists resume state. Returns the bytes
    /// consumed and whether a message completed.
    fn advance(&mut self, buf: &[u8]) -> (usize, bool) {
        if self.error.is_some() || buf.is_empty() {
            return (0, false);
        }

        if self.state == ParserState::Idle {
            self.open_slot(0, None);
            self.top = 0;
            self.nread = 0;
            self.state = ParserState::TypeChar;
            self.completed = false;
        }

        let (consumed, halt) = self.run(buf);
        match halt {
            Halt::Exhausted => {
                trace!(consumed, nread = self.nread, state = ?self.state, "input exhausted");
                (consumed, false)
            }
            Halt::Complete => {
                self.completed = true;
                trace!(
                    consumed,
                    length = self.stack[0].protocol_length,
                    "message complete"
                );
                (consumed, true)
            }
            Halt::Failed(err) => {
                debug!(consumed, state = ?self.state, error = %err, "decode failed");
                self.error = Some(err);
                (consumed, false)
            }
        }
    }

    fn run(&mut self, buf: &[u8]) -> (usize, Halt) {
        let end = buf.len();
        let mut pos = 0usize;
        let mut nread = self.nread;
        let mut state = self.state;
        let mut top = self.top;

        let halt = 'parse: loop {
            if pos >= end {
                break Halt::Exhausted;
            }
            let byte = buf[pos];

            // Each arm either moves to another state and continues, or falls
            // through with the current value complete, positioned on its final `\n`.
            match state {
                ParserState::TypeChar => {
                    let cur = &mut self.stack[top];
                    cur.protocol_offset = nread;
                    match ValueType::from_tag(byte) {
                        Some(ty) if ty.is_supported() => {
                            cur.value_type = Some(ty);
                            pos += 1;
                            nread += 1;
                            state = ParserState::IntegerStart;
                            continue;
                        }
                        Some(ty) => {
                            cur.value_type = Some(ty);
                            break Halt::Failed(RespError::UnsupportedType(ty));
                        }
                        None => {
                            break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                        }
                    }
                }

                ParserState::IntegerLf => {
                    if byte != LF {
                        break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                    }
                    let n = self.scanner.value();
                    let cur = &mut self.stack[top];
                    // header length, including this \n
                    cur.protocol_length = nread - cur.protocol_offset + 1;

                    let flow = match cur.value_type {
                        Some(ValueType::String) | Some(ValueType::Array) if n < 0 => {
                            cur.nil = true;
                            cur.remaining = 0;
                            trace!(offset = cur.protocol_offset, "nil");
                            self.callbacks.on_nil(cur)
                        }
                        Some(ValueType::String) => {
                            let len = n as u64;
                            cur.content_offset = nread + 1;
                            cur.content_length = len;
                            cur.protocol_length += len + CRLF_LEN;
                            cur.remaining = len;
                            pos += 1;
                            nread += 1;
                            state = ParserState::Bulk;
                            continue;
                        }
                        Some(ValueType::Array) => {
                            cur.remaining = n as u64;
                            trace!(offset = cur.protocol_offset, len = n, "array");
                            self.callbacks.on_array(cur, n as u64)
                        }
                        Some(ValueType::Integer) => {
                            cur.content_offset = cur.protocol_offset + 1;
                            // digits only, without the \r
                            cur.content_length = nread - cur.content_offset - 1;
                            trace!(offset = cur.protocol_offset, value = n, "integer");
                            self.callbacks.on_integer(cur, n)
                        }
                        _ => {
                            break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                        }
                    };
                    if flow.is_stop() {
                        break Halt::Failed(RespError::AbortedByHandler { offset: nread });
                    }
                }

                ParserState::Bulk => {
                    let cur = &mut self.stack[top];
                    let available = end - pos;

                    if cur.remaining <= available as u64 {
                        let len = cur.remaining as usize;
                        cur.remaining = 0;
                        let chunk = &buf[pos..pos + len];
                        if self.callbacks.on_string(cur, chunk) == Flow::Stop {
                            break Halt::Failed(RespError::AbortedByHandler { offset: nread });
                        }
                        pos += len;
                        nread += len as u64;
                        state = ParserState::BulkCr;
                        continue;
                    }

                    cur.remaining -= available as u64;
                    if self.callbacks.on_string(cur, &buf[pos..]) == Flow::Stop {
                        break Halt::Failed(RespError::AbortedByHandler { offset: nread });
                    }
                    pos = end;
                    nread += available as u64;
                    continue;
                }

                ParserState::BulkCr => {
                    if byte != CR {
                        break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                    }
                    pos += 1;
                    nread += 1;
                    state = ParserState::BulkLf;
                    continue;
                }

                ParserState::BulkLf => {
                    if byte != LF {
                        break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                    }
                }

                ParserState::Idle => {
                    // advance() always leaves Idle before running
                    break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                }

                s if s.is_integer() => match self.scanner.step(state, byte) {
                    Step::Next(next) => {
                        pos += 1;
                        nread += 1;
                        state = next;
                        continue;
                    }
                    Step::Malformed => {
                        break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                    }
                    Step::Overflow => {
                        break Halt::Failed(RespError::IntegerOverflow { offset: nread });
                    }
                },

                _ => {
                    break Halt::Failed(RespError::MalformedHeader { offset: nread, byte });
                }
            }

            // The value at `top` is complete. Unwind until an ancestor still
            // expects children, or the root itself is done.
            let mut finished = false;
            loop {
                let cur = &mut self.stack[top];
                if cur.value_type == Some(ValueType::Array) && cur.remaining > 0 {
                    let child = top + 1;
                    if child >= self.capacity {
                        break 'parse Halt::Failed(RespError::NestingTooDeep {
                            capacity: self.capacity,
                        });
                    }
                    cur.remaining -= 1;
                    self.open_slot(child, Some(top));
                    top = child;
                    break;
                }
                if top == 0 {
                    finished = true;
                    break;
                }
                let length = cur.protocol_length;
                top -= 1;
                self.stack[top].protocol_length += length;
            }

            // consume the value's final \n
            pos += 1;
            nread += 1;
            state = ParserState::TypeChar;

            if finished {
                state = ParserState::Idle;
                break Halt::Complete;
            }
        };

        self.nread = nread;
        self.state = state;
        self.top = top;
        (pos, halt)
    }

    /// Prepares stack slot `idx` for a new value, growing the stack on first use.
    fn open_slot(&mut self, idx: usize, parent: Option<usize>) {
        if idx < self.stack.len() {
            self.stack[idx].reset(parent);
        } else {
            self.stack.push(ProtocolValue::new(parent));
        }
    }
}

impl<C: ParserCallbacks + Default> Default for RespParser<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}
