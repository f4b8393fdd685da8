//! Fragmentation invariance.
//!
//! Feeds valid encodings to the parser split at every byte offset, and bulk
//! payloads in arbitrary chunk sizes, and checks the decoded structure and byte
//! counts match a single-call decode.

use respstream::{Flow, ParserCallbacks, ProtocolValue, RespParser, RespValue, TreeBuilder};

const MESSAGES: &[&[u8]] = &[
    b":0\r\n",
    b":-9223372036854775808\r\n",
    b"$-1\r\n",
    b"*-1\r\n",
    b"$0\r\n\r\n",
    b"$12\r\nhello\r\nworld\r\n",
    b"*0\r\n",
    b"*2\r\n:1\r\n:2\r\n",
    b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n",
    b"*2\r\n*2\r\n*1\r\n:+5\r\n$-1\r\n*0\r\n",
];

/// Feeds `chunks` in order. Returns the decoded tree and total bytes consumed.
fn decode_chunks(chunks: &[&[u8]]) -> (RespValue, usize, u64) {
    let mut parser = RespParser::new(TreeBuilder::new());
    let mut consumed = 0;
    let mut length = None;
    for (i, chunk) in chunks.iter().enumerate() {
        let exec = parser.execute(chunk);
        consumed += exec.consumed;
        if let Some(root) = exec.value {
            assert_eq!(i, chunks.len() - 1, "completed before the last chunk");
            length = Some(root.protocol_length());
        } else {
            assert!(exec.needs_more(chunk.len()), "parser failed: {:?}", parser.error());
        }
    }
    let value = parser.callbacks_mut().take().expect("no value decoded");
    (value, consumed, length.expect("message incomplete"))
}

#[test]
fn test_single_call_consumes_everything() {
    for &msg in MESSAGES {
        let (_, consumed, length) = decode_chunks(&[msg]);
        assert_eq!(consumed, msg.len());
        assert_eq!(length, msg.len() as u64);
    }
}

#[test]
fn test_split_at_every_offset() {
    for &msg in MESSAGES {
        let whole = decode_chunks(&[msg]);
        for split in 1..msg.len() {
            let (head, tail) = msg.split_at(split);
            assert_eq!(
                decode_chunks(&[head, tail]),
                whole,
                "split at {} of {:?}",
                split,
                String::from_utf8_lossy(msg)
            );
        }
    }
}

#[test]
fn test_byte_at_a_time() {
    for &msg in MESSAGES {
        let bytes: Vec<&[u8]> = msg.chunks(1).collect();
        assert_eq!(decode_chunks(&bytes), decode_chunks(&[msg]));
    }
}

/// Collects payload chunks and checks `remaining()` only hits zero on the last one.
#[derive(Default)]
struct Payload {
    chunks: Vec<Vec<u8>>,
    finished: bool,
}

impl ParserCallbacks for Payload {
    type Data = ();

    fn on_string(&mut self, value: &mut ProtocolValue, chunk: &[u8]) -> Flow {
        assert!(!self.finished, "chunk after final chunk");
        self.chunks.push(chunk.to_vec());
        self.finished = value.remaining() == 0;
        Flow::Continue
    }
}

#[test]
fn test_payload_chunks_concatenate() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let mut encoded = format!("${}\r\n", payload.len()).into_bytes();
    encoded.extend_from_slice(&payload);
    encoded.extend_from_slice(b"\r\n");

    for size in [1, 2, 7, 64, 333, 999, 1000, 2000] {
        let mut parser = RespParser::new(Payload::default());
        let mut completed = false;
        for chunk in encoded.chunks(size) {
            let exec = parser.execute(chunk);
            assert_eq!(exec.consumed, chunk.len());
            completed = exec.is_complete();
        }
        assert!(completed, "chunk size {}", size);

        let cb = parser.callbacks();
        assert!(cb.finished);
        assert_eq!(cb.chunks.concat(), payload, "chunk size {}", size);
        if size < payload.len() {
            assert!(cb.chunks.len() > 1);
        }
    }
}

#[test]
fn test_deep_nesting_within_capacity() {
    let depth = 31; // 31 arrays plus the integer fill the default 32 slots
    let mut encoded = b"*1\r\n".repeat(depth);
    encoded.extend_from_slice(b":1\r\n");

    let (value, consumed, length) = decode_chunks(&[encoded.as_slice()]);
    assert_eq!(consumed, encoded.len());
    assert_eq!(length, encoded.len() as u64);

    let mut level = &value;
    for _ in 0..depth {
        level = &level.as_array().expect("array")[0];
    }
    assert_eq!(level, &RespValue::Integer(1));
}
