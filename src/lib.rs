//! # respstream
//!
//! Incremental, zero-copy decoder for the Redis Serialization Protocol.
//!
//! - [`RespParser`] is the core: feed it byte chunks of any size and it reports
//!   values through [`ParserCallbacks`], resuming exactly where the previous
//!   chunk ended. It never copies payload bytes and never recurses.
//! - [`RespFrameDecoder`] builds owned [`RespValue`] trees on top of it and
//!   plugs into [`FramedByteStream`] for async byte sources.
//!
//! ```
//! use respstream::{Flow, ParserCallbacks, ProtocolValue, RespParser};
//!
//! #[derive(Default)]
//! struct Sum(i64);
//!
//! impl ParserCallbacks for Sum {
//!     type Data = ();
//!
//!     fn on_integer(&mut self, _value: &mut ProtocolValue, n: i64) -> Flow {
//!         self.0 += n;
//!         Flow::Continue
//!     }
//! }
//!
//! let mut parser = RespParser::new(Sum::default());
//! assert!(parser.execute(b"*2\r\n:4").needs_more(6));
//!
//! let exec = parser.execute(b"0\r\n:2\r\n");
//! assert_eq!(exec.consumed, 7);
//! assert_eq!(exec.value.map(|root| root.protocol_length()), Some(13));
//! assert_eq!(parser.callbacks().0, 42);
//! ```

pub mod traits {
    pub mod byte_stream;
    pub mod frame_decoder;
    pub mod parser_callbacks;
    pub mod stream_buffer;
}

pub mod models {
    pub mod decoders {
        pub mod resp {
            pub(crate) mod integer;
            pub mod frame_decoder;
            pub mod parser;
            pub mod tree_builder;
        }
    }
    pub mod frames {
        pub mod protocol_value;
        pub mod resp_value;
    }
    pub mod streams {
        pub mod framed_byte_stream;
    }
}

pub mod constants;
pub mod enums;
pub mod error;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crate::enums::{DecodeResult, Flow, ParserState, ValueType};
pub use crate::error::RespError;
pub use crate::models::decoders::resp::frame_decoder::RespFrameDecoder;
pub use crate::models::decoders::resp::parser::{Execution, ParserConfig, RespParser};
pub use crate::models::decoders::resp::tree_builder::TreeBuilder;
pub use crate::models::frames::protocol_value::ProtocolValue;
pub use crate::models::frames::resp_value::RespValue;
pub use crate::models::streams::framed_byte_stream::FramedByteStream;
pub use crate::traits::frame_decoder::FrameDecoder;
pub use crate::traits::parser_callbacks::ParserCallbacks;
