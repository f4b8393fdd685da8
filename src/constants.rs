// --- Constants for the RESP wire format ---

pub const TAG_BULK_STRING: u8 = b'$'; // $<len>\r\n<payload>\r\n
pub const TAG_ARRAY: u8 = b'*'; // *<count>\r\n<values>
pub const TAG_INTEGER: u8 = b':'; // :<int>\r\n
pub const TAG_STATUS: u8 = b'+'; // recognised, never decoded
pub const TAG_ERROR: u8 = b'-'; // recognised, never decoded

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF_LEN: u64 = 2;

// --- Parser sizing ---

/// Number of value records the parser may hold at once: the root plus one
/// per open array.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// Upper bound on array storage reserved up front from a declared count.
/// Counts come off the wire, so larger arrays grow as children arrive.
pub const MAX_PREALLOCATED_ELEMENTS: usize = 1024;

/// Initial capacity for the rolling buffer of a framed byte stream.
pub const DEFAULT_FRAME_BUFFER_CAPACITY: usize = 16 * 1024; // 16 KiB
