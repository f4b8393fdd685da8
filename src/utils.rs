use std::fmt;

/// Renders one wire byte for log and error output.
///
/// Quotes, backslashes and the common control characters get their C escape,
/// printable ASCII passes through, and anything else is shown as `\xNN`.
/// Holds no buffers, so it is safe to use from any number of parsers at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapedByte(pub u8);

impl fmt::Display for EscapedByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\\' => f.write_str("\\\\"),
            b'"' => f.write_str("\\\""),
            b'\n' => f.write_str("\\n"),
            b'\r' => f.write_str("\\r"),
            b'\t' => f.write_str("\\t"),
            0x07 => f.write_str("\\a"),
            0x08 => f.write_str("\\b"),
            b if b == b' ' || b.is_ascii_graphic() => write!(f, "{}", b as char),
            b => write!(f, "\\x{:02x}", b),
        }
    }
}

/// Renders a byte slice with [`EscapedByte`], truncated to `limit` bytes.
#[derive(Debug, Clone, Copy)]
pub struct EscapedBytes<'a> {
    pub bytes: &'a [u8],
    pub limit: usize,
}

impl<'a> EscapedBytes<'a> {
    pub fn new(bytes: &'a [u8], limit: usize) -> Self {
        Self { bytes, limit }
    }
}

impl fmt::Display for EscapedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.bytes.iter().take(self.limit) {
            write!(f, "{}", EscapedByte(b))?;
        }
        if self.bytes.len() > self.limit {
            f.write_str("...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_byte() {
        let cases: [(u8, &str); 9] = [
            (b'a', "a"),
            (b' ', " "),
            (b'\\', "\\\\"),
            (b'"', "\\\""),
            (b'\n', "\\n"),
            (b'\r', "\\r"),
            (0x07, "\\a"),
            (0x00, "\\x00"),
            (0xff, "\\xff"),
        ];
        for (byte, expected) in cases {
            assert_eq!(EscapedByte(byte).to_string(), expected);
        }
    }

    #[test]
    fn test_escaped_bytes_truncates() {
        assert_eq!(EscapedBytes::new(b"$3\r\nfoo", 4).to_string(), "$3\\r\\n...");
        assert_eq!(EscapedBytes::new(b":1", 8).to_string(), ":1");
    }
}
