//! Header integer scanner.
//!
//! Grammar: `[+-]?(0|[1-9][0-9]*)\r\n`. The magnitude is accumulated unsigned
//! and checked against `i64::MAX` on the positive path and `|i64::MIN|` on the
//! negative path, both before and after the multiply-by-ten step. `+0` and
//! `-0` are rejected along with leading zeros.
//!
//! The scanner consumes every byte up to and including `\r`; the trailing
//! `\n` belongs to the parser because it completes the value.

use crate::constants::CR;
use crate::enums::ParserState;

const POSITIVE_LIMIT: u64 = i64::MAX as u64;
const NEGATIVE_LIMIT: u64 = i64::MIN.unsigned_abs();

/// Result of feeding one byte to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte accepted; continue in this state.
    Next(ParserState),
    /// Byte is outside the grammar.
    Malformed,
    /// Byte would push the literal past the signed 64-bit range.
    Overflow,
}

/// Partial accumulator, persisted between `execute` calls while the parser
/// sits in one of the integer states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct IntegerScanner {
    magnitude: u64,
    value: i64,
}

impl IntegerScanner {
    /// The scanned value. Valid once the scanner has moved to `IntegerLf`.
    #[inline]
    pub(crate) fn value(&self) -> i64 {
        self.value
    }

    pub(crate) fn step(&mut self, state: ParserState, byte: u8) -> Step {
        use ParserState::*;

        match (state, byte) {
            (IntegerStart, _) => {
                self.magnitude = 0;
                self.value = 0;
                match byte {
                    b'1'..=b'9' => {
                        self.magnitude = digit(byte);
                        Step::Next(IntegerPos09)
                    }
                    b'-' => Step::Next(IntegerNeg19),
                    b'+' => Step::Next(IntegerPos19),
                    b'0' => Step::Next(IntegerCr),
                    _ => Step::Malformed,
                }
            }
            (IntegerPos19, b'1'..=b'9') => {
                self.magnitude = digit(byte);
                Step::Next(IntegerPos09)
            }
            (IntegerNeg19, b'1'..=b'9') => {
                self.magnitude = digit(byte);
                Step::Next(IntegerNeg09)
            }
            (IntegerPos09, b'0'..=b'9') => self.accumulate(byte, POSITIVE_LIMIT, IntegerPos09),
            (IntegerNeg09, b'0'..=b'9') => self.accumulate(byte, NEGATIVE_LIMIT, IntegerNeg09),
            (IntegerPos09, CR) => {
                // magnitude <= i64::MAX on this path
                self.value = self.magnitude as i64;
                Step::Next(IntegerLf)
            }
            (IntegerNeg09, CR) => {
                // |i64::MIN| casts to i64::MIN, which negates to itself
                self.value = (self.magnitude as i64).wrapping_neg();
                Step::Next(IntegerLf)
            }
            (IntegerCr, CR) => Step::Next(IntegerLf),
            _ => Step::Malformed,
        }
    }

    fn accumulate(&mut self, byte: u8, limit: u64, next: ParserState) -> Step {
        let d = digit(byte);
        if self.magnitude > limit / 10 {
            return Step::Overflow;
        }
        self.magnitude *= 10;
        if self.magnitude > limit - d {
            return Step::Overflow;
        }
        self.magnitude += d;
        Step::Next(next)
    }
}

#[inline]
fn digit(byte: u8) -> u64 {
    (byte - b'0') as u64
}
