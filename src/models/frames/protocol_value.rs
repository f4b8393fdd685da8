use crate::enums::ValueType;

/// One value record in the parser stack.
///
/// Describes a decoded or in-progress RESP value by position rather than by
/// content: payload bytes are never stored here, only their offsets in the
/// logical stream. Records are reused between messages, so a record handed to
/// a callback or returned as a completed root is only valid until the next
/// `execute` call.
///
/// `D` is an application slot that the parser resets to `D::default()` when
/// the record is reused but otherwise never touches.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolValue<D = ()> {
    pub(crate) value_type: Option<ValueType>,
    pub(crate) protocol_offset: u64,
    pub(crate) protocol_length: u64,
    pub(crate) content_offset: u64,
    pub(crate) content_length: u64,
    pub(crate) remaining: u64,
    pub(crate) nil: bool,
    pub(crate) parent: Option<usize>,
    pub(crate) user_data: D,
}

impl<D: Default> ProtocolValue<D> {
    pub(crate) fn new(parent: Option<usize>) -> Self {
        Self {
            value_type: None,
            protocol_offset: 0,
            protocol_length: 0,
            content_offset: 0,
            content_length: 0,
            remaining: 0,
            nil: false,
            parent,
            user_data: D::default(),
        }
    }

    /// Clears the record for a fresh value under `parent`.
    pub(crate) fn reset(&mut self, parent: Option<usize>) {
        *self = Self::new(parent);
    }
}

impl<D> ProtocolValue<D> {
    /// Value kind, or `None` before the tag byte has been read.
    #[inline]
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Offset of the tag byte, counted from the start of the message.
    #[inline]
    pub fn protocol_offset(&self) -> u64 {
        self.protocol_offset
    }

    /// Encoded length including header, payload, terminators and, for arrays,
    /// every descendant. Final for arrays only once all children completed.
    #[inline]
    pub fn protocol_length(&self) -> u64 {
        self.protocol_length
    }

    /// Offset of the payload: digits for integers, raw bytes for strings.
    /// Zero for arrays and nil values.
    #[inline]
    pub fn content_offset(&self) -> u64 {
        self.content_offset
    }

    #[inline]
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Strings: payload bytes not yet delivered. Arrays: children not yet
    /// started. Frozen once the value completes.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// True for `$-1` / `*-1` style values.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.nil
    }

    /// Stack index of the enclosing array, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    pub fn user_data(&self) -> &D {
        &self.user_data
    }

    #[inline]
    pub fn user_data_mut(&mut self) -> &mut D {
        &mut self.user_data
    }
}

impl<D: Default> Default for ProtocolValue<D> {
    fn default() -> Self {
        Self::new(None)
    }
}
