use std::fmt;

/// Longest byte sequence a single code can stand for.
pub const MAX_SYMBOL_LEN: usize = 8;

/// A byte sequence of 0 to 8 bytes that one code expands to.
///
/// Bytes past `len` are always zero, so two symbols compare equal exactly when
/// their visible bytes do.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    bytes: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl Symbol {
    /// The empty symbol reserved for code 0 in zero-terminated tables.
    pub const EMPTY: Symbol = Symbol {
        bytes: [0; MAX_SYMBOL_LEN],
        len: 0,
    };

    /// Filler for codes that were never assigned. Only emitted when a decoder
    /// is configured with [`UnassignedCode::Placeholder`](crate::UnassignedCode).
    pub const CORRUPT: Symbol = Symbol {
        bytes: *b"corrupt\0",
        len: MAX_SYMBOL_LEN as u8,
    };

    /// Returns `None` if `bytes` is longer than [`MAX_SYMBOL_LEN`].
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > MAX_SYMBOL_LEN {
            return None;
        }
        let mut buf = [0u8; MAX_SYMBOL_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(Symbol {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    /// Caller guarantees `len <= MAX_SYMBOL_LEN` and zeroed trailing bytes.
    pub(crate) const fn from_parts(bytes: [u8; MAX_SYMBOL_LEN], len: u8) -> Self {
        Symbol { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol(\"{}\")", self.as_bytes().escape_ascii())
    }
}
