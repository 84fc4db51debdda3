//! Serialized symbol table parsing.
//!
//! # Header Format
//!
//! ```text
//! +---------------------+
//! | version word (8)    |  u64 little-endian, high 32 bits = 20190218
//! +---------------------+
//! | zero_terminated (1) |  nonzero = code 0 is the empty symbol
//! +---------------------+
//! | histogram (8)       |  histogram[k] = number of symbols of length k+1
//! +---------------------+
//! | symbol bytes        |  length-1 symbols, then length-2, ... length-8,
//! | (variable)          |  each bucket in code order
//! +---------------------+
//! ```
//!
//! In zero-terminated tables `histogram[0]` also counts the empty symbol,
//! which has no bytes in the stream, and code assignment starts at 1.

use std::io::{Cursor, Read, Write};

use byyte::le::{ByteReader, ByteWriter};

use crate::error::{Error, Result};
use crate::symbol::{MAX_SYMBOL_LEN, Symbol};

/// Format version stored in the high half of the version word.
pub const FSST_VERSION: u32 = 20190218;

/// Code meaning "the next byte is a literal". Never stored in a table.
pub const ESCAPE_CODE: u8 = 255;

/// Number of codes that can carry a symbol (0..=254).
pub const MAX_CODES: usize = 255;

/// Size of the fixed part of the header, before the symbol bytes.
pub const HEADER_LEN: usize = 17;

/// A parsed code to symbol mapping. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    version_word: u64,
    zero_terminated: bool,
    histogram: [u8; MAX_SYMBOL_LEN],
    /// Codes at or past `assigned` hold [`Symbol::CORRUPT`].
    symbols: [Symbol; MAX_CODES],
    assigned: usize,
    encoded_len: usize,
}

impl SymbolTable {
    /// Parses a table from a buffer holding exactly one serialized header.
    /// Trailing bytes are ignored; use [`SymbolTable::parse_prefix`] to learn
    /// where the header ended.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_prefix(bytes).map(|(table, _)| table)
    }

    /// Parses a table from the start of `bytes` and returns it with the number
    /// of bytes the header occupied.
    pub fn parse_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut cursor = Cursor::new(bytes);
        let table = Self::from_reader(&mut cursor)?;
        let consumed = table.encoded_len;
        Ok((table, consumed))
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let version_word = reader
            .read_u64()
            .map_err(|e| Error::malformed(format!("truncated version word: {e}")))?;
        let version = (version_word >> 32) as u32;
        if version != FSST_VERSION {
            return Err(Error::malformed(format!(
                "unsupported format version {version}, expected {FSST_VERSION}"
            )));
        }

        let zero_terminated = reader
            .read_u8()
            .map_err(|e| Error::malformed(format!("truncated flags: {e}")))?
            != 0;
        let histogram: [u8; MAX_SYMBOL_LEN] = reader
            .read_array()
            .map_err(|e| Error::malformed(format!("truncated length histogram: {e}")))?;

        let mut symbols = [Symbol::CORRUPT; MAX_CODES];
        let mut code = 0usize;
        if zero_terminated {
            if histogram[0] == 0 {
                return Err(Error::malformed(
                    "zero-terminated table has no slot for the empty symbol",
                ));
            }
            symbols[0] = Symbol::EMPTY;
            code = 1;
        }

        let mut encoded_len = HEADER_LEN;
        for (bucket, &stored) in histogram.iter().enumerate() {
            let len = bucket + 1;
            let count = if bucket == 0 && zero_terminated {
                stored as usize - 1
            } else {
                stored as usize
            };
            if code + count > MAX_CODES {
                return Err(Error::malformed(format!(
                    "histogram assigns more than {MAX_CODES} codes"
                )));
            }

            for _ in 0..count {
                let mut bytes = [0u8; MAX_SYMBOL_LEN];
                reader.read_run(&mut bytes, len).map_err(|e| {
                    Error::malformed(format!("truncated symbol for code {code}: {e}"))
                })?;
                symbols[code] = Symbol::from_parts(bytes, len as u8);
                code += 1;
            }
            encoded_len += count * len;
        }

        tracing::debug!(
            symbols = code,
            zero_terminated,
            encoded_len,
            "parsed symbol table"
        );

        Ok(SymbolTable {
            version_word,
            zero_terminated,
            histogram,
            symbols,
            assigned: code,
            encoded_len,
        })
    }

    /// Serializes the table back into the header format it was parsed from.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.encoded_len);
        data.write_u64(self.version_word)?;
        data.write_u8(self.zero_terminated as u8)?;
        data.write_all(&self.histogram)?;
        for (_, symbol) in self.symbols() {
            data.write_all(symbol.as_bytes())?;
        }

        Ok(data)
    }

    /// Symbol for `code`, or `None` if the code was never assigned.
    /// The escape code always yields `None`.
    pub fn symbol(&self, code: u8) -> Option<&Symbol> {
        let code = code as usize;
        if code < self.assigned {
            Some(&self.symbols[code])
        } else {
            None
        }
    }

    /// Assigned codes in ascending order, with their symbols.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, &Symbol)> + '_ {
        self.symbols[..self.assigned]
            .iter()
            .enumerate()
            .map(|(code, symbol)| (code as u8, symbol))
    }

    /// Number of assigned codes, including the empty symbol of a
    /// zero-terminated table.
    pub fn symbol_count(&self) -> usize {
        self.assigned
    }

    pub fn is_zero_terminated(&self) -> bool {
        self.zero_terminated
    }

    /// The full 8-byte version word; the low half carries encoder metadata.
    pub fn version_word(&self) -> u64 {
        self.version_word
    }

    /// Histogram exactly as stored in the header.
    pub fn histogram(&self) -> [u8; MAX_SYMBOL_LEN] {
        self.histogram
    }

    /// Number of header bytes the table was parsed from.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }
}
