//! Decoder for FSST (Fast Static Symbol Table) compressed strings.
//!
//! FSST replaces byte sequences of up to 8 bytes with 8-bit codes drawn from a
//! per-batch symbol table. This crate consumes what an FSST encoder produces
//! and gives random access to individual strings without decompressing the
//! whole batch:
//! - `symbol_table`: parse the serialized table header
//! - `decoder`: expand one string's code stream
//! - `batch`: indexable, read-only view over many strings
//!
//! ```
//! use fsst::{CompressedBatch, FSST_VERSION};
//!
//! // Table with two symbols: code 0 = "he", code 1 = "llo".
//! let mut table = Vec::new();
//! table.extend_from_slice(&((FSST_VERSION as u64) << 32).to_le_bytes());
//! table.push(0);
//! table.extend_from_slice(&[0, 1, 1, 0, 0, 0, 0, 0]);
//! table.extend_from_slice(b"hello");
//!
//! // "hello" and "he!" (the '!' is escaped).
//! let batch = CompressedBatch::new(vec![2, 3], vec![0, 1, 0, 255, b'!'], table).unwrap();
//! assert_eq!(batch.decode_as_strings().unwrap(), vec!["hello", "he!"]);
//! ```

pub mod batch;
pub mod decoder;
pub mod error;
pub mod symbol;
pub mod symbol_table;

pub use batch::{CompressedBatch, CompressedBatchView};
pub use decoder::{DecodeOptions, Decoder, UnassignedCode, decode, decode_bytes};
pub use error::{Error, Result};
pub use symbol::{MAX_SYMBOL_LEN, Symbol};
pub use symbol_table::{ESCAPE_CODE, FSST_VERSION, MAX_CODES, SymbolTable};
