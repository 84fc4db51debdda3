use crate::error::{Error, Result};
use crate::symbol::{MAX_SYMBOL_LEN, Symbol};
use crate::symbol_table::{ESCAPE_CODE, SymbolTable};

/// Starting size of the per-call output buffer.
pub const DEFAULT_CAPACITY: usize = 256;

/// What to do when a code stream references a code with no symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnassignedCode {
    /// Fail with [`Error::CorruptSymbolCode`].
    #[default]
    Reject,
    /// Emit [`Symbol::CORRUPT`] and keep going.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub initial_capacity: usize,
    pub unassigned: UnassignedCode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            initial_capacity: DEFAULT_CAPACITY,
            unassigned: UnassignedCode::Reject,
        }
    }
}

/// Expands code streams through a borrowed [`SymbolTable`].
///
/// Holds no mutable state: every call allocates its own output buffer, so one
/// decoder can be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'t> {
    table: &'t SymbolTable,
    options: DecodeOptions,
}

impl<'t> Decoder<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self::with_options(table, DecodeOptions::default())
    }

    pub fn with_options(table: &'t SymbolTable, options: DecodeOptions) -> Self {
        Decoder { table, options }
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes one string's code stream into raw bytes.
    ///
    /// # Errors
    /// - `Error::TruncatedEscape` if the stream ends on an escape byte
    /// - `Error::CorruptSymbolCode` for an unassigned code, unless the
    ///   decoder was configured with [`UnassignedCode::Placeholder`]
    pub fn decode_bytes(&self, codes: &[u8]) -> Result<Vec<u8>> {
        // No string expands past 8 bytes per code.
        let capacity = self
            .options
            .initial_capacity
            .min(codes.len().saturating_mul(MAX_SYMBOL_LEN));
        let mut out: Vec<u8> = Vec::with_capacity(capacity);
        let mut i = 0usize;

        while i < codes.len() {
            let code = codes[i];

            if code == ESCAPE_CODE {
                let literal = *codes
                    .get(i + 1)
                    .ok_or(Error::TruncatedEscape { position: i })?;
                ensure_room(&mut out, 1);
                out.push(literal);
                i += 2;
                continue;
            }

            let symbol = match self.table.symbol(code) {
                Some(symbol) => symbol,
                None => match self.options.unassigned {
                    UnassignedCode::Reject => {
                        return Err(Error::CorruptSymbolCode { code, position: i });
                    }
                    UnassignedCode::Placeholder => &Symbol::CORRUPT,
                },
            };
            ensure_room(&mut out, symbol.len());
            out.extend_from_slice(symbol.as_bytes());
            i += 1;
        }

        tracing::trace!(codes = codes.len(), decoded = out.len(), "decoded string");
        Ok(out)
    }

    /// Decodes one string's code stream and checks the result is UTF-8.
    pub fn decode(&self, codes: &[u8]) -> Result<String> {
        let bytes = self.decode_bytes(codes)?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }
}

/// Doubles the buffer when `needed` more bytes would not fit. Written bytes
/// are carried over by the reallocation.
fn ensure_room(out: &mut Vec<u8>, needed: usize) {
    let spare = out.capacity() - out.len();
    if spare < needed {
        out.reserve_exact(out.capacity().max(needed));
    }
}

/// Decodes `codes` with default options.
pub fn decode(table: &SymbolTable, codes: &[u8]) -> Result<String> {
    Decoder::new(table).decode(codes)
}

/// Decodes `codes` with default options, without UTF-8 validation.
pub fn decode_bytes(table: &SymbolTable, codes: &[u8]) -> Result<Vec<u8>> {
    Decoder::new(table).decode_bytes(codes)
}
