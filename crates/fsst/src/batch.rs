//! Random access over a batch of compressed strings.
//!
//! A batch is what the encoder hands back: one compressed length per string,
//! the concatenated code streams, and the serialized symbol table they share.
//! Nothing is decoded up front; [`CompressedBatchView::get`] slices out one
//! string's codes and expands just that string.

use crate::decoder::{DecodeOptions, Decoder};
use crate::error::{Error, Result};
use crate::symbol_table::SymbolTable;

/// Owned encoder output: `(lengths, data, table)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBatch {
    lengths: Vec<usize>,
    data: Vec<u8>,
    table: Vec<u8>,
}

impl CompressedBatch {
    /// # Errors
    /// `Error::LengthMismatch` if `lengths` does not add up to `data.len()`.
    pub fn new(lengths: Vec<usize>, data: Vec<u8>, table: Vec<u8>) -> Result<Self> {
        let total = total_length(&lengths);
        if total != data.len() {
            return Err(Error::LengthMismatch {
                expected: total,
                actual: data.len(),
            });
        }

        Ok(CompressedBatch {
            lengths,
            data,
            table,
        })
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The serialized symbol table shared by every string in the batch.
    pub fn table_bytes(&self) -> &[u8] {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn parse_table(&self) -> Result<SymbolTable> {
        SymbolTable::parse(&self.table)
    }

    /// Builds a view over this batch. `table` need not come from
    /// [`CompressedBatch::parse_table`]; any table the strings were encoded
    /// with will do.
    pub fn view<'a>(&'a self, table: &'a SymbolTable) -> Result<CompressedBatchView<'a>> {
        CompressedBatchView::new(&self.lengths, &self.data, table)
    }

    /// Parses the table and decodes every string in order.
    pub fn decode_as_strings(&self) -> Result<Vec<String>> {
        let table = self.parse_table()?;
        self.view(&table)?.to_vec()
    }
}

/// Read-only, indexable sequence of decoded strings.
///
/// Offsets are computed once at construction, so [`get`](Self::get) is O(1)
/// plus the cost of decoding the string itself.
#[derive(Debug, Clone)]
pub struct CompressedBatchView<'a> {
    data: &'a [u8],
    /// `offsets[i]..offsets[i + 1]` is string `i`'s code stream.
    offsets: Vec<usize>,
    decoder: Decoder<'a>,
}

impl<'a> CompressedBatchView<'a> {
    pub fn new(lengths: &[usize], data: &'a [u8], table: &'a SymbolTable) -> Result<Self> {
        Self::with_options(lengths, data, table, DecodeOptions::default())
    }

    pub fn with_options(
        lengths: &[usize],
        data: &'a [u8],
        table: &'a SymbolTable,
        options: DecodeOptions,
    ) -> Result<Self> {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut end = 0usize;
        offsets.push(end);
        for &len in lengths {
            end = end.saturating_add(len);
            offsets.push(end);
        }
        if end != data.len() {
            return Err(Error::LengthMismatch {
                expected: end,
                actual: data.len(),
            });
        }

        tracing::debug!(
            strings = lengths.len(),
            data_len = data.len(),
            "built compressed batch view"
        );

        Ok(CompressedBatchView {
            data,
            offsets,
            decoder: Decoder::with_options(table, options),
        })
    }

    /// Number of strings in the batch.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn table(&self) -> &'a SymbolTable {
        self.decoder.table()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Start of string `index`'s code stream within the data blob.
    pub fn offset(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.offsets[index])
    }

    /// The compressed code stream of string `index`.
    pub fn compressed(&self, index: usize) -> Result<&'a [u8]> {
        self.check_index(index)?;
        Ok(&self.data[self.offsets[index]..self.offsets[index + 1]])
    }

    /// Decodes string `index`.
    ///
    /// # Errors
    /// - `Error::IndexOutOfRange` if `index >= len()`
    /// - any decoding error for the string's code stream
    pub fn get(&self, index: usize) -> Result<String> {
        self.decoder.decode(self.compressed(index)?)
    }

    /// Decodes string `index` without UTF-8 validation.
    pub fn get_bytes(&self, index: usize) -> Result<Vec<u8>> {
        self.decoder.decode_bytes(self.compressed(index)?)
    }

    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            view: self,
            next: 0,
        }
    }

    /// Decodes every string, stopping at the first failure.
    pub fn to_vec(&self) -> Result<Vec<String>> {
        self.iter().collect()
    }

    pub fn push(&mut self, _value: String) -> Result<()> {
        Err(Error::UnsupportedMutation { operation: "push" })
    }

    pub fn insert(&mut self, _index: usize, _value: String) -> Result<()> {
        Err(Error::UnsupportedMutation {
            operation: "insert",
        })
    }

    pub fn set(&mut self, _index: usize, _value: String) -> Result<()> {
        Err(Error::UnsupportedMutation { operation: "set" })
    }

    pub fn remove(&mut self, _index: usize) -> Result<String> {
        Err(Error::UnsupportedMutation {
            operation: "remove",
        })
    }
}

/// Iterator over decoded strings, in batch order.
#[derive(Debug, Clone)]
pub struct Iter<'v, 'a> {
    view: &'v CompressedBatchView<'a>,
    next: usize,
}

impl Iterator for Iter<'_, '_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.view.len() {
            return None;
        }
        let item = self.view.get(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl<'v, 'a> IntoIterator for &'v CompressedBatchView<'a> {
    type Item = Result<String>;
    type IntoIter = Iter<'v, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn total_length(lengths: &[usize]) -> usize {
    lengths.iter().fold(0usize, |acc, &len| acc.saturating_add(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::UnassignedCode;
    use crate::symbol_table::FSST_VERSION;

    /// Single-byte identity table: code `b` expands to byte `b`.
    fn identity_table() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&((FSST_VERSION as u64) << 32).to_le_bytes());
        data.push(0);
        data.extend_from_slice(&[255, 0, 0, 0, 0, 0, 0, 0]);
        data.extend(0..=254u8);
        data
    }

    #[test]
    fn test_get_decodes_each_string() {
        let batch = CompressedBatch::new(vec![1, 2, 3], b"abbccc".to_vec(), identity_table())
            .unwrap();
        let table = batch.parse_table().unwrap();
        let view = batch.view(&table).unwrap();

        assert_eq!(view.len(), 3);
        assert_eq!(view.get(0).unwrap(), "a");
        assert_eq!(view.get(1).unwrap(), "bb");
        assert_eq!(view.get(2).unwrap(), "ccc");
        assert_eq!(view.offset(2).unwrap(), 3);
        assert_eq!(view.compressed(1).unwrap(), b"bb");
        assert_eq!(
            batch.decode_as_strings().unwrap(),
            vec!["a".to_string(), "bb".to_string(), "ccc".to_string()]
        );
    }

    #[test]
    fn test_out_of_range() {
        let table = SymbolTable::parse(&identity_table()).unwrap();
        let view = CompressedBatchView::new(&[2], b"ok", &table).unwrap();
        assert_eq!(
            view.get(1).unwrap_err(),
            Error::IndexOutOfRange { index: 1, len: 1 }
        );
        assert!(view.offset(usize::MAX).is_err());
        assert!(view.compressed(1).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let batch = CompressedBatch::new(vec![], vec![], identity_table()).unwrap();
        let table = batch.parse_table().unwrap();
        let view = batch.view(&table).unwrap();

        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert!(matches!(view.get(0), Err(Error::IndexOutOfRange { .. })));
        assert_eq!(view.iter().count(), 0);
        assert!(batch.decode_as_strings().unwrap().is_empty());
    }

    #[test]
    fn test_empty_strings_inside_batch() {
        let table = SymbolTable::parse(&identity_table()).unwrap();
        let view = CompressedBatchView::new(&[0, 2, 0], b"hi", &table).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec!["", "hi", ""]);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            CompressedBatch::new(vec![1, 2], b"abcd".to_vec(), identity_table()).unwrap_err(),
            Error::LengthMismatch {
                expected: 3,
                actual: 4
            }
        );

        let table = SymbolTable::parse(&identity_table()).unwrap();
        assert!(CompressedBatchView::new(&[usize::MAX, 2], b"ab", &table).is_err());
    }

    #[test]
    fn test_mutation_is_unsupported() {
        let table = SymbolTable::parse(&identity_table()).unwrap();
        let mut view = CompressedBatchView::new(&[1], b"x", &table).unwrap();

        assert!(matches!(
            view.push("y".to_string()),
            Err(Error::UnsupportedMutation { operation: "push" })
        ));
        assert!(matches!(
            view.insert(0, "y".to_string()),
            Err(Error::UnsupportedMutation { .. })
        ));
        assert!(matches!(
            view.set(0, "y".to_string()),
            Err(Error::UnsupportedMutation { .. })
        ));
        assert!(matches!(view.remove(0), Err(Error::UnsupportedMutation { .. })));
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap(), "x");
    }

    #[test]
    fn test_view_forwards_decode_options() {
        // One symbol: code 0 = "a". Every other code is unassigned.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&((FSST_VERSION as u64) << 32).to_le_bytes());
        bytes.push(0);
        bytes.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        bytes.push(b'a');
        let table = SymbolTable::parse(&bytes).unwrap();

        let strict = CompressedBatchView::new(&[3], &[0, 9, 0], &table).unwrap();
        assert_eq!(
            strict.get(0).unwrap_err(),
            Error::CorruptSymbolCode {
                code: 9,
                position: 1
            }
        );

        let options = DecodeOptions {
            initial_capacity: 1,
            unassigned: UnassignedCode::Placeholder,
        };
        let lenient = CompressedBatchView::with_options(&[3], &[0, 9, 0], &table, options).unwrap();
        assert_eq!(lenient.get(0).unwrap(), "acorrupt\0a");
        assert_eq!(lenient.get_bytes(0).unwrap(), b"acorrupt\0a");
    }

    #[test]
    fn test_get_bytes_skips_utf8_check() {
        let table = SymbolTable::parse(&identity_table()).unwrap();
        let view = CompressedBatchView::new(&[2, 3], &[b'o', b'k', b'x', 255, 0xFF], &table)
            .unwrap();

        assert_eq!(view.get(0).unwrap(), "ok");
        assert_eq!(view.get_bytes(0).unwrap(), b"ok");
        assert_eq!(
            view.get(1).unwrap_err(),
            Error::InvalidUtf8 { valid_up_to: 1 }
        );
        assert_eq!(view.get_bytes(1).unwrap(), vec![b'x', 0xFF]);
        assert!(matches!(
            view.get_bytes(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_iter_is_exact_size() {
        let table = SymbolTable::parse(&identity_table()).unwrap();
        let view = CompressedBatchView::new(&[1, 1, 1], b"xyz", &table).unwrap();
        let mut iter = view.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);

        let collected: Vec<String> = (&view).into_iter().map(|s| s.unwrap()).collect();
        assert_eq!(collected, vec!["x", "y", "z"]);
    }
}
