//! Test-only stand-in for an FSST encoder.
//!
//! Takes a fixed symbol list (no training), writes the table header and
//! greedily encodes strings with the longest matching symbol, escaping any
//! byte no symbol covers.

#![allow(dead_code)]

use byyte::le::ByteWriter;
use fsst::{CompressedBatch, FSST_VERSION};
use std::io::Write;

pub struct TestEncoder {
    /// Symbols in code order.
    symbols: Vec<Vec<u8>>,
    zero_terminated: bool,
}

impl TestEncoder {
    pub fn new(symbols: &[&[u8]], zero_terminated: bool) -> Self {
        let mut symbols: Vec<Vec<u8>> = symbols.iter().map(|s| s.to_vec()).collect();
        symbols.sort_by_key(|s| s.len());
        assert!(symbols.iter().all(|s| (1..=8).contains(&s.len())));
        assert!(symbols.len() + (zero_terminated as usize) <= 255);
        TestEncoder {
            symbols,
            zero_terminated,
        }
    }

    /// Code 0 = the single byte 0, ..., code 254 = the byte 254.
    pub fn identity() -> Self {
        let bytes: Vec<[u8; 1]> = (0..=254u8).map(|b| [b]).collect();
        let symbols: Vec<&[u8]> = bytes.iter().map(|b| &b[..]).collect();
        Self::new(&symbols, false)
    }

    fn first_code(&self) -> usize {
        self.zero_terminated as usize
    }

    pub fn table_bytes(&self) -> Vec<u8> {
        let mut histogram = [0u8; 8];
        for symbol in &self.symbols {
            histogram[symbol.len() - 1] += 1;
        }
        if self.zero_terminated {
            histogram[0] += 1;
        }

        let mut data = Vec::new();
        data.write_u64(((FSST_VERSION as u64) << 32) | self.symbols.len() as u64)
            .unwrap();
        data.write_u8(self.zero_terminated as u8).unwrap();
        data.write_all(&histogram).unwrap();
        for symbol in &self.symbols {
            data.write_all(symbol).unwrap();
        }
        data
    }

    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < input.len() {
            let rest = &input[i..];
            let best = self
                .symbols
                .iter()
                .enumerate()
                .filter(|(_, symbol)| rest.starts_with(symbol.as_slice()))
                .max_by_key(|(_, symbol)| symbol.len());
            match best {
                Some((index, symbol)) => {
                    out.push((index + self.first_code()) as u8);
                    i += symbol.len();
                }
                None => {
                    out.push(255);
                    out.push(input[i]);
                    i += 1;
                }
            }
        }
        out
    }

    pub fn compress<S: AsRef<str>>(&self, strings: &[S]) -> CompressedBatch {
        let mut lengths = Vec::with_capacity(strings.len());
        let mut data = Vec::new();
        for s in strings {
            let codes = self.encode(s.as_ref().as_bytes());
            lengths.push(codes.len());
            data.extend_from_slice(&codes);
        }
        CompressedBatch::new(lengths, data, self.table_bytes()).unwrap()
    }
}
