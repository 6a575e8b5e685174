//! Packing a text into the padded bitstream and reading it back.

use std::collections::HashMap;

use log::debug;

use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree;

/// Width of the padding-length header at the start of every payload.
pub const HEADER_BITS: u32 = 8;

/// Code table derived from a whole text, ready to pack and unpack it.
#[derive(Debug, Clone)]
pub struct Huffman {
    freqs: FrequencyTable,
    codes: CodeTable,
}

impl Huffman {
    pub fn from_text(input: &str) -> Result<Self> {
        let freqs = FrequencyTable::try_from_text(input)?;
        let root = tree::build(&freqs)?;
        let codes = CodeTable::from_tree(&root);
        Ok(Self { freqs, codes })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn encode(&self, input: &str) -> Result<Vec<u8>> {
        encode(&self.codes, input)
    }

    pub fn decode(&self, packed: &[u8]) -> Result<String> {
        decode(packed, &self.codes)
    }
}

/// Number of zero bits appended after `bit_len` payload bits.
///
/// Always 1..=8: a payload that already fills whole bytes still gets a
/// full byte of padding.
pub fn padding_for(bit_len: usize) -> u32 {
    8 - (bit_len % 8) as u32
}

/// Packs `input` as `[pad: 8 bits][codes...][pad zero bits]`.
pub fn encode(table: &CodeTable, input: &str) -> Result<Vec<u8>> {
    let codes = input
        .chars()
        .map(|symbol| table.get(symbol).ok_or(CodecError::UnknownSymbol(symbol)))
        .collect::<Result<Vec<&str>>>()?;

    let bit_len: usize = codes.iter().map(|code| code.len()).sum();
    let pad = padding_for(bit_len);

    let mut writer = BitWriter::with_capacity(HEADER_BITS as usize + bit_len + pad as usize);
    writer.write(pad, HEADER_BITS);
    for code in codes {
        writer.push_code(code);
    }
    writer.write(0, pad);

    debug!(
        "encoded {} symbols into {} bits (+{} padding)",
        input.chars().count(),
        bit_len,
        pad
    );
    Ok(writer.into_bytes())
}

fn inverse(table: &CodeTable) -> Result<HashMap<&str, char>> {
    let mut lookup = HashMap::with_capacity(table.len());
    for (symbol, code) in table.iter() {
        if let Some(first) = lookup.insert(code, symbol) {
            return Err(CodecError::AmbiguousCodeTable {
                code: code.to_string(),
                first,
                second: symbol,
            });
        }
    }
    Ok(lookup)
}

/// Reverses [`encode`]; `table` must be the one the payload was packed with.
pub fn decode(packed: &[u8], table: &CodeTable) -> Result<String> {
    let lookup = inverse(table)?;
    let max_len = table.max_code_len();

    if packed.is_empty() {
        return Err(CodecError::UndecodableStream(
            "missing padding header".to_string(),
        ));
    }

    let mut reader = BitReader::new(packed);
    let pad = reader.read(HEADER_BITS)? as usize;
    if pad > 8 || pad > reader.remaining() {
        return Err(CodecError::UndecodableStream(format!(
            "padding length {} does not fit a {}-bit payload",
            pad,
            reader.remaining()
        )));
    }
    let data_bits = reader.remaining() - pad;

    let mut decoded = String::new();
    let mut candidate = String::with_capacity(max_len);
    for _ in 0..data_bits {
        candidate.push(if reader.read_bit()? { '1' } else { '0' });
        if let Some(&symbol) = lookup.get(candidate.as_str()) {
            decoded.push(symbol);
            candidate.clear();
        } else if candidate.len() >= max_len {
            return Err(CodecError::UndecodableStream(format!(
                "bits {} match no code after {} symbols",
                candidate,
                decoded.chars().count()
            )));
        }
    }

    if !candidate.is_empty() {
        return Err(CodecError::UndecodableStream(format!(
            "stream ends inside a code ({} pending bits)",
            candidate.len()
        )));
    }
    for _ in 0..pad {
        if reader.read_bit()? {
            return Err(CodecError::UndecodableStream(
                "non-zero padding bits".to_string(),
            ));
        }
    }

    debug!("decoded {} symbols", decoded.chars().count());
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_symbol_payload_layout() {
        let huffman = Huffman::from_text("aaab").unwrap();
        let packed = huffman.encode("aaab").unwrap();
        // 00000100 | 1110 0000
        assert_eq!(packed, vec![0b0000_0100, 0b1110_0000]);
        assert_eq!(huffman.decode(&packed).unwrap(), "aaab");
    }

    #[test]
    fn byte_aligned_payload_gets_full_padding_byte() {
        assert_eq!(padding_for(0), 8);
        assert_eq!(padding_for(8), 8);
        assert_eq!(padding_for(13), 3);

        let huffman = Huffman::from_text("abcd").unwrap();
        let packed = huffman.encode("abcd").unwrap();
        assert_eq!(packed, vec![8, 0b0100_1110, 0]);
        assert_eq!(huffman.decode(&packed).unwrap(), "abcd");
    }

    #[test]
    fn single_symbol_roundtrip() {
        let huffman = Huffman::from_text("zzzz").unwrap();
        let packed = huffman.encode("zzzz").unwrap();
        assert_eq!(packed, vec![4, 0]);
        assert_eq!(huffman.decode(&packed).unwrap(), "zzzz");
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert_eq!(Huffman::from_text("").unwrap_err(), CodecError::EmptyInput);
    }

    #[test]
    fn empty_text_with_existing_table() {
        let huffman = Huffman::from_text("ab").unwrap();
        let packed = huffman.encode("").unwrap();
        assert_eq!(packed, vec![8, 0]);
        assert_eq!(huffman.decode(&packed).unwrap(), "");
    }

    #[test]
    fn unknown_symbol() {
        let huffman = Huffman::from_text("aaab").unwrap();
        assert_eq!(huffman.encode("abc"), Err(CodecError::UnknownSymbol('c')));
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let table = CodeTable::from_codes([('a', "0"), ('b', "1"), ('c', "1")]).unwrap();
        assert_eq!(
            decode(&[7, 0], &table),
            Err(CodecError::AmbiguousCodeTable {
                code: "1".to_string(),
                first: 'b',
                second: 'c',
            })
        );
    }

    #[test]
    fn missing_header() {
        let table = CodeTable::from_codes([('a', "0")]).unwrap();
        assert!(matches!(
            decode(&[], &table),
            Err(CodecError::UndecodableStream(_))
        ));
    }

    #[test]
    fn padding_longer_than_payload() {
        let table = CodeTable::from_codes([('a', "0"), ('b', "1")]).unwrap();
        assert!(matches!(
            decode(&[8], &table),
            Err(CodecError::UndecodableStream(_))
        ));
        assert!(matches!(
            decode(&[9, 0, 0], &table),
            Err(CodecError::UndecodableStream(_))
        ));
    }

    #[test]
    fn stream_ending_inside_code() {
        let table = CodeTable::from_codes([('a', "00"), ('b', "01"), ('c', "1")]).unwrap();
        // pad 7 leaves a single data bit "0"
        assert!(matches!(
            decode(&[7, 0], &table),
            Err(CodecError::UndecodableStream(_))
        ));
    }

    #[test]
    fn non_zero_padding() {
        let table = CodeTable::from_codes([('a', "0"), ('b', "1")]).unwrap();
        assert_eq!(decode(&[4, 0b0000_0000], &table).unwrap(), "aaaa");
        assert!(matches!(
            decode(&[4, 0b0000_0001], &table),
            Err(CodecError::UndecodableStream(_))
        ));
    }

    #[test]
    fn foreign_table_fails() {
        let source = Huffman::from_text("hello world").unwrap();
        let packed = source.encode("hello world").unwrap();
        let other = Huffman::from_text("zzzz").unwrap();
        assert!(matches!(
            other.decode(&packed),
            Err(CodecError::UndecodableStream(_))
        ));
    }
}
