//! Bit-level packing, most significant bit first within each byte.

use crate::error::{CodecError, Result};

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_count % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - offset);
            }
        }
        self.bit_count += 1;
    }

    /// Writes the low `count` bits of `value`, high bit first.
    pub fn write(&mut self, value: u32, count: u32) {
        for pos in (0..count).rev() {
            self.push_bit((value >> pos) & 1 == 1);
        }
    }

    /// Appends a code spelled as `'0'`/`'1'` characters.
    pub fn push_code(&mut self, code: &str) {
        for bit in code.bytes() {
            debug_assert!(bit == b'0' || bit == b'1', "non-binary code {:?}", code);
            self.push_bit(bit == b'1');
        }
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Returns the packed bytes; a partial final byte is zero-filled.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit_pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.bit_pos
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        let Some(byte) = self.bytes.get(self.bit_pos / 8) else {
            return Err(CodecError::UndecodableStream(format!(
                "unexpected end of stream: total bytes - {}, bit_pos - {}",
                self.bytes.len(),
                self.bit_pos
            )));
        };
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1 == 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Reads `need` bits (at most 32) as an unsigned big-endian value.
    pub fn read(&mut self, need: u32) -> Result<u32> {
        if need as usize > self.remaining() {
            return Err(CodecError::UndecodableStream(format!(
                "unexpected end of stream: need {} bits, {} left",
                need,
                self.remaining()
            )));
        }
        let mut val = 0u32;
        for _ in 0..need {
            val = (val << 1) | self.read_bit()? as u32;
        }
        Ok(val)
    }
}
