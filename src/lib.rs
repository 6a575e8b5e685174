//! Lossless text compression with a Huffman prefix code.
//!
//! ```
//! use huffpack::Huffman;
//!
//! let huffman = Huffman::from_text("aaab")?;
//! let packed = huffman.encode("aaab")?;
//! assert_eq!(packed, [0b0000_0100, 0b1110_0000]);
//! assert_eq!(huffman.decode(&packed)?, "aaab");
//! # Ok::<(), huffpack::CodecError>(())
//! ```
//!
//! The packed form carries only the padding length, not the code table:
//! decoding needs the same [`CodeTable`] the text was encoded with.

pub mod bits;
pub mod code;
pub mod codec;
pub mod error;
pub mod files;
pub mod frequency;
pub mod tree;

pub use code::CodeTable;
pub use codec::{Huffman, decode, encode};
pub use error::CodecError;
pub use frequency::FrequencyTable;
