//! Typed failures of the codec.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("input is empty, no code table can be built")]
    EmptyInput,
    #[error("symbol {0:?} has no entry in the code table")]
    UnknownSymbol(char),
    #[error("code {code:?} is assigned to both {first:?} and {second:?}")]
    AmbiguousCodeTable {
        code: String,
        first: char,
        second: char,
    },
    #[error("code {code:?} for {symbol:?} is not a non-empty string of 0s and 1s")]
    InvalidCode { symbol: char, code: String },
    #[error("undecodable stream: {0}")]
    UndecodableStream(String),
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
