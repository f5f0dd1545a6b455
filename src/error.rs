//! Error types for code construction, encoding and decoding.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The frequency table handed to the code builder is unusable.
    #[error("invalid frequency table: {0}")]
    InvalidFrequencyTable(#[from] TableDefect),

    /// Every count in an occurrence table was zero, so it cannot be normalised.
    #[error("degenerate occurrence table: all counts are zero")]
    DegenerateTable,

    /// `pop_min` was called on an empty priority queue.
    #[error("pop from an empty priority queue")]
    EmptyQueue,

    /// The symbol has no leaf in the prefix tree.
    #[error("symbol {0:#04x} not found in prefix tree")]
    SymbolNotFound(u8),

    /// The bit sequence was not produced by this code.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] PayloadDefect),

    /// The byte container around a payload could not be parsed.
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
}

/// Reasons a frequency table is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum TableDefect {
    #[error("only {present} of 256 symbols present")]
    MissingSymbols { present: usize },

    #[error("symbol {symbol:#04x} has negative frequency {value}")]
    NegativeFrequency { symbol: u8, value: f64 },

    #[error("symbol {symbol:#04x} has a non-finite frequency")]
    NonFiniteFrequency { symbol: u8 },

    #[error("frequencies sum to {sum}, not 1.0 (tolerance {tolerance})")]
    BadSum { sum: f64, tolerance: f64 },
}

/// Reasons a payload fails to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadDefect {
    #[error("payload is empty")]
    Empty,

    #[error("payload length {len} is not a multiple of 8 bits")]
    NotByteAligned { len: usize },

    #[error("no padding marker found")]
    MissingPadding,

    #[error("{trailing_bits} trailing bits do not complete a codeword")]
    IncompleteCodeword { trailing_bits: usize },

    #[error("bit at position {position} leads nowhere in the tree")]
    UnexpectedBit { position: usize },
}

/// Container parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("container truncated: need at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("symbol {0:#04x} listed twice in header")]
    DuplicateSymbol(u8),

    #[error("header declares {0} entries, at most 256 allowed")]
    TooManyEntries(usize),

    #[error("symbol {0:#04x} listed with a zero count")]
    ZeroCount(u8),

    #[error("header counts overflow a 64-bit total")]
    CountOverflow,

    #[error("decoded bytes do not match the header's occurrence counts")]
    ContentMismatch,

    #[error("header lists no symbols but a payload follows")]
    UnexpectedPayload,
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
