//! Static Huffman coding over the 256 byte values.
//!
//! A [`HuffmanCode`] is built from a frequency table with the greedy
//! algorithm; ties between equally weighted trees go to the tree holding the
//! smallest byte, so the same table always yields the same code. Encoded
//! output always ends with 1 to 8 bits of padding (a `1` then `0`s), which
//! makes it a whole number of bytes and lets the decoder find where the
//! codewords end.
//!
//! ```
//! use prefix_huffman::{HuffmanCode, count_occurrences, normalize};
//!
//! let freq = normalize(&count_occurrences(b"aaabc")).unwrap();
//! let code = HuffmanCode::new(&freq).unwrap();
//! let bits = code.encode(b"abcab").unwrap();
//! assert_eq!(code.decode(&bits).unwrap(), b"abcab");
//! ```

pub mod bits;
pub mod container;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod huffman;
pub mod tree;

pub use bits::{BitVec, padding_suitable_for, remove_padding};
pub use error::{ContainerError, Error, PayloadDefect, Result, TableDefect};
pub use frequency::{
    FrequencyTable, OccurrenceTable, SYMBOL_COUNT, count_occurrences, entropy, normalize,
};
pub use heap::MinTreeQueue;
pub use huffman::{CodeTable, FREQUENCY_SUM_TOLERANCE, HuffmanCode, build_prefix_tree};
pub use tree::{Key, PrefixTree};
