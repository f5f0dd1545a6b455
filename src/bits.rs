//! Bit sequences and the reversible padding scheme.
//!
//! Bits are packed MSB-first: bit 0 of the sequence is the most significant
//! bit of the first byte. Unused bits in the last byte are always zero, so two
//! sequences with the same bits compare equal.

use std::fmt;

use log::trace;

use crate::error::{PayloadDefect, Result};

#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitVec {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Wraps whole bytes; the resulting length is `8 * bytes.len()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BitVec {
            bytes: bytes.to_vec(),
            bit_count: bytes.len() * 8,
        }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_count % 8 == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    pub fn pop(&mut self) -> Option<bool> {
        if self.bit_count == 0 {
            return None;
        }
        let bit = self.get(self.bit_count - 1)?;
        self.bit_count -= 1;

        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;
        if bit_offset == 0 {
            self.bytes.truncate(byte_index);
        } else {
            self.bytes[byte_index] &= !(1 << (7 - bit_offset));
        }
        Some(bit)
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn extend_from(&mut self, other: &BitVec) {
        self.bytes.reserve(other.bytes.len());
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// True iff `self` is a (possibly equal) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.len() <= other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bytes[i / 8] & (1 << (7 - i % 8)) != 0)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVec::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl From<&str> for BitVec {
    /// Parses a string of `0`/`1` characters; any other character is skipped.
    fn from(text: &str) -> Self {
        text.chars()
            .filter(|c| *c == '0' || *c == '1')
            .map(|c| c == '1')
            .collect()
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVec({}b: {})", self.bit_count, self)
    }
}

/// Returns the 1 to 8 bits of padding that bring `bits` to a whole number of
/// bytes: a single `1` followed by as many `0`s as needed.
pub fn padding_suitable_for(bits: &BitVec) -> BitVec {
    let pad_len = 8 - bits.len() % 8;
    let mut padding = BitVec::with_capacity(pad_len);
    padding.push(true);
    for _ in 1..pad_len {
        padding.push(false);
    }
    padding
}

/// Strips the padding added by [`padding_suitable_for`]: every trailing `0`,
/// then the `1` marker before them.
pub fn remove_padding(bits: &BitVec) -> Result<BitVec> {
    let mut stripped = bits.clone();
    let mut zeros = 0;
    loop {
        match stripped.pop() {
            Some(false) => {
                zeros += 1;
                if zeros > 7 {
                    return Err(PayloadDefect::MissingPadding.into());
                }
            }
            Some(true) => break,
            None => return Err(PayloadDefect::MissingPadding.into()),
        }
    }
    trace!("Removed {} padding bits", zeros + 1);
    Ok(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_push_is_msb_first() {
        let bits = BitVec::from("10110");
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.as_bytes(), &[0b1011_0000]);
        assert_eq!(bits.to_string(), "10110");
    }

    #[test]
    fn test_pop_clears_bits() {
        let mut bits = BitVec::from("111111111");
        assert_eq!(bits.pop(), Some(true));
        assert_eq!(bits.as_bytes(), &[0xff]);
        assert_eq!(bits.pop(), Some(true));
        assert_eq!(bits, BitVec::from("1111111"));
        assert_eq!(bits.as_bytes(), &[0b1111_1110]);
    }

    #[test]
    fn test_pop_empty() {
        assert_eq!(BitVec::new().pop(), None);
    }

    #[test]
    fn test_prefix() {
        assert!(BitVec::from("10").is_prefix_of(&BitVec::from("101")));
        assert!(BitVec::from("").is_prefix_of(&BitVec::from("0")));
        assert!(!BitVec::from("11").is_prefix_of(&BitVec::from("101")));
        assert!(!BitVec::from("1010").is_prefix_of(&BitVec::from("101")));
    }

    #[test]
    fn test_padding_lengths() {
        for len in 0..32 {
            let bits: BitVec = (0..len).map(|i| i % 3 == 0).collect();
            let padding = padding_suitable_for(&bits);
            assert!((1..=8).contains(&padding.len()));
            assert_eq!((bits.len() + padding.len()) % 8, 0);
            assert_eq!(padding.get(0), Some(true));
            assert!(padding.iter().skip(1).all(|b| !b));
        }
    }

    #[test]
    fn test_padding_on_aligned_input_is_full_byte() {
        let bits = BitVec::from("01010101");
        assert_eq!(padding_suitable_for(&bits), BitVec::from("10000000"));
        assert_eq!(padding_suitable_for(&BitVec::new()), BitVec::from("10000000"));
    }

    #[test]
    fn test_remove_padding_inverts() {
        for text in ["", "0", "1", "0110", "0000000", "10000000", "110100111"] {
            let bits = BitVec::from(text);
            let mut padded = bits.clone();
            padded.extend_from(&padding_suitable_for(&bits));
            assert!(padded.is_byte_aligned());
            assert_eq!(remove_padding(&padded).unwrap(), bits);
        }
    }

    #[test]
    fn test_remove_padding_rejects_missing_marker() {
        let err = remove_padding(&BitVec::from("00000000")).unwrap_err();
        assert_eq!(err, Error::from(PayloadDefect::MissingPadding));

        let err = remove_padding(&BitVec::from("1000000000000000")).unwrap_err();
        assert_eq!(err, Error::from(PayloadDefect::MissingPadding));
    }
}
