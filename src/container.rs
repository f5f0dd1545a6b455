//! Byte container pairing a payload with the occurrence table it was coded
//! against, so a decoder can rebuild the identical code.
//!
//! Layout (big-endian):
//! - entry count `n` (2B), at most 256
//! - `n` pairs of [symbol (1B)] + [count (8B)], nonzero counts only,
//!   heaviest first
//! - padded payload

use log::{debug, trace, warn};

use crate::bits::BitVec;
use crate::error::{ContainerError, Result};
use crate::frequency::{
    OccurrenceTable, SYMBOL_COUNT, count_occurrences, empty_occurrences, normalize,
};
use crate::huffman::HuffmanCode;

const ENTRY_SIZE: usize = 1 + 8;
const COUNT_SIZE: usize = 2;

pub fn encode_occurrences(occurrences: &OccurrenceTable) -> Vec<u8> {
    let mut sorted: Vec<(u8, u64)> = occurrences
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(&s, &c)| (s, c))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut bytes = Vec::with_capacity(COUNT_SIZE + sorted.len() * ENTRY_SIZE);
    bytes.extend_from_slice(&(sorted.len() as u16).to_be_bytes());
    for (symbol, count) in sorted {
        bytes.push(symbol);
        bytes.extend_from_slice(&count.to_be_bytes());
    }
    debug!("Header generated. Total header size: {} bytes", bytes.len());
    bytes
}

/// Parses the header at the front of `bytes`, returning the full 256-entry
/// table and the number of bytes consumed.
pub fn decode_occurrences(bytes: &[u8]) -> Result<(OccurrenceTable, usize)> {
    if bytes.len() < COUNT_SIZE {
        return Err(ContainerError::Truncated {
            needed: COUNT_SIZE,
            actual: bytes.len(),
        }
        .into());
    }
    let entries = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    if entries > SYMBOL_COUNT {
        return Err(ContainerError::TooManyEntries(entries).into());
    }
    let header_size = COUNT_SIZE + entries * ENTRY_SIZE;
    if bytes.len() < header_size {
        return Err(ContainerError::Truncated {
            needed: header_size,
            actual: bytes.len(),
        }
        .into());
    }

    let mut table = empty_occurrences();
    let mut total: u64 = 0;
    for entry in bytes[COUNT_SIZE..header_size].chunks_exact(ENTRY_SIZE) {
        let symbol = entry[0];
        let mut count_bytes = [0u8; 8];
        count_bytes.copy_from_slice(&entry[1..]);
        let count = u64::from_be_bytes(count_bytes);
        if count == 0 {
            return Err(ContainerError::ZeroCount(symbol).into());
        }

        let slot = table.entry(symbol).or_insert(0);
        if *slot != 0 {
            return Err(ContainerError::DuplicateSymbol(symbol).into());
        }
        *slot = count;
        total = total.checked_add(count).ok_or(ContainerError::CountOverflow)?;
        trace!("Decoded header entry: byte {:#04x} with count {}", symbol, count);
    }

    debug!("Reconstructed occurrence table from {} entries", entries);
    Ok((table, header_size))
}

/// Counts, codes and encodes `plaintext`, returning header plus payload.
pub fn pack(plaintext: &[u8]) -> Result<Vec<u8>> {
    let occurrences = count_occurrences(plaintext);
    let mut bytes = encode_occurrences(&occurrences);
    if plaintext.is_empty() {
        warn!("Empty input: writing header only");
        return Ok(bytes);
    }

    let code = HuffmanCode::new(&normalize(&occurrences)?)?;
    let payload = code.encode(plaintext)?;
    bytes.extend_from_slice(payload.as_bytes());
    Ok(bytes)
}

pub fn unpack(bytes: &[u8]) -> Result<Vec<u8>> {
    let (occurrences, header_size) = decode_occurrences(bytes)?;
    let body = &bytes[header_size..];
    debug!("Encoded data body size: {} bytes", body.len());

    if occurrences.values().all(|&c| c == 0) {
        if !body.is_empty() {
            return Err(ContainerError::UnexpectedPayload.into());
        }
        return Ok(Vec::new());
    }

    let code = HuffmanCode::new(&normalize(&occurrences)?)?;
    let decoded = code.decode(&BitVec::from_bytes(body))?;
    if count_occurrences(&decoded) != occurrences {
        return Err(ContainerError::ContentMismatch.into());
    }
    Ok(decoded)
}
