use std::collections::HashMap;

use log::{debug, trace};

use crate::bits::{BitVec, padding_suitable_for, remove_padding};
use crate::error::{Error, PayloadDefect, Result};
use crate::frequency::{FrequencyTable, SYMBOL_COUNT, validate};
use crate::heap::MinTreeQueue;
use crate::tree::PrefixTree;

/// Allowed distance between a frequency table's sum and 1.0.
pub const FREQUENCY_SUM_TOLERANCE: f64 = 1e-9;

pub type CodeTable = HashMap<u8, BitVec>;

/// Runs the greedy Huffman construction over a validated table. Every one
/// of the 256 symbols gets a leaf, zero-frequency ones included.
pub fn build_prefix_tree(frequencies: &FrequencyTable, tolerance: f64) -> Result<PrefixTree> {
    validate(frequencies, tolerance)?;
    debug!(
        "Building Huffman Tree from {} symbols ({} with nonzero frequency)",
        frequencies.len(),
        frequencies.values().filter(|&&f| f > 0.0).count()
    );

    let mut heap = MinTreeQueue::with_capacity(SYMBOL_COUNT);
    for (&symbol, &freq) in frequencies {
        heap.push(PrefixTree::leaf(symbol, freq));
    }
    debug!("Initial heap size: {}", heap.size());

    while heap.size() > 1 {
        let t1 = heap.pop_min()?;
        let t2 = heap.pop_min()?;
        heap.push(PrefixTree::merge(t1, t2));
    }

    let tree = heap.pop_min()?;
    debug!("Tree construction complete. Depth: {}", tree.depth());
    Ok(tree)
}

fn build_code_table(node: &PrefixTree, prefix: BitVec, table: &mut CodeTable) {
    match node {
        PrefixTree::Leaf { symbol, .. } => {
            trace!(
                "Assigning code to byte {:#04x} ('{}') : '{}'",
                symbol,
                (*symbol as char).escape_default(),
                prefix
            );
            table.insert(*symbol, prefix);
        }
        PrefixTree::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_code_table(left, left_prefix, table);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_code_table(right, right_prefix, table);
        }
    }
}

/// An immutable Huffman code. Safe to share between threads for concurrent
/// `encode` / `decode` calls.
///
/// A tree made of a single leaf has no edges to follow; its symbol is given
/// the one-bit codeword `0`.
#[derive(Debug, Clone)]
pub struct HuffmanCode {
    tree: PrefixTree,
    table: CodeTable,
}

impl HuffmanCode {
    pub fn new(frequencies: &FrequencyTable) -> Result<Self> {
        Self::with_tolerance(frequencies, FREQUENCY_SUM_TOLERANCE)
    }

    pub fn with_tolerance(frequencies: &FrequencyTable, tolerance: f64) -> Result<Self> {
        let tree = build_prefix_tree(frequencies, tolerance)?;
        Ok(Self::from_tree(tree))
    }

    /// Wraps a caller-built tree, which need not contain every symbol.
    pub fn from_tree(tree: PrefixTree) -> Self {
        let mut table = CodeTable::new();
        match &tree {
            PrefixTree::Leaf { symbol, .. } => {
                table.insert(*symbol, BitVec::from("0"));
            }
            PrefixTree::Internal { .. } => build_code_table(&tree, BitVec::new(), &mut table),
        }
        debug!("Code table built with {} entries", table.len());
        HuffmanCode { tree, table }
    }

    pub fn tree(&self) -> &PrefixTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Searches the tree for `symbol` and returns its root-to-leaf path.
    pub fn codeword_for(&self, symbol: u8) -> Result<BitVec> {
        match &self.tree {
            PrefixTree::Leaf { symbol: s, .. } if *s == symbol => Ok(BitVec::from("0")),
            tree => tree.path_to(symbol).ok_or(Error::SymbolNotFound(symbol)),
        }
    }

    /// Concatenates the codewords of `plaintext` and appends padding, so the
    /// result is always a whole, nonzero number of bytes.
    pub fn encode(&self, plaintext: &[u8]) -> Result<BitVec> {
        let mut bits = BitVec::with_capacity(plaintext.len() * 8 + 8);
        for &b in plaintext {
            let code = self.table.get(&b).ok_or(Error::SymbolNotFound(b))?;
            bits.extend_from(code);
        }
        let unpadded = bits.len();
        bits.extend_from(&padding_suitable_for(&bits));

        debug!(
            "Encoded {} bytes into {} bits ({} padding)",
            plaintext.len(),
            bits.len(),
            bits.len() - unpadded
        );
        Ok(bits)
    }

    pub fn decode(&self, payload: &BitVec) -> Result<Vec<u8>> {
        if payload.is_empty() {
            return Err(PayloadDefect::Empty.into());
        }
        if !payload.is_byte_aligned() {
            return Err(PayloadDefect::NotByteAligned { len: payload.len() }.into());
        }
        let bits = remove_padding(payload)?;
        trace!("Decoding {} codeword bits", bits.len());

        if let PrefixTree::Leaf { symbol, .. } = &self.tree {
            return match bits.iter().position(|bit| bit) {
                Some(position) => Err(PayloadDefect::UnexpectedBit { position }.into()),
                None => Ok(vec![*symbol; bits.len()]),
            };
        }

        let mut result = Vec::new();
        let mut node = &self.tree;
        let mut pending = 0;
        for bit in bits.iter() {
            if let PrefixTree::Internal { left, right, .. } = node {
                node = if bit { right } else { left };
            }
            pending += 1;
            if let PrefixTree::Leaf { symbol, .. } = node {
                result.push(*symbol);
                node = &self.tree;
                pending = 0;
            }
        }
        if pending > 0 {
            return Err(PayloadDefect::IncompleteCodeword {
                trailing_bits: pending,
            }
            .into());
        }

        debug!("Decoded {} bits into {} bytes", payload.len(), result.len());
        Ok(result)
    }

    /// Expected codeword length under `frequencies`, in bits per symbol.
    pub fn average_code_length(&self, frequencies: &FrequencyTable) -> f64 {
        self.table
            .iter()
            .map(|(symbol, code)| {
                frequencies.get(symbol).copied().unwrap_or(0.0) * code.len() as f64
            })
            .sum()
    }
}
