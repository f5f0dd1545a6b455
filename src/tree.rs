use std::cmp::Ordering;

use crate::bits::BitVec;

/// Priority of a tree during greedy construction: aggregate weight first,
/// then the smallest symbol the tree contains.
#[derive(Debug, Clone, Copy)]
pub struct Key {
    pub weight: f64,
    pub min_symbol: u8,
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.min_symbol.cmp(&other.min_symbol))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

/// A full binary tree whose leaves carry the symbols. Going left is a `0`
/// bit, going right a `1`.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefixTree {
    Leaf {
        symbol: u8,
        weight: f64,
    },
    Internal {
        weight: f64,
        left: Box<PrefixTree>,
        right: Box<PrefixTree>,
    },
}

impl PrefixTree {
    /// `-0.0` is stored as `0.0` so it ties with zero-weight leaves.
    pub fn leaf(symbol: u8, weight: f64) -> Self {
        PrefixTree::Leaf {
            symbol,
            weight: weight + 0.0,
        }
    }

    /// Joins two trees under a new root. The tree with the lower key goes
    /// on the left.
    pub fn merge(a: PrefixTree, b: PrefixTree) -> Self {
        let (left, right) = if a.key() <= b.key() { (a, b) } else { (b, a) };
        PrefixTree::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            PrefixTree::Leaf { weight, .. } => *weight,
            PrefixTree::Internal { weight, .. } => *weight,
        }
    }

    pub fn min_symbol(&self) -> u8 {
        match self {
            PrefixTree::Leaf { symbol, .. } => *symbol,
            PrefixTree::Internal { left, right, .. } => left.min_symbol().min(right.min_symbol()),
        }
    }

    pub fn key(&self) -> Key {
        Key {
            weight: self.weight() + 0.0,
            min_symbol: self.min_symbol(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PrefixTree::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            PrefixTree::Leaf { symbol, .. } => Some(*symbol),
            PrefixTree::Internal { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            PrefixTree::Leaf { .. } => 1,
            PrefixTree::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            PrefixTree::Leaf { .. } => 0,
            PrefixTree::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Root-to-leaf path of `symbol`, or `None` if no leaf holds it.
    ///
    /// A tree that is a single leaf has no edges; callers decide how to
    /// represent that case (see `HuffmanCode`).
    pub fn path_to(&self, symbol: u8) -> Option<BitVec> {
        let mut path = BitVec::new();
        if self.search(symbol, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn search(&self, symbol: u8, path: &mut BitVec) -> bool {
        match self {
            PrefixTree::Leaf { symbol: s, .. } => *s == symbol,
            PrefixTree::Internal { left, right, .. } => {
                path.push(false);
                if left.search(symbol, path) {
                    return true;
                }
                path.pop();
                path.push(true);
                if right.search(symbol, path) {
                    return true;
                }
                path.pop();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_key() {
        let leaf = PrefixTree::leaf(b'x', 0.25);
        assert!(leaf.is_leaf());
        assert_eq!(
            leaf.key(),
            Key {
                weight: 0.25,
                min_symbol: b'x'
            }
        );
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let neg = PrefixTree::leaf(200, -0.0);
        assert!(neg.weight().is_sign_positive());
        assert_eq!(neg.key(), PrefixTree::leaf(200, 0.0).key());

        let raw = PrefixTree::Leaf {
            symbol: 9,
            weight: -0.0,
        };
        assert!(PrefixTree::leaf(3, 0.0).key() < raw.key());
    }

    #[test]
    fn test_merge_orders_children_by_key() {
        let heavy = PrefixTree::leaf(1, 0.5);
        let light = PrefixTree::leaf(9, 0.1);
        let tree = PrefixTree::merge(heavy, light);

        match &tree {
            PrefixTree::Internal { left, right, weight } => {
                assert_eq!(left.symbol(), Some(9));
                assert_eq!(right.symbol(), Some(1));
                assert!((weight - 0.6).abs() < 1e-12);
            }
            PrefixTree::Leaf { .. } => panic!("merge produced a leaf"),
        }
        assert_eq!(tree.min_symbol(), 1);
    }

    #[test]
    fn test_merge_ties_broken_by_min_symbol() {
        let tree = PrefixTree::merge(PrefixTree::leaf(200, 0.0), PrefixTree::leaf(3, 0.0));
        assert_eq!(tree.path_to(3), Some(BitVec::from("0")));
        assert_eq!(tree.path_to(200), Some(BitVec::from("1")));
    }

    #[test]
    fn test_internal_key_uses_subtree_minimum() {
        let ab = PrefixTree::merge(PrefixTree::leaf(40, 0.2), PrefixTree::leaf(7, 0.3));
        let c = PrefixTree::leaf(5, 0.5);
        assert_eq!(ab.key().min_symbol, 7);
        // Equal weights: the leaf holding 5 wins the tie.
        assert!(c.key() < ab.key());
    }

    #[test]
    fn test_path_to() {
        let ab = PrefixTree::merge(PrefixTree::leaf(b'a', 0.1), PrefixTree::leaf(b'b', 0.2));
        let tree = PrefixTree::merge(ab, PrefixTree::leaf(b'c', 0.7));

        assert_eq!(tree.path_to(b'a'), Some(BitVec::from("00")));
        assert_eq!(tree.path_to(b'b'), Some(BitVec::from("01")));
        assert_eq!(tree.path_to(b'c'), Some(BitVec::from("1")));
        assert_eq!(tree.path_to(b'z'), None);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_single_leaf_path_is_empty() {
        let leaf = PrefixTree::leaf(0, 1.0);
        assert_eq!(leaf.path_to(0), Some(BitVec::new()));
        assert_eq!(leaf.depth(), 0);
    }
}
