//! Huffman tree construction and code derivation.
//!
//! Equal weights are resolved deterministically so that two encoders fed the
//! same bytes emit identical streams: leaves go before internal nodes, leaves
//! in ascending byte order, internal nodes in the order they were created.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use super::frequency::FrequencyTable;

/// Node of the encoder-side Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A byte value and its frequency.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Number of occurrences.
        weight: u64,
    },
    /// Two owned subtrees; weight is the sum of theirs.
    Internal {
        /// Combined weight of both children.
        weight: u64,
        /// Subtree reached by a `0` bit.
        zero: Box<HuffmanNode>,
        /// Subtree reached by a `1` bit.
        one: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    fn count(&self) -> (usize, usize) {
        match self {
            HuffmanNode::Leaf { .. } => (1, 0),
            HuffmanNode::Internal { zero, one, .. } => {
                let (zl, zi) = zero.count();
                let (ol, oi) = one.count();
                (zl + ol, zi + oi + 1)
            }
        }
    }
}

/// Queue entry: a subtree plus its tie-break key.
#[derive(Debug)]
struct Pending {
    order: u32,
    node: HuffmanNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare by weight, then by creation order for stability
        self.node
            .weight()
            .cmp(&other.node.weight())
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree built from byte frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`, or `None` if no byte was counted.
    ///
    /// The first node taken from the queue becomes the zero branch of the
    /// merged node and the second the one branch.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<Reverse<Pending>> = frequencies
            .iter()
            .map(|(symbol, weight)| {
                Reverse(Pending {
                    order: u32::from(symbol),
                    node: HuffmanNode::Leaf { symbol, weight },
                })
            })
            .collect();

        let mut next_order = 256u32;
        loop {
            let Reverse(zero) = heap.pop()?;
            let Some(Reverse(one)) = heap.pop() else {
                return Some(Self { root: zero.node });
            };

            let merged = HuffmanNode::Internal {
                weight: zero.node.weight() + one.node.weight(),
                zero: Box::new(zero.node),
                one: Box::new(one.node),
            };
            heap.push(Reverse(Pending {
                order: next_order,
                node: merged,
            }));
            next_order += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.count().0
    }

    /// Number of internal nodes.
    pub fn internal_count(&self) -> usize {
        self.root.count().1
    }
}

/// Mapping from byte value to its bit sequence.
///
/// Iteration is in ascending byte order, which is also the order entries are
/// written to the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Vec<bool>>,
}

impl CodeTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive codes by walking `tree` depth-first: `0` toward the zero
    /// child, `1` toward the one child.
    ///
    /// A tree that is a single leaf gets the one-bit code `0` so that every
    /// code is non-empty.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();
        match tree.root() {
            HuffmanNode::Leaf { symbol, .. } => {
                table.codes.insert(*symbol, vec![false]);
            }
            root => {
                let mut path = Vec::new();
                collect_codes(root, &mut path, &mut table.codes);
            }
        }
        table
    }

    /// Build the table for `frequencies` directly.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        HuffmanTree::build(frequencies)
            .map(|tree| Self::from_tree(&tree))
            .unwrap_or_default()
    }

    /// Set the code for `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, code: Vec<bool>) -> Option<Vec<bool>> {
        self.codes.insert(symbol, code)
    }

    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code, zero for an empty table.
    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns true if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order a prefix sorts directly before some code
        // it prefixes, so checking neighbours is enough.
        let mut sorted: Vec<&[bool]> = self.codes.values().map(Vec::as_slice).collect();
        sorted.sort_unstable();
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Dense lookup indexed by byte value.
    pub(crate) fn lookup(&self) -> Vec<Option<&[bool]>> {
        let mut lookup = vec![None; 256];
        for (symbol, code) in self.iter() {
            lookup[symbol as usize] = Some(code);
        }
        lookup
    }
}

fn collect_codes(node: &HuffmanNode, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Vec<bool>>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path.clone());
        }
        HuffmanNode::Internal { zero, one, .. } => {
            path.push(false);
            collect_codes(zero, path, codes);
            path.pop();
            path.push(true);
            collect_codes(one, path, codes);
            path.pop();
        }
    }
}
