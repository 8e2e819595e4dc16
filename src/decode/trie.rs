//! Decoding trie rebuilt from a code table.
//!
//! Nodes live in a flat arena and refer to their children by index. The root
//! is always node 0.

use crate::compress::huffman::CodeTable;
use crate::error::{Error, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<usize>; 2],
    symbol: Option<u8>,
}

impl TrieNode {
    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// Result of following one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to an inner node; keep reading bits from here.
    Inner(usize),
    /// Reached a leaf; the walk restarts at the root.
    Symbol(u8),
}

/// Binary trie mapping bit paths to symbols.
#[derive(Debug, Clone)]
pub struct DecodingTrie {
    nodes: Vec<TrieNode>,
}

impl DecodingTrie {
    /// Insert every code of `table`, creating inner nodes on demand.
    ///
    /// Fails if a code is empty or if one code is a prefix of another.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
        };
        for (symbol, code) in table.iter() {
            trie.insert(symbol, code)?;
        }
        Ok(trie)
    }

    fn insert(&mut self, symbol: u8, code: &[bool]) -> Result<()> {
        if code.is_empty() {
            return Err(Error::InvalidCodeTable(format!(
                "symbol {symbol:#04x} has an empty code"
            )));
        }

        let mut current = ROOT;
        for &bit in code {
            if let Some(owner) = self.nodes[current].symbol {
                return Err(prefix_conflict(owner, symbol));
            }
            current = match self.nodes[current].children[bit as usize] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children[bit as usize] = Some(child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        if let Some(owner) = node.symbol {
            return Err(prefix_conflict(owner, symbol));
        }
        if node.has_children() {
            return Err(Error::InvalidCodeTable(format!(
                "code of symbol {symbol:#04x} is a prefix of another code"
            )));
        }
        node.symbol = Some(symbol);
        Ok(())
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        ROOT
    }

    /// Follow `bit` from `node`.
    ///
    /// Fails with [`Error::CorruptData`] if no code continues that way.
    #[inline]
    pub fn step(&self, node: usize, bit: bool) -> Result<Step> {
        let child = self.nodes[node].children[bit as usize]
            .ok_or_else(|| Error::CorruptData("bit sequence matches no code".into()))?;
        match self.nodes[child].symbol {
            Some(symbol) => Ok(Step::Symbol(symbol)),
            None => Ok(Step::Inner(child)),
        }
    }

    /// Returns true if the table the trie was built from had no entries.
    pub fn is_empty(&self) -> bool {
        !self.nodes[ROOT].has_children()
    }
}

fn prefix_conflict(first: u8, second: u8) -> Error {
    Error::InvalidCodeTable(format!(
        "codes of symbols {first:#04x} and {second:#04x} are not prefix-free"
    ))
}
