//! Code assignment: the prefix code derived from a Huffman tree.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

use crate::error::{CodecError, Result};
use crate::tree::{Node, NodeType};

/// Symbol to bit-string mapping, each code spelled with `'0'` and `'1'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Walks the tree, appending `0` for a left edge and `1` for a right one.
    ///
    /// A root that is itself a leaf gets the code `"0"`: an empty code
    /// could never be read back.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = BTreeMap::new();
        match &root.node_type {
            NodeType::Leaf(symbol) => {
                trace!("code {:?} -> 0 (single-symbol alphabet)", symbol);
                codes.insert(*symbol, String::from("0"));
            }
            NodeType::Internal(..) => fill(root, String::new(), &mut codes),
        }
        debug!("assigned {} codes", codes.len());
        Self { codes }
    }

    /// Builds a table from codes supplied out of band.
    ///
    /// Every code must be at least one bit long and spelled with `'0'` and
    /// `'1'` only.
    pub fn from_codes<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (symbol, code) in codes {
            let code: String = code.into();
            if code.is_empty() || !code.bytes().all(|bit| bit == b'0' || bit == b'1') {
                return Err(CodecError::InvalidCode { symbol, code });
            }
            table.insert(symbol, code);
        }
        Ok(Self { codes: table })
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Entries sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(c, code)| (*c, code.as_str()))
    }

    /// True when no code is a prefix of another symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        // a prefix always sorts directly before some word it prefixes
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Char: Huffman code")?;
        writeln!(f)?;
        for (symbol, code) in self.iter() {
            writeln!(f, " {:<8}: {:>12}", format!("{:?}", symbol), code)?;
        }
        Ok(())
    }
}

fn fill(node: &Node, code: String, codes: &mut BTreeMap<char, String>) {
    match &node.node_type {
        NodeType::Leaf(symbol) => {
            trace!("code {:?} -> {} (freq: {})", symbol, code, node.freq);
            let _ = codes.insert(*symbol, code);
        }
        NodeType::Internal(ln, rn) => {
            fill(ln, format!("{}0", code), codes);
            fill(rn, format!("{}1", code), codes);
        }
    }
}
