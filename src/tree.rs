//! Huffman tree construction from symbol frequencies.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;

#[derive(Debug, PartialEq, Eq)]
pub enum NodeType {
    Leaf(char),
    Internal(Box<Node>, Box<Node>),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,
    pub freq: usize,
}

impl Node {
    fn new_leaf(symbol: char, freq: usize) -> Self {
        Node {
            node_type: NodeType::Leaf(symbol),
            freq,
        }
    }

    fn new_internal(left: Node, right: Node) -> Self {
        let freq = left.freq + right.freq;
        Node {
            node_type: NodeType::Internal(Box::new(left), Box::new(right)),
            freq,
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_type {
            NodeType::Leaf(_) => 1,
            NodeType::Internal(ln, rn) => ln.leaf_count() + rn.leaf_count(),
        }
    }
}

/// Heap slot: a subtree plus the order in which it entered the queue.
///
/// The heap pops the lowest weight first; among equal weights the most
/// recently inserted subtree wins. Leaves are inserted in first-appearance
/// order, merged nodes after them in creation order.
struct Pending {
    node: Node,
    seq: usize,
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .freq
            .cmp(&self.node.freq)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges the two lightest subtrees until a single root remains.
///
/// A one-symbol alphabet yields the bare leaf as root.
pub fn build(freqs: &FrequencyTable) -> Result<Node> {
    let mut pqueue = BinaryHeap::with_capacity(freqs.len());
    let mut seq = 0;
    for (symbol, freq) in freqs.iter() {
        pqueue.push(Pending {
            node: Node::new_leaf(symbol, freq),
            seq,
        });
        seq += 1;
    }

    loop {
        let Some(ln) = pqueue.pop() else {
            return Err(CodecError::EmptyInput);
        };
        let Some(rn) = pqueue.pop() else {
            debug!(
                "tree built: {} leaves, root weight {}",
                ln.node.leaf_count(),
                ln.node.freq
            );
            return Ok(ln.node);
        };

        trace!(
            "merge weights {} + {} (seq {} and {})",
            ln.node.freq, rn.node.freq, ln.seq, rn.seq
        );
        pqueue.push(Pending {
            node: Node::new_internal(ln.node, rn.node),
            seq,
        });
        seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbol(node: &Node) -> Option<char> {
        match node.node_type {
            NodeType::Leaf(symbol) => Some(symbol),
            NodeType::Internal(..) => None,
        }
    }

    fn is_full(node: &Node) -> bool {
        match &node.node_type {
            NodeType::Leaf(_) => true,
            NodeType::Internal(ln, rn) => {
                ln.freq + rn.freq == node.freq && is_full(ln) && is_full(rn)
            }
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(
            build(&FrequencyTable::default()),
            Err(CodecError::EmptyInput)
        );
    }

    #[test]
    fn single_symbol_root_is_leaf() {
        let root = build(&FrequencyTable::from_text("zzzz")).unwrap();
        assert_eq!(leaf_symbol(&root), Some('z'));
        assert_eq!(root.freq, 4);
    }

    #[test]
    fn lighter_subtree_goes_left() {
        let root = build(&FrequencyTable::from_text("aaab")).unwrap();
        let NodeType::Internal(ln, rn) = &root.node_type else {
            panic!("expected internal root");
        };
        assert_eq!(leaf_symbol(ln), Some('b'));
        assert_eq!(leaf_symbol(rn), Some('a'));
        assert_eq!(root.freq, 4);
    }

    #[test]
    fn equal_weights_take_latest_inserted_first() {
        // a, b, c, d all weigh 1: d and c merge first, then b and a.
        let root = build(&FrequencyTable::from_text("abcd")).unwrap();
        let NodeType::Internal(ln, rn) = &root.node_type else {
            panic!("expected internal root");
        };
        let NodeType::Internal(lln, lrn) = &ln.node_type else {
            panic!("expected internal left child");
        };
        let NodeType::Internal(rln, rrn) = &rn.node_type else {
            panic!("expected internal right child");
        };
        assert_eq!(leaf_symbol(lln), Some('b'));
        assert_eq!(leaf_symbol(lrn), Some('a'));
        assert_eq!(leaf_symbol(rln), Some('d'));
        assert_eq!(leaf_symbol(rrn), Some('c'));
    }

    #[test]
    fn tree_is_full_and_covers_alphabet() {
        let freqs = FrequencyTable::from_text("mississippi river");
        let root = build(&freqs).unwrap();
        assert!(is_full(&root));
        assert_eq!(root.leaf_count(), freqs.len());
        assert_eq!(root.freq, freqs.total());
    }
}
