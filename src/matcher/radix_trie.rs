//! Compressed prefix tree over byte strings.
//!
//! Nodes live in a flat arena and refer to each other by index. A node holds a
//! byte fragment (single-child chains are merged into one fragment), a terminal
//! flag, and its children keyed by the first byte of their fragment.
//!
//! Matching is driven through a [`TriePointer`], a copyable `(node, offset)`
//! pair that can be resumed byte by byte without re-walking from the root.

/// Index of a node inside the trie arena.
type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct RadixNode {
    fragment: Vec<u8>,
    terminal: bool,
    /// Sorted by first fragment byte.
    children: Vec<(u8, NodeId)>,
}

/// Resumable position inside a [`RadixTrie`].
///
/// `offset` counts how many bytes of the node's fragment have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriePointer {
    node: NodeId,
    offset: usize,
}

impl TriePointer {
    /// Pointer at the root, before any byte has been consumed.
    pub const fn root() -> Self {
        Self {
            node: ROOT,
            offset: 0,
        }
    }
}

/// Radix trie built once from a set of byte strings.
#[derive(Debug, Clone)]
pub struct RadixTrie {
    nodes: Vec<RadixNode>,
    case_insensitive: bool,
    len: usize,
}

impl RadixTrie {
    /// Build a trie from the given keys.
    ///
    /// Empty keys are ignored; they can never match. With `case_insensitive`,
    /// ASCII letters are folded to lowercase on insert and on lookup.
    pub fn new<I, K>(keys: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut trie = Self {
            nodes: vec![RadixNode::default()],
            case_insensitive,
            len: 0,
        };
        for key in keys {
            let key = key.as_ref();
            if case_insensitive {
                trie.insert(&key.to_ascii_lowercase());
            } else {
                trie.insert(key);
            }
        }
        trie
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, key: &[u8]) {
        if key.is_empty() {
            return;
        }
        let mut node = ROOT;
        let mut rest = key;
        loop {
            if rest.is_empty() {
                if !self.nodes[node].terminal {
                    self.nodes[node].terminal = true;
                    self.len += 1;
                }
                return;
            }
            let Some(child) = self.child(node, rest[0]) else {
                let leaf = self.push(RadixNode {
                    fragment: rest.to_vec(),
                    terminal: true,
                    children: Vec::new(),
                });
                self.attach(node, rest[0], leaf);
                self.len += 1;
                return;
            };
            let common = common_prefix_len(&self.nodes[child].fragment, rest);
            if common < self.nodes[child].fragment.len() {
                self.split(child, common);
            }
            node = child;
            rest = &rest[common..];
        }
    }

    /// Split `node` so that its fragment ends after `at` bytes; the remainder
    /// moves into a new child that inherits the terminal flag and children.
    fn split(&mut self, node: NodeId, at: usize) {
        let suffix = self.nodes[node].fragment.split_off(at);
        let first = suffix[0];
        let tail = RadixNode {
            fragment: suffix,
            terminal: self.nodes[node].terminal,
            children: std::mem::take(&mut self.nodes[node].children),
        };
        let tail_id = self.push(tail);
        self.nodes[node].terminal = false;
        self.nodes[node].children = vec![(first, tail_id)];
    }

    fn push(&mut self, node: RadixNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, first: u8, child: NodeId) {
        let children = &mut self.nodes[parent].children;
        let pos = children.partition_point(|(byte, _)| *byte < first);
        children.insert(pos, (first, child));
    }

    fn child(&self, node: NodeId, byte: u8) -> Option<NodeId> {
        let children = &self.nodes[node].children;
        children
            .binary_search_by_key(&byte, |(first, _)| *first)
            .ok()
            .map(|idx| children[idx].1)
    }

    /// Advance the pointer by one byte; `None` once the bytes leave the trie.
    pub fn step(&self, pointer: TriePointer, byte: u8) -> Option<TriePointer> {
        let byte = if self.case_insensitive {
            byte.to_ascii_lowercase()
        } else {
            byte
        };
        let node = &self.nodes[pointer.node];
        if pointer.offset < node.fragment.len() {
            return (node.fragment[pointer.offset] == byte).then_some(TriePointer {
                node: pointer.node,
                offset: pointer.offset + 1,
            });
        }
        self.child(pointer.node, byte)
            .map(|child| TriePointer { node: child, offset: 1 })
    }

    /// Advance the pointer over every byte of `bytes`.
    pub fn step_all(&self, pointer: TriePointer, bytes: &[u8]) -> Option<TriePointer> {
        bytes
            .iter()
            .try_fold(pointer, |pointer, &byte| self.step(pointer, byte))
    }

    /// Whether the pointer sits exactly at the end of a stored key.
    pub fn is_terminal(&self, pointer: TriePointer) -> bool {
        let node = &self.nodes[pointer.node];
        node.terminal && pointer.offset == node.fragment.len()
    }

    /// Whether `key` is exactly one of the stored keys.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.step_all(TriePointer::root(), key)
            .is_some_and(|pointer| self.is_terminal(pointer))
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
