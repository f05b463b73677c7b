//! The owned document tree.
//!
//! A [`Node`] is one tagged element of a decoded or hand-built document.
//! Containers own their children; dropping a node drops its whole
//! subtree. Maps are insertion-ordered lists of `(key, value)` pairs
//! whose keys are themselves nodes of any kind, although the by-name
//! lookup API assumes string keys.
//!
//! # Example
//!
//! ```
//! use mpdoc::Node;
//!
//! let mut map = Node::map();
//! map.insert("answer", Node::from(42)).unwrap();
//! map.insert("label", Node::from("forty-two")).unwrap();
//!
//! assert_eq!(map.get_key("answer").and_then(Node::as_i64), Some(42));
//! assert_eq!(map.len(), 2);
//! ```

use crate::error::{Error, Result};
use crate::tag::Kind;

/// A 64-bit integer as decoded from the wire.
///
/// MessagePack distinguishes `uint 64` from `int 64`; values above
/// `i64::MAX` keep the unsigned arm. Construction normalizes everything
/// else into the signed arm, so two equal integers always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Int {
    Signed(i64),
    Unsigned(u64),
}

impl Int {
    /// Build from an unsigned value, normalizing into the signed arm
    /// when it fits.
    #[must_use]
    pub fn from_u64(n: u64) -> Self {
        if let Ok(i) = i64::try_from(n) {
            Int::Signed(i)
        } else {
            Int::Unsigned(n)
        }
    }

    /// The value as i64, unless it only fits in u64.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Int::Signed(n) => Some(n),
            Int::Unsigned(_) => None,
        }
    }

    /// The value as u64, unless it is negative.
    #[must_use]
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Int::Signed(n) => u64::try_from(n).ok(),
            Int::Unsigned(n) => Some(n),
        }
    }
}

impl From<i64> for Int {
    fn from(n: i64) -> Self {
        Int::Signed(n)
    }
}

impl From<u64> for Int {
    fn from(n: u64) -> Self {
        Int::from_u64(n)
    }
}

/// One tagged element of a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Nil,
    Bool(bool),
    Int(Int),
    Float(f64),
    /// String payload stored as raw bytes; not validated as UTF-8 at
    /// decode time.
    Str(Vec<u8>),
    Bin(Vec<u8>),
    Ext { etype: u8, data: Vec<u8> },
    Arr(Vec<Node>),
    /// Insertion-ordered `(key, value)` pairs.
    Map(Vec<(Node, Node)>),
}

impl Node {
    // --- Builders ---

    /// Build an Int node from a signed value.
    #[must_use]
    pub fn int(n: i64) -> Node {
        Node::Int(Int::Signed(n))
    }

    /// Build an Int node from an unsigned value.
    #[must_use]
    pub fn uint(n: u64) -> Node {
        Node::Int(Int::from_u64(n))
    }

    /// Build a Str node from UTF-8 text.
    #[must_use]
    pub fn string(s: &str) -> Node {
        Node::Str(s.as_bytes().to_vec())
    }

    /// Build a Bin node owning a copy of the payload.
    #[must_use]
    pub fn bin(data: &[u8]) -> Node {
        Node::Bin(data.to_vec())
    }

    /// Build an Ext node with the given user type code.
    #[must_use]
    pub fn ext(etype: u8, data: Vec<u8>) -> Node {
        Node::Ext { etype, data }
    }

    /// Build an empty Arr node.
    #[must_use]
    pub fn array() -> Node {
        Node::Arr(Vec::new())
    }

    /// Build an empty Map node.
    #[must_use]
    pub fn map() -> Node {
        Node::Map(Vec::new())
    }

    // --- Inspection ---

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Node::Nil => Kind::Nil,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::Str(_) => Kind::Str,
            Node::Bin(_) => Kind::Bin,
            Node::Ext { .. } => Kind::Ext,
            Node::Arr(_) => Kind::Arr,
            Node::Map(_) => Kind::Map,
        }
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Node::Nil)
    }

    #[must_use]
    pub fn is_arr(&self) -> bool {
        matches!(self, Node::Arr(_))
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<Int> {
        match self {
            Node::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(Int::as_i64)
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_int().and_then(Int::as_u64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The Str payload as text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// The raw Str payload bytes.
    #[must_use]
    pub fn as_str_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Node::Bin(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ext(&self) -> Option<(u8, &[u8])> {
        match self {
            Node::Ext { etype, data } => Some((*etype, data)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_arr(&self) -> Option<&[Node]> {
        match self {
            Node::Arr(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&[(Node, Node)]> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    // --- Structural queries ---

    /// Number of items (Arr) or entries (Map); 0 for scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Node::Arr(items) => items.len(),
            Node::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Array item at `idx`, or `None` for out-of-range indexes and
    /// non-array nodes.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Node> {
        match self {
            Node::Arr(items) => items.get(idx),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Node> {
        match self {
            Node::Arr(items) => items.get_mut(idx),
            _ => None,
        }
    }

    /// First map value whose key is a Str matching `name` byte-exactly.
    #[must_use]
    pub fn get_key(&self, name: &str) -> Option<&Node> {
        let entries = self.as_map()?;
        entries
            .iter()
            .find(|(k, _)| k.as_str_bytes() == Some(name.as_bytes()))
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn get_key_mut(&mut self, name: &str) -> Option<&mut Node> {
        match self {
            Node::Map(entries) => entries
                .iter_mut()
                .find(|(k, _)| k.as_str_bytes() == Some(name.as_bytes()))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// First map value whose key matches `name` ignoring ASCII case.
    ///
    /// Convenience layer only; MessagePack key semantics are byte-exact,
    /// so prefer [`Node::get_key`].
    #[must_use]
    pub fn get_key_ignore_case(&self, name: &str) -> Option<&Node> {
        let entries = self.as_map()?;
        entries
            .iter()
            .find(|(k, _)| {
                k.as_str_bytes()
                    .is_some_and(|k| k.eq_ignore_ascii_case(name.as_bytes()))
            })
            .map(|(_, v)| v)
    }

    // --- Mutation ---

    /// Append an item to an Arr node.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedKind` if this node is not an array.
    pub fn push(&mut self, item: Node) -> Result<()> {
        self.expect_arr()?.push(item);
        Ok(())
    }

    /// Insert an item into an Arr node at `idx`, shifting later items.
    /// `idx` equal to the length appends.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedKind` if this node is not an array.
    pub fn insert_at(&mut self, idx: usize, item: Node) -> Result<()> {
        let items = self.expect_arr()?;
        if idx > items.len() {
            items.push(item);
        } else {
            items.insert(idx, item);
        }
        Ok(())
    }

    /// Append a `(Str key, value)` entry to a Map node.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedKind` if this node is not a map.
    pub fn insert(&mut self, name: &str, item: Node) -> Result<()> {
        self.expect_map()?.push((Node::string(name), item));
        Ok(())
    }

    /// Unlink and return the array item at `idx`, still owning its
    /// subtree. `None` for out-of-range indexes and non-array nodes.
    pub fn detach(&mut self, idx: usize) -> Option<Node> {
        match self {
            Node::Arr(items) if idx < items.len() => Some(items.remove(idx)),
            _ => None,
        }
    }

    /// Unlink and return the value of the first map entry whose key is a
    /// Str matching `name` byte-exactly; the entry's key is dropped.
    pub fn detach_key(&mut self, name: &str) -> Option<Node> {
        let Node::Map(entries) = self else {
            return None;
        };
        let idx = entries
            .iter()
            .position(|(k, _)| k.as_str_bytes() == Some(name.as_bytes()))?;
        Some(entries.remove(idx).1)
    }

    /// Detach the array item at `idx` and drop it. Returns whether an
    /// item was removed.
    pub fn remove(&mut self, idx: usize) -> bool {
        self.detach(idx).is_some()
    }

    /// Detach the map entry named `name` and drop it. Returns whether an
    /// entry was removed.
    pub fn remove_key(&mut self, name: &str) -> bool {
        self.detach_key(name).is_some()
    }

    /// Splice `new` into the array at `idx`, returning the old item.
    /// `None` (with `new` dropped) for out-of-range indexes and
    /// non-array nodes.
    pub fn replace(&mut self, idx: usize, new: Node) -> Option<Node> {
        match self {
            Node::Arr(items) if idx < items.len() => {
                Some(std::mem::replace(&mut items[idx], new))
            }
            _ => None,
        }
    }

    /// Replace the value of the first map entry whose key is a Str
    /// matching `name`, returning the old value. The key node stays in
    /// place.
    pub fn replace_key(&mut self, name: &str, new: Node) -> Option<Node> {
        let slot = self.get_key_mut(name)?;
        Some(std::mem::replace(slot, new))
    }

    fn expect_arr(&mut self) -> Result<&mut Vec<Node>> {
        match self {
            Node::Arr(items) => Ok(items),
            other => Err(Error::UnexpectedKind {
                expected: Kind::Arr.name(),
                found: other.kind().name(),
            }),
        }
    }

    fn expect_map(&mut self) -> Result<&mut Vec<(Node, Node)>> {
        match self {
            Node::Map(entries) => Ok(entries),
            other => Err(Error::UnexpectedKind {
                expected: Kind::Map.name(),
                found: other.kind().name(),
            }),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::int(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::int(i64::from(n))
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::uint(n)
    }
}

impl From<u32> for Node {
    fn from(n: u32) -> Self {
        Node::int(i64::from(n))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Str(s.into_bytes())
    }
}

impl From<Vec<u8>> for Node {
    fn from(data: Vec<u8>) -> Self {
        Node::Bin(data)
    }
}
