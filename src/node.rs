//! Tree node representation and manipulation.

use crate::path::Segment;
use crate::serializer::{self, Format};
use std::fmt;

pub(crate) const NULL_TEXT: &str = "null";
pub(crate) const TRUE_TEXT: &str = "true";
pub(crate) const FALSE_TEXT: &str = "false";

pub(crate) fn bool_text(value: bool) -> &'static str {
    if value { TRUE_TEXT } else { FALSE_TEXT }
}

/// Discriminates the six node forms of the relaxed JSON dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The `null` literal
    Null,
    /// The `true`/`false` literals
    Boolean,
    /// Any bare scalar that is not a boolean or null, kept as raw text
    Number,
    /// A quoted scalar
    String,
    /// `[...]` with ordered, keyless children
    Array,
    /// `{...}` with ordered, keyed children
    Object,
}

impl NodeKind {
    /// Returns true for the container kinds (Array, Object).
    pub fn is_internal(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }
}

/// Variant payload: scalar text for leaves, ordered children for
/// containers. The two representations cannot coexist.
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Value(Option<String>),
    Children(Vec<Node>),
}

/// A single element of the tree: a leaf scalar or an internal container.
///
/// Leaves own their text, containers own their children, and dropping a
/// node releases the whole subtree. The `key` is only meaningful for
/// children of an Object-kind parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    key: Option<String>,
    payload: Payload,
}

impl Node {
    /// Creates a node of the given kind with an optional key.
    ///
    /// Leaf kinds start with no value, container kinds with no children.
    pub fn new(kind: NodeKind, key: Option<&str>) -> Self {
        let payload = if kind.is_internal() {
            Payload::Children(Vec::new())
        } else {
            Payload::Value(None)
        };
        Node {
            kind,
            key: key.map(str::to_owned),
            payload,
        }
    }

    pub(crate) fn leaf(kind: NodeKind, key: Option<String>, value: Option<String>) -> Self {
        debug_assert!(!kind.is_internal());
        Node {
            kind,
            key,
            payload: Payload::Value(value),
        }
    }

    pub(crate) fn internal(kind: NodeKind, key: Option<String>, children: Vec<Node>) -> Self {
        debug_assert!(kind.is_internal());
        Node {
            kind,
            key,
            payload: Payload::Children(children),
        }
    }

    pub(crate) fn strip_key(&mut self) {
        self.key = None;
    }

    /// Keyless leaf holding the canonical `null` text.
    pub fn null() -> Self {
        Node::leaf(NodeKind::Null, None, Some(NULL_TEXT.to_owned()))
    }

    /// Keyless leaf holding the canonical `true`/`false` text.
    pub fn boolean(value: bool) -> Self {
        Node::leaf(NodeKind::Boolean, None, Some(bool_text(value).to_owned()))
    }

    /// Keyless Number leaf holding `text` as-is, unvalidated.
    pub fn number(text: &str) -> Self {
        Node::leaf(NodeKind::Number, None, Some(text.to_owned()))
    }

    /// Keyless String leaf holding `text`.
    pub fn string(text: &str) -> Self {
        Node::leaf(NodeKind::String, None, Some(text.to_owned()))
    }

    /// Keyless empty Array container.
    pub fn array() -> Self {
        Node::internal(NodeKind::Array, None, Vec::new())
    }

    /// Keyless empty Object container.
    pub fn object() -> Self {
        Node::internal(NodeKind::Object, None, Vec::new())
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }

    /// Leaf text, if any. `None` for containers and unset leaves.
    pub fn value(&self) -> Option<&str> {
        match &self.payload {
            Payload::Value(value) => value.as_deref(),
            Payload::Children(_) => None,
        }
    }

    /// Children in insertion order. Empty for leaf nodes.
    pub fn children(&self) -> &[Node] {
        match &self.payload {
            Payload::Children(children) => children,
            Payload::Value(_) => &[],
        }
    }

    /// Number of children. Zero for leaf nodes.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Assigns the leaf text, replacing any previous value. Containers
    /// ignore the call.
    ///
    /// Boolean nodes treat `value` as a truthiness flag and store the
    /// canonical `true`/`false` text; Null nodes always store `null`;
    /// Number and String nodes store the given text as-is, or drop
    /// their value on `None`.
    pub fn set_value(&mut self, value: Option<&str>) {
        let Payload::Value(slot) = &mut self.payload else {
            return;
        };
        *slot = match self.kind {
            NodeKind::Boolean => Some(bool_text(value.is_some()).to_owned()),
            NodeKind::Null => Some(NULL_TEXT.to_owned()),
            _ => value.map(str::to_owned),
        };
    }

    /// Removes all children (containers) or the leaf text. The key is
    /// untouched.
    pub fn clear(&mut self) {
        match &mut self.payload {
            Payload::Children(children) => children.clear(),
            Payload::Value(value) => *value = None,
        }
    }

    /// Adds a keyed child to an Object-kind node and returns it.
    ///
    /// If a child with `key` already exists it is returned unchanged,
    /// whatever its kind, so the call is idempotent and object keys stay
    /// unique. Returns `None` on non-Object nodes.
    pub fn add_key(&mut self, kind: NodeKind, key: &str) -> Option<&mut Node> {
        if self.kind != NodeKind::Object {
            return None;
        }
        let Payload::Children(children) = &mut self.payload else {
            return None;
        };
        if let Some(index) = children.iter().position(|child| child.key() == Some(key)) {
            return Some(&mut children[index]);
        }
        children.push(new_child(kind, Some(key)));
        children.last_mut()
    }

    /// Appends a keyless child to an Array-kind node and returns it.
    /// Returns `None` on non-Array nodes.
    pub fn add_index(&mut self, kind: NodeKind) -> Option<&mut Node> {
        if self.kind != NodeKind::Array {
            return None;
        }
        let Payload::Children(children) = &mut self.payload else {
            return None;
        };
        children.push(new_child(kind, None));
        children.last_mut()
    }

    /// Linear scan for the first child with a matching key. `None` on
    /// leaf nodes or when no child matches.
    pub fn find_by_key(&self, key: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.key() == Some(key))
    }

    /// Mutable twin of [`find_by_key`](Node::find_by_key).
    pub fn find_by_key_mut(&mut self, key: &str) -> Option<&mut Node> {
        match &mut self.payload {
            Payload::Children(children) => {
                children.iter_mut().find(|child| child.key() == Some(key))
            }
            Payload::Value(_) => None,
        }
    }

    /// Bounds-checked positional child access. `None` on leaf nodes or
    /// outside `[0, len)`.
    pub fn find_by_index(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    /// Mutable twin of [`find_by_index`](Node::find_by_index).
    pub fn find_by_index_mut(&mut self, index: usize) -> Option<&mut Node> {
        match &mut self.payload {
            Payload::Children(children) => children.get_mut(index),
            Payload::Value(_) => None,
        }
    }

    /// Walks a segment path from this node, dispatching each step by the
    /// current node's kind: Object nodes take key segments, Array nodes
    /// take index segments. Stops with `None` as soon as a step fails or
    /// the kind doesn't match the segment type.
    pub fn find_by_path(&self, path: &[Segment<'_>]) -> Option<&Node> {
        let mut current = self;
        for segment in path {
            current = match (current.kind, segment) {
                (NodeKind::Object, Segment::Key(key)) => current.find_by_key(key)?,
                (NodeKind::Array, Segment::Index(index)) => current.find_by_index(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable twin of [`find_by_path`](Node::find_by_path).
    pub fn find_by_path_mut(&mut self, path: &[Segment<'_>]) -> Option<&mut Node> {
        let mut current = self;
        for segment in path {
            current = match (current.kind, segment) {
                (NodeKind::Object, Segment::Key(key)) => current.find_by_key_mut(key)?,
                (NodeKind::Array, Segment::Index(index)) => current.find_by_index_mut(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns the text of a String-kind leaf, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        if self.kind == NodeKind::String {
            self.value()
        } else {
            None
        }
    }

    /// Parses the raw text of a Number-kind leaf on demand, otherwise
    /// `None`. The stored text is unvalidated, so this can fail even on
    /// a Number node.
    pub fn as_f64(&self) -> Option<f64> {
        if self.kind == NodeKind::Number {
            self.value()?.parse().ok()
        } else {
            None
        }
    }

    /// Returns the flag of a Boolean-kind leaf, otherwise `None`.
    pub fn as_bool(&self) -> Option<bool> {
        if self.kind == NodeKind::Boolean {
            Some(self.value()? == TRUE_TEXT)
        } else {
            None
        }
    }

    /// Returns true if this is a Null-kind leaf.
    pub fn is_null(&self) -> bool {
        self.kind == NodeKind::Null
    }

    /// Renders the subtree to text in the requested format. The returned
    /// buffer is freshly allocated and owned by the caller.
    pub fn render(&self, format: Format) -> String {
        serializer::render(self, format)
    }
}

fn new_child(kind: NodeKind, key: Option<&str>) -> Node {
    let mut child = Node::new(kind, key);
    if kind == NodeKind::Null {
        child.set_value(None);
    }
    child
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Format::Compact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaf_has_no_value() {
        let node = Node::new(NodeKind::Number, Some("x"));
        assert_eq!(node.kind(), NodeKind::Number);
        assert_eq!(node.key(), Some("x"));
        assert_eq!(node.value(), None);
        assert!(!node.is_internal());
    }

    #[test]
    fn test_new_container_is_empty() {
        let node = Node::new(NodeKind::Object, None);
        assert!(node.is_internal());
        assert_eq!(node.len(), 0);
        assert_eq!(node.value(), None);
    }

    #[test]
    fn test_set_value_stores_raw_text() {
        let mut node = Node::new(NodeKind::Number, None);
        node.set_value(Some("3.14"));
        assert_eq!(node.value(), Some("3.14"));
        node.set_value(None);
        assert_eq!(node.value(), None);
    }

    #[test]
    fn test_set_value_boolean_truthiness() {
        let mut node = Node::new(NodeKind::Boolean, None);
        node.set_value(Some("anything"));
        assert_eq!(node.value(), Some("true"));
        node.set_value(None);
        assert_eq!(node.value(), Some("false"));
    }

    #[test]
    fn test_set_value_null_is_canonical() {
        let mut node = Node::new(NodeKind::Null, None);
        node.set_value(Some("whatever"));
        assert_eq!(node.value(), Some("null"));
    }

    #[test]
    fn test_set_value_ignored_on_containers() {
        let mut node = Node::array();
        node.set_value(Some("text"));
        assert_eq!(node.value(), None);
        assert_eq!(node.len(), 0);
    }

    #[test]
    fn test_add_key_is_idempotent() {
        let mut root = Node::object();
        root.add_key(NodeKind::Number, "a").unwrap().set_value(Some("1"));
        assert_eq!(root.len(), 1);

        // second call returns the existing child, whatever kind was asked
        let again = root.add_key(NodeKind::String, "a").unwrap();
        assert_eq!(again.kind(), NodeKind::Number);
        assert_eq!(again.value(), Some("1"));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_add_key_rejects_non_objects() {
        assert!(Node::array().add_key(NodeKind::Number, "a").is_none());
        assert!(Node::string("s").add_key(NodeKind::Number, "a").is_none());
    }

    #[test]
    fn test_add_index_appends_keyless_children() {
        let mut root = Node::array();
        root.add_index(NodeKind::Boolean).unwrap().set_value(Some("yes"));
        root.add_index(NodeKind::Null).unwrap();
        assert_eq!(root.len(), 2);
        assert_eq!(root.children()[0].key(), None);
        assert_eq!(root.children()[1].value(), Some("null"));
    }

    #[test]
    fn test_add_index_rejects_non_arrays() {
        assert!(Node::object().add_index(NodeKind::Number).is_none());
        assert!(Node::null().add_index(NodeKind::Number).is_none());
    }

    #[test]
    fn test_null_children_auto_initialize() {
        let mut root = Node::object();
        let child = root.add_key(NodeKind::Null, "n").unwrap();
        assert_eq!(child.value(), Some("null"));
    }

    #[test]
    fn test_clear_keeps_kind_and_key() {
        let mut root = Node::object();
        root.add_key(NodeKind::Number, "a").unwrap().set_value(Some("1"));
        let child = root.find_by_key_mut("a").unwrap();
        child.clear();
        assert_eq!(child.kind(), NodeKind::Number);
        assert_eq!(child.key(), Some("a"));
        assert_eq!(child.value(), None);

        root.clear();
        assert_eq!(root.len(), 0);
        assert_eq!(root.kind(), NodeKind::Object);
    }

    #[test]
    fn test_find_by_key() {
        let mut root = Node::object();
        root.add_key(NodeKind::Number, "a").unwrap().set_value(Some("1"));
        root.add_key(NodeKind::Number, "b").unwrap().set_value(Some("2"));

        assert_eq!(root.find_by_key("b").and_then(|n| n.value()), Some("2"));
        assert!(root.find_by_key("missing").is_none());
        assert!(Node::number("1").find_by_key("a").is_none());
    }

    #[test]
    fn test_find_by_index_bounds() {
        let mut root = Node::array();
        root.add_index(NodeKind::Number).unwrap().set_value(Some("1"));

        assert!(root.find_by_index(0).is_some());
        assert!(root.find_by_index(1).is_none());
        assert!(Node::number("1").find_by_index(0).is_none());
    }

    #[test]
    fn test_find_by_path_dispatches_by_kind() {
        let mut root = Node::object();
        let list = root.add_key(NodeKind::Array, "items").unwrap();
        list.add_index(NodeKind::String).unwrap().set_value(Some("first"));
        list.add_index(NodeKind::String).unwrap().set_value(Some("second"));

        let found = root.find_by_path(&[Segment::Key("items"), Segment::Index(1)]);
        assert_eq!(found.and_then(|n| n.as_str()), Some("second"));

        // segment type must match the node kind
        assert!(root.find_by_path(&[Segment::Index(0)]).is_none());
        assert!(root.find_by_path(&[Segment::Key("items"), Segment::Key("x")]).is_none());
        // empty path resolves to the node itself
        assert_eq!(root.find_by_path(&[]), Some(&root));
    }

    #[test]
    fn test_find_by_path_mut_allows_edits() {
        let mut root = Node::object();
        root.add_key(NodeKind::Number, "a").unwrap().set_value(Some("1"));

        let path: [Segment; 1] = ["a".into()];
        root.find_by_path_mut(&path).unwrap().set_value(Some("2"));
        assert_eq!(root.find_by_key("a").and_then(|n| n.value()), Some("2"));
    }

    #[test]
    fn test_interpreting_accessors() {
        assert_eq!(Node::string("hi").as_str(), Some("hi"));
        assert_eq!(Node::number("2.5").as_f64(), Some(2.5));
        assert_eq!(Node::number("not a number").as_f64(), None);
        assert_eq!(Node::boolean(false).as_bool(), Some(false));
        assert!(Node::null().is_null());
        assert_eq!(Node::number("1").as_str(), None);
        assert_eq!(Node::string("1").as_f64(), None);
    }

    #[test]
    fn test_display_renders_compact() {
        let mut root = Node::object();
        root.add_key(NodeKind::Boolean, "ok").unwrap().set_value(Some("y"));
        assert_eq!(root.to_string(), r#"{"ok":true}"#);
    }
}
