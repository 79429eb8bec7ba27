//! Tree-to-text rendering.

use crate::node::{Node, NodeKind};

/// Output layout selector for [`Node::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// No whitespace at all.
    Compact,
    /// Two-space indent per depth, one child per line.
    Indented,
}

pub(crate) fn render(node: &Node, format: Format) -> String {
    let mut out = String::new();
    let depth = match format {
        Format::Compact => None,
        Format::Indented => Some(0),
    };
    write_node(&mut out, node, depth);
    out
}

/// Appends one node. `depth` is `None` in compact mode, otherwise the
/// current indentation level.
fn write_node(out: &mut String, node: &Node, depth: Option<usize>) {
    push_padding(out, depth);
    if let Some(key) = node.key() {
        out.push('"');
        out.push_str(key);
        out.push_str("\":");
    }
    if node.is_internal() {
        let (open, close) = if node.kind() == NodeKind::Array {
            ('[', ']')
        } else {
            ('{', '}')
        };
        out.push(open);
        let children = node.children();
        if !children.is_empty() {
            if depth.is_some() {
                out.push('\n');
            }
            for (index, child) in children.iter().enumerate() {
                write_node(out, child, depth.map(|d| d + 1));
                if index + 1 < children.len() {
                    out.push(',');
                }
                if depth.is_some() {
                    out.push('\n');
                }
            }
            push_padding(out, depth);
        }
        out.push(close);
    } else {
        // raw leaf text, quoted only for String kind, never escaped
        let quoted = node.kind() == NodeKind::String;
        if quoted {
            out.push('"');
        }
        out.push_str(node.value().unwrap_or_default());
        if quoted {
            out.push('"');
        }
    }
}

fn push_padding(out: &mut String, depth: Option<usize>) {
    for _ in 0..depth.unwrap_or_default() {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Node, NodeKind};
    use crate::serializer::Format;

    fn sample() -> Node {
        let mut root = Node::object();
        root.add_key(NodeKind::Number, "a").unwrap().set_value(Some("1"));
        let list = root.add_key(NodeKind::Array, "b").unwrap();
        list.add_index(NodeKind::Boolean).unwrap().set_value(Some("on"));
        root
    }

    #[test]
    fn test_compact_has_no_whitespace() {
        assert_eq!(sample().render(Format::Compact), r#"{"a":1,"b":[true]}"#);
    }

    #[test]
    fn test_indented_layout() {
        let expected = "{\n  \"a\":1,\n  \"b\":[\n    true\n  ]\n}";
        assert_eq!(sample().render(Format::Indented), expected);
    }

    #[test]
    fn test_empty_containers_render_adjacent_brackets() {
        assert_eq!(Node::array().render(Format::Compact), "[]");
        assert_eq!(Node::object().render(Format::Indented), "{}");

        let mut root = Node::object();
        root.add_key(NodeKind::Array, "e").unwrap();
        assert_eq!(root.render(Format::Indented), "{\n  \"e\":[]\n}");
    }

    #[test]
    fn test_string_leaves_are_quoted_without_escaping() {
        let node = Node::string(r#"tab\there"#);
        assert_eq!(node.render(Format::Compact), r#""tab\there""#);
    }

    #[test]
    fn test_unset_leaf_value_renders_empty() {
        let node = Node::new(NodeKind::Number, None);
        assert_eq!(node.render(Format::Compact), "");
        let node = Node::new(NodeKind::String, None);
        assert_eq!(node.render(Format::Compact), "\"\"");
    }

    #[test]
    fn test_keys_render_only_where_present() {
        let mut root = Node::array();
        root.add_index(NodeKind::Number).unwrap().set_value(Some("7"));
        assert_eq!(root.render(Format::Compact), "[7]");
    }
}
