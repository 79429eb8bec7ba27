//! Relaxed JSON parsing implementation.

use crate::error::{ParseError, Result};
use crate::node::{FALSE_TEXT, NULL_TEXT, Node, NodeKind, TRUE_TEXT};

/// Parses a relaxed JSON text into a [`Node`] tree.
///
/// The dialect is forgiving: strings may use single or double quotes,
/// backslash escapes are copied through verbatim rather than decoded,
/// and bare (unquoted) tokens run until a structural character or a
/// newline. Bare tokens classify by literal text: `null`, `true` and
/// `false` map to their kinds, anything else becomes a Number with its
/// raw, unvalidated text.
///
/// # Errors
///
/// Fails on malformed separator/terminator sequences (including a
/// dangling comma before a closing bracket), a colon without a
/// preceding scalar, a second colon at the same level, an unterminated
/// array or object, or input with no value at all. No partial tree is
/// ever returned.
///
/// # Examples
///
/// ```
/// use json_tree::{parse, NodeKind};
///
/// let root = parse(r#"{"a":1,"b":[true,false,null]}"#).unwrap();
/// assert_eq!(root.kind(), NodeKind::Object);
/// assert_eq!(root.find_by_key("a").and_then(|n| n.value()), Some("1"));
/// assert_eq!(root.find_by_key("b").map(|n| n.len()), Some(3));
/// ```
pub fn parse(input: &str) -> Result<Node> {
    let mut cursor = Cursor::new(input);
    parse_value(&mut cursor)?.ok_or(ParseError::EmptyInput)
}

/// Read position over the input text, advanced by everything the
/// recursive routines consume.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.advance();
        }
    }
}

/// Parses one value, leaving the cursor on the character that ended it
/// (a separator, a terminator, or end of input). Returns `Ok(None)`
/// when the segment held no content.
fn parse_value(cursor: &mut Cursor<'_>) -> Result<Option<Node>> {
    let mut kind = NodeKind::Null;
    let mut key: Option<String> = None;
    let mut pending: Option<String> = None;
    let mut children: Option<Vec<Node>> = None;

    loop {
        cursor.skip_whitespace();
        let Some(ch) = cursor.peek() else { break };
        match ch {
            ',' | ']' | '}' => break,
            '[' | '{' => {
                kind = if ch == '[' {
                    NodeKind::Array
                } else {
                    NodeKind::Object
                };
                cursor.advance();
                parse_children(cursor, kind, children.get_or_insert_with(Vec::new))?;
            }
            ':' => {
                // the scalar parsed so far becomes this value's key
                if pending.is_none() {
                    return Err(ParseError::MissingValueForKey(cursor.pos));
                }
                if key.is_some() {
                    return Err(ParseError::DuplicateKey(cursor.pos));
                }
                key = pending.take();
                cursor.advance();
            }
            '\'' | '"' => {
                pending = Some(read_quoted(cursor, ch));
                kind = NodeKind::String;
            }
            _ => {
                let text = read_bare(cursor);
                kind = classify(&text);
                pending = Some(text);
            }
        }
    }

    Ok(build_node(kind, key, pending, children))
}

/// Consumes the children of a container up to and including its closing
/// delimiter. Empty segments contribute no child; children parsed
/// inside an array lose any key.
fn parse_children(
    cursor: &mut Cursor<'_>,
    kind: NodeKind,
    children: &mut Vec<Node>,
) -> Result<()> {
    let close = if kind == NodeKind::Array { ']' } else { '}' };
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(ch) if ch == close => {
                cursor.advance();
                return Ok(());
            }
            None => return Err(ParseError::UnexpectedEnd),
            _ => {}
        }
        if let Some(mut child) = parse_value(cursor)? {
            if kind == NodeKind::Array {
                child.strip_key();
            }
            children.push(child);
        }
        match cursor.peek() {
            Some(',') => {
                cursor.advance();
                cursor.skip_whitespace();
                if cursor.peek() == Some(close) {
                    return Err(ParseError::Unexpected(close, cursor.pos));
                }
            }
            Some(ch) if ch == close => {}
            Some(ch) => return Err(ParseError::Unexpected(ch, cursor.pos)),
            None => return Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Reads a quoted token, leaving escaped characters in place. An
/// unterminated token runs to the end of the input.
fn read_quoted(cursor: &mut Cursor<'_>, quote: char) -> String {
    cursor.advance();
    let start = cursor.pos;
    loop {
        match cursor.peek() {
            None => return cursor.input[start..].to_owned(),
            Some('\\') => {
                cursor.advance();
                cursor.advance();
            }
            Some(ch) if ch == quote => {
                let text = cursor.input[start..cursor.pos].to_owned();
                cursor.advance();
                return text;
            }
            Some(_) => cursor.advance(),
        }
    }
}

/// Reads an unquoted token up to a structural character or a newline.
fn read_bare(cursor: &mut Cursor<'_>) -> String {
    let start = cursor.pos;
    loop {
        match cursor.peek() {
            None | Some(']' | '}' | ',' | ':' | '\n') => break,
            Some('\\') => {
                cursor.advance();
                cursor.advance();
            }
            Some(_) => cursor.advance(),
        }
    }
    cursor.input[start..cursor.pos].to_owned()
}

fn classify(text: &str) -> NodeKind {
    match text {
        NULL_TEXT => NodeKind::Null,
        TRUE_TEXT | FALSE_TEXT => NodeKind::Boolean,
        _ => NodeKind::Number,
    }
}

/// Assembles the parsed state into a node. A segment that never saw a
/// container or a scalar produces nothing.
fn build_node(
    kind: NodeKind,
    key: Option<String>,
    pending: Option<String>,
    children: Option<Vec<Node>>,
) -> Option<Node> {
    if kind.is_internal() {
        return Some(Node::internal(kind, key, children.unwrap_or_default()));
    }
    pending.map(|value| Node::leaf(kind, key, Some(value)))
}
