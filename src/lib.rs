//! Relaxed JSON tree library.
//!
//! Zero-dependency parsing of a forgiving JSON dialect into an owned
//! node tree, with in-place mutation, path queries and compact or
//! indented rendering.
//!
//! The dialect accepts single or double quotes, bare (unquoted) scalar
//! tokens and verbatim backslash escapes, so it reads hand-written
//! configuration as happily as machine output. Scalars keep their raw
//! text: numbers are never validated or converted on the way in.
//!
//! # Example
//!
//! ```
//! use json_tree::{parse, Format, NodeKind, Segment};
//!
//! let mut root = parse(r#"{"name":'utility',"retries":3}"#).unwrap();
//!
//! let port = root.add_key(NodeKind::Number, "port").unwrap();
//! port.set_value(Some("8080"));
//!
//! assert_eq!(
//!     root.find_by_path(&[Segment::Key("retries")]).and_then(|n| n.as_f64()),
//!     Some(3.0),
//! );
//! assert_eq!(
//!     root.render(Format::Compact),
//!     r#"{"name":"utility","retries":3,"port":8080}"#,
//! );
//! ```

pub mod error;
mod node;
mod parser;
mod path;
mod serializer;

pub use error::{ParseError, Result};
pub use node::{Node, NodeKind};
pub use parser::parse;
pub use path::Segment;
pub use serializer::Format;
