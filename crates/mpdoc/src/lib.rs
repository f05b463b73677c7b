//! MessagePack document trees.
//!
//! A decoder that turns a byte stream of one or more concatenated
//! MessagePack values into an owned document tree, an encoder that walks
//! a tree back to bytes, builders and structural queries for working
//! with trees programmatically, and a JSON bridge used by the companion
//! `mp2json` / `json2mp` filters.
//!
//! # Example
//!
//! ```
//! use mpdoc::{pack, unpack, Node};
//!
//! let mut map = Node::map();
//! map.insert("a", Node::from(1)).unwrap();
//! map.insert("b", Node::from(false)).unwrap();
//!
//! let bytes = pack(&map);
//! assert_eq!(bytes, [0x82, 0xA1, 0x61, 0x01, 0xA1, 0x62, 0xC2]);
//!
//! let roots = unpack(&bytes).unwrap();
//! assert_eq!(roots[0], map);
//! ```

pub mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod node;
pub mod tag;

pub use decode::unpack;
pub use encode::{pack, pack_many};
pub use error::{Error, Result};
pub use json::{from_json, to_json, to_json_value};
pub use node::{Int, Node};
pub use tag::Kind;
