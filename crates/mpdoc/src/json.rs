//! JSON bridge.
//!
//! Bidirectional conversion between a document tree and a
//! `serde_json::Value`, used by the companion command-line filters.
//!
//! # Mapping
//!
//! | JSON                      | Node  |
//! |---------------------------|-------|
//! | null                      | Nil   |
//! | true / false              | Bool  |
//! | number with integral i64/u64 value | Int |
//! | other number              | Float |
//! | string                    | Str   |
//! | array                     | Arr   |
//! | object                    | Map   |
//!
//! Going back, Bin renders as a hex-encoded JSON string and Ext as
//! `{ "etype": <u8>, "data": "<hex>" }`. Those renderings are one-way:
//! JSON strings are never sniffed back into Bin or Ext.

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::node::{Int, Node};
use crate::tag::Kind;

/// Parse a JSON document into a tree.
///
/// # Errors
///
/// Returns `Error::JsonParse` if the input is not valid JSON.
///
/// # Example
///
/// ```
/// let doc = mpdoc::from_json(r#"{"name": "alice", "age": 30}"#).unwrap();
/// assert_eq!(doc.get_key("age").and_then(mpdoc::Node::as_i64), Some(30));
/// ```
pub fn from_json(json: &str) -> Result<Node> {
    let value: JsonValue =
        serde_json::from_str(json).map_err(|e| Error::JsonParse(e.to_string()))?;
    Ok(json_to_node(&value))
}

fn json_to_node(value: &JsonValue) -> Node {
    match value {
        JsonValue::Null => Node::Nil,
        JsonValue::Bool(b) => Node::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::int(i)
            } else if let Some(u) = n.as_u64() {
                Node::uint(u)
            } else {
                Node::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        JsonValue::String(s) => Node::string(s),
        JsonValue::Array(items) => Node::Arr(items.iter().map(json_to_node).collect()),
        JsonValue::Object(obj) => Node::Map(
            obj.iter()
                .map(|(k, v)| (Node::string(k), json_to_node(v)))
                .collect(),
        ),
    }
}

/// Convert a tree to a pretty-printed JSON string.
///
/// # Errors
///
/// Propagates the errors of [`to_json_value`], plus `Error::JsonSerialize`
/// if string rendering fails.
pub fn to_json(node: &Node) -> Result<String> {
    let value = to_json_value(node)?;
    serde_json::to_string_pretty(&value).map_err(|e| Error::JsonSerialize(e.to_string()))
}

/// Convert a tree to a JSON value.
///
/// # Errors
///
/// Returns `Error::NonFiniteFloat` for NaN or infinite floats and
/// `Error::UnexpectedKind` for a map entry whose key is not a Str.
pub fn to_json_value(node: &Node) -> Result<JsonValue> {
    match node {
        Node::Nil => Ok(JsonValue::Null),
        Node::Bool(b) => Ok(JsonValue::Bool(*b)),
        Node::Int(Int::Signed(n)) => Ok(JsonValue::Number((*n).into())),
        Node::Int(Int::Unsigned(n)) => Ok(JsonValue::Number((*n).into())),
        Node::Float(f) => {
            let num = serde_json::Number::from_f64(*f).ok_or(Error::NonFiniteFloat(*f))?;
            Ok(JsonValue::Number(num))
        }
        // Payloads that were never validated as UTF-8 render lossily.
        Node::Str(bytes) => Ok(JsonValue::String(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
        Node::Bin(bytes) => Ok(JsonValue::String(hex::encode(bytes))),
        Node::Ext { etype, data } => {
            let mut obj = serde_json::Map::new();
            obj.insert("etype".to_string(), JsonValue::Number((*etype).into()));
            obj.insert("data".to_string(), JsonValue::String(hex::encode(data)));
            Ok(JsonValue::Object(obj))
        }
        Node::Arr(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_json_value(item)?);
            }
            Ok(JsonValue::Array(out))
        }
        Node::Map(entries) => {
            let mut obj = serde_json::Map::new();
            for (key, value) in entries {
                let name = match key.as_str_bytes() {
                    Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                    None => {
                        return Err(Error::UnexpectedKind {
                            expected: Kind::Str.name(),
                            found: key.kind().name(),
                        });
                    }
                };
                obj.insert(name, to_json_value(value)?);
            }
            Ok(JsonValue::Object(obj))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(from_json("null").unwrap(), Node::Nil);
        assert_eq!(from_json("true").unwrap(), Node::Bool(true));
        assert_eq!(from_json("42").unwrap(), Node::int(42));
        assert_eq!(from_json("-100").unwrap(), Node::int(-100));
        assert_eq!(from_json(r#""hello""#).unwrap(), Node::string("hello"));
        let node = from_json("1.25").unwrap();
        assert_eq!(node.as_f64(), Some(1.25));
    }

    #[test]
    fn test_from_json_wide_integers() {
        // i64 range, well past the 32-bit line.
        assert_eq!(
            from_json("9223372036854775807").unwrap(),
            Node::int(i64::MAX)
        );
        // Above i64: keeps the unsigned arm.
        assert_eq!(
            from_json("18446744073709551615").unwrap(),
            Node::Int(Int::Unsigned(u64::MAX))
        );
    }

    #[test]
    fn test_from_json_containers_preserve_order() {
        let doc = from_json(r#"{"z": 1, "a": [true, null]}"#).unwrap();
        let entries = doc.as_map().unwrap();
        assert_eq!(entries[0].0.as_str(), Some("z"));
        assert_eq!(entries[1].0.as_str(), Some("a"));
        assert_eq!(
            entries[1].1,
            Node::Arr(vec![Node::Bool(true), Node::Nil])
        );
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            from_json("not valid json"),
            Err(Error::JsonParse(_))
        ));
    }

    #[test]
    fn test_to_json_scalars() {
        assert_eq!(to_json(&Node::Nil).unwrap(), "null");
        assert_eq!(to_json(&Node::Bool(true)).unwrap(), "true");
        assert_eq!(to_json(&Node::int(42)).unwrap(), "42");
        assert_eq!(to_json(&Node::uint(u64::MAX)).unwrap(), "18446744073709551615");
        assert_eq!(to_json(&Node::string("hi")).unwrap(), r#""hi""#);
    }

    #[test]
    fn test_to_json_bin_is_hex() {
        let value = to_json_value(&Node::bin(&[0xDE, 0xAD, 0xBE, 0xEF])).unwrap();
        assert_eq!(value, JsonValue::String("deadbeef".to_string()));
    }

    #[test]
    fn test_to_json_ext_object() {
        let value = to_json_value(&Node::ext(7, vec![0x2A])).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["etype"], JsonValue::Number(7.into()));
        assert_eq!(obj["data"], JsonValue::String("2a".to_string()));
    }

    #[test]
    fn test_to_json_non_finite_float() {
        assert!(matches!(
            to_json(&Node::Float(f64::NAN)),
            Err(Error::NonFiniteFloat(_))
        ));
        assert!(matches!(
            to_json(&Node::Float(f64::INFINITY)),
            Err(Error::NonFiniteFloat(_))
        ));
    }

    #[test]
    fn test_to_json_rejects_non_str_map_keys() {
        let map = Node::Map(vec![(Node::int(1), Node::Nil)]);
        assert_eq!(
            to_json_value(&map),
            Err(Error::UnexpectedKind {
                expected: "str",
                found: "int"
            })
        );
    }

    #[test]
    fn test_hex_is_not_sniffed_back() {
        // A hex-looking JSON string stays a Str on the way in.
        assert_eq!(from_json(r#""deadbeef""#).unwrap(), Node::string("deadbeef"));
    }

    #[test]
    fn test_roundtrip_document() {
        let original = r#"{"name":"alice","scores":[10,20,30],"active":true}"#;
        let doc = from_json(original).unwrap();
        let rendered = to_json(&doc).unwrap();

        let a: JsonValue = serde_json::from_str(original).unwrap();
        let b: JsonValue = serde_json::from_str(&rendered).unwrap();
        assert_eq!(a, b);
    }
}
