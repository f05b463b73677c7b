//! Wire decoder.
//!
//! A single dispatch on the header byte, recursing into containers. The
//! decoder fails fast on the first malformed byte and never partially
//! populates a node it has not fully validated; on error the values
//! decoded so far are dropped.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::node::{Int, Node};
use crate::tag::Format;

/// Deepest container nesting the decoder will follow. A tighter bound
/// than the wire allows, so adversarial runs of array headers cannot
/// exhaust the stack.
const MAX_DEPTH: usize = 512;

/// Decode a stream of one or more concatenated top-level values.
///
/// # Errors
///
/// Returns `Error::Truncated` if the input ends mid-value (or is empty),
/// `Error::UnknownHeader` on the undefined byte `0xC1`, and
/// `Error::DepthLimitExceeded` past 512 levels of container nesting.
///
/// # Example
///
/// ```
/// let roots = mpdoc::unpack(&[0xC0, 0xC3, 0x7F]).unwrap();
/// assert_eq!(roots.len(), 3);
/// assert_eq!(roots[2].as_i64(), Some(127));
/// ```
pub fn unpack(bytes: &[u8]) -> Result<Vec<Node>> {
    let mut cur = Cursor::new(bytes);
    let mut roots = Vec::new();
    loop {
        roots.push(decode_value(&mut cur, 0)?);
        if cur.is_empty() {
            break;
        }
    }
    Ok(roots)
}

fn decode_value(cur: &mut Cursor, depth: usize) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthLimitExceeded);
    }

    let header = cur.u8()?;
    let format = Format::from_byte(header).ok_or(Error::UnknownHeader(header))?;

    match format {
        Format::Nil => Ok(Node::Nil),
        Format::False => Ok(Node::Bool(false)),
        Format::True => Ok(Node::Bool(true)),

        Format::PosFixint(n) => Ok(Node::int(i64::from(n))),
        Format::NegFixint(n) => Ok(Node::int(i64::from(n))),
        Format::Uint8 => Ok(Node::int(i64::from(cur.u8()?))),
        Format::Uint16 => Ok(Node::int(i64::from(cur.u16_be()?))),
        Format::Uint32 => Ok(Node::int(i64::from(cur.u32_be()?))),
        Format::Uint64 => Ok(Node::Int(Int::from_u64(cur.u64_be()?))),
        Format::Int8 => Ok(Node::int(i64::from(cur.u8()? as i8))),
        Format::Int16 => Ok(Node::int(i64::from(cur.u16_be()? as i16))),
        Format::Int32 => Ok(Node::int(i64::from(cur.u32_be()? as i32))),
        Format::Int64 => Ok(Node::int(cur.u64_be()? as i64)),

        // float 32 widens into the tree's f64 slot.
        Format::Float32 => {
            let b = cur.take(4)?;
            Ok(Node::Float(f64::from(f32::from_be_bytes([
                b[0], b[1], b[2], b[3],
            ]))))
        }
        Format::Float64 => {
            let b = cur.take(8)?;
            Ok(Node::Float(f64::from_be_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ])))
        }

        Format::FixStr(len) => Ok(Node::Str(cur.take(usize::from(len))?.to_vec())),
        Format::Str8 => {
            let len = usize::from(cur.u8()?);
            Ok(Node::Str(cur.take(len)?.to_vec()))
        }
        Format::Str16 => {
            let len = usize::from(cur.u16_be()?);
            Ok(Node::Str(cur.take(len)?.to_vec()))
        }
        Format::Str32 => {
            let len = cur.u32_be()? as usize;
            Ok(Node::Str(cur.take(len)?.to_vec()))
        }

        Format::Bin8 => {
            let len = usize::from(cur.u8()?);
            Ok(Node::Bin(cur.take(len)?.to_vec()))
        }
        Format::Bin16 => {
            let len = usize::from(cur.u16_be()?);
            Ok(Node::Bin(cur.take(len)?.to_vec()))
        }
        Format::Bin32 => {
            let len = cur.u32_be()? as usize;
            Ok(Node::Bin(cur.take(len)?.to_vec()))
        }

        Format::FixExt(len) => {
            let etype = cur.u8()?;
            Ok(Node::Ext {
                etype,
                data: cur.take(usize::from(len))?.to_vec(),
            })
        }
        // Sized ext: length field first, then the type byte.
        Format::Ext8 => {
            let len = usize::from(cur.u8()?);
            decode_ext_body(cur, len)
        }
        Format::Ext16 => {
            let len = usize::from(cur.u16_be()?);
            decode_ext_body(cur, len)
        }
        Format::Ext32 => {
            let len = cur.u32_be()? as usize;
            decode_ext_body(cur, len)
        }

        Format::FixArr(count) => decode_array(cur, usize::from(count), depth),
        Format::Arr16 => {
            let count = usize::from(cur.u16_be()?);
            decode_array(cur, count, depth)
        }
        Format::Arr32 => {
            let count = cur.u32_be()? as usize;
            decode_array(cur, count, depth)
        }

        Format::FixMap(count) => decode_map(cur, usize::from(count), depth),
        Format::Map16 => {
            let count = usize::from(cur.u16_be()?);
            decode_map(cur, count, depth)
        }
        Format::Map32 => {
            let count = cur.u32_be()? as usize;
            decode_map(cur, count, depth)
        }
    }
}

fn decode_ext_body(cur: &mut Cursor, len: usize) -> Result<Node> {
    let etype = cur.u8()?;
    Ok(Node::Ext {
        etype,
        data: cur.take(len)?.to_vec(),
    })
}

// Children are collected with plain pushes rather than a count-sized
// preallocation: the count comes from untrusted input.
fn decode_array(cur: &mut Cursor, count: usize, depth: usize) -> Result<Node> {
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(decode_value(cur, depth + 1)?);
    }
    Ok(Node::Arr(items))
}

fn decode_map(cur: &mut Cursor, count: usize, depth: usize) -> Result<Node> {
    let mut entries = Vec::new();
    for _ in 0..count {
        let key = decode_value(cur, depth + 1)?;
        let value = decode_value(cur, depth + 1)?;
        entries.push((key, value));
    }
    Ok(Node::Map(entries))
}
