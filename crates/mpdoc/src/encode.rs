//! Wire encoders.
//!
//! One function per wire family. Each emits the shortest correct header
//! for the given value or length, then the payload bytes, appending to a
//! caller-supplied `Vec<u8>`. Integer fields are written with explicit
//! big-endian byte order; floats go through `to_be_bytes`.
//!
//! [`pack`] drives a recursive walk over a [`Node`] tree, emitting each
//! container's header before its children. For maps it emits each
//! entry's key and then its value, in insertion order.

use crate::node::{Int, Node};
use crate::tag::marker;

/// Encode one node as a complete MessagePack value.
#[must_use]
pub fn pack(node: &Node) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(&mut buf, node);
    buf
}

/// Encode a slice of root nodes as a concatenated top-level stream.
#[must_use]
pub fn pack_many(roots: &[Node]) -> Vec<u8> {
    let mut buf = Vec::new();
    for node in roots {
        encode_value(&mut buf, node);
    }
    buf
}

/// Encode one value, recursively descending into containers.
pub fn encode_value(buf: &mut Vec<u8>, node: &Node) {
    match node {
        Node::Nil => buf.push(marker::NIL),
        Node::Bool(b) => buf.push(if *b { marker::TRUE } else { marker::FALSE }),
        Node::Int(n) => encode_int(buf, *n),
        Node::Float(f) => encode_float(buf, *f),
        Node::Str(s) => encode_str(buf, s),
        Node::Bin(b) => encode_bin(buf, b),
        Node::Ext { etype, data } => encode_ext(buf, *etype, data),
        Node::Arr(items) => {
            encode_array_header(buf, items.len());
            for item in items {
                encode_value(buf, item);
            }
        }
        Node::Map(entries) => {
            encode_map_header(buf, entries.len());
            for (key, value) in entries {
                encode_value(buf, key);
                encode_value(buf, value);
            }
        }
    }
}

/// Encode an integer using the shortest applicable family.
pub fn encode_int(buf: &mut Vec<u8>, n: Int) {
    match n {
        Int::Signed(n) => encode_i64(buf, n),
        // Normalization leaves only values above i64::MAX here, which
        // always take the full uint 64 form.
        Int::Unsigned(n) => {
            buf.push(marker::UINT64);
            buf.extend_from_slice(&n.to_be_bytes());
        }
    }
}

fn encode_i64(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        if n <= 127 {
            buf.push(n as u8); // positive fixint
        } else if n <= 0xFF {
            buf.push(marker::UINT8);
            buf.push(n as u8);
        } else if n <= 0xFFFF {
            buf.push(marker::UINT16);
            buf.extend_from_slice(&(n as u16).to_be_bytes());
        } else if n <= 0xFFFF_FFFF {
            buf.push(marker::UINT32);
            buf.extend_from_slice(&(n as u32).to_be_bytes());
        } else {
            buf.push(marker::UINT64);
            buf.extend_from_slice(&(n as u64).to_be_bytes());
        }
    } else if n >= -32 {
        buf.push(n as u8); // negative fixint
    } else if n >= -128 {
        buf.push(marker::INT8);
        buf.push(n as u8);
    } else if n >= -32768 {
        buf.push(marker::INT16);
        buf.extend_from_slice(&(n as i16).to_be_bytes());
    } else if n >= i64::from(i32::MIN) {
        buf.push(marker::INT32);
        buf.extend_from_slice(&(n as i32).to_be_bytes());
    } else {
        buf.push(marker::INT64);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a float: float 32 iff the value round-trips through f32
/// exactly, float 64 otherwise.
pub fn encode_float(buf: &mut Vec<u8>, d: f64) {
    let f = d as f32;
    if f64::from(f) == d {
        buf.push(marker::FLOAT32);
        buf.extend_from_slice(&f.to_be_bytes());
    } else {
        buf.push(marker::FLOAT64);
        buf.extend_from_slice(&d.to_be_bytes());
    }
}

/// Encode a string payload: fixstr below 32 bytes, then str 8/16/32.
pub fn encode_str(buf: &mut Vec<u8>, s: &[u8]) {
    let len = s.len();
    if len < 32 {
        buf.push(0xA0 | len as u8);
    } else if len <= 0xFF {
        buf.push(marker::STR8);
        buf.push(len as u8);
    } else if len <= 0xFFFF {
        buf.push(marker::STR16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(marker::STR32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(s);
}

/// Encode a binary payload: bin 8/16/32.
pub fn encode_bin(buf: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if len <= 0xFF {
        buf.push(marker::BIN8);
        buf.push(len as u8);
    } else if len <= 0xFFFF {
        buf.push(marker::BIN16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(marker::BIN32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(data);
}

/// Encode an extension payload: fixext when the length is a power of two
/// up to 16, ext 8/16/32 otherwise, with the length field before the
/// type byte.
pub fn encode_ext(buf: &mut Vec<u8>, etype: u8, data: &[u8]) {
    let len = data.len();
    if len.is_power_of_two() && len <= 16 {
        buf.push(marker::FIXEXT1 + len.trailing_zeros() as u8);
        buf.push(etype);
    } else if len <= 0xFF {
        buf.push(marker::EXT8);
        buf.push(len as u8);
        buf.push(etype);
    } else if len <= 0xFFFF {
        buf.push(marker::EXT16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
        buf.push(etype);
    } else {
        buf.push(marker::EXT32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
        buf.push(etype);
    }
    buf.extend_from_slice(data);
}

/// Encode an array header for `n` items.
pub fn encode_array_header(buf: &mut Vec<u8>, n: usize) {
    if n <= 15 {
        buf.push(0x90 | n as u8);
    } else if n <= 0xFFFF {
        buf.push(marker::ARR16);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else {
        buf.push(marker::ARR32);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    }
}

/// Encode a map header for `n` entries.
pub fn encode_map_header(buf: &mut Vec<u8>, n: usize) {
    if n <= 15 {
        buf.push(0x80 | n as u8);
    } else if n <= 0xFFFF {
        buf.push(marker::MAP16);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else {
        buf.push(marker::MAP32);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_int(n: i64) -> Vec<u8> {
        pack(&Node::int(n))
    }

    #[test]
    fn test_encode_nil_and_bool() {
        assert_eq!(pack(&Node::Nil), vec![0xC0]);
        assert_eq!(pack(&Node::Bool(false)), vec![0xC2]);
        assert_eq!(pack(&Node::Bool(true)), vec![0xC3]);
    }

    #[test]
    fn test_encode_int_positive_boundaries() {
        assert_eq!(packed_int(0), vec![0x00]);
        assert_eq!(packed_int(127), vec![0x7F]);
        assert_eq!(packed_int(128), vec![0xCC, 0x80]);
        assert_eq!(packed_int(255), vec![0xCC, 0xFF]);
        assert_eq!(packed_int(256), vec![0xCD, 0x01, 0x00]);
        assert_eq!(packed_int(65535), vec![0xCD, 0xFF, 0xFF]);
        assert_eq!(packed_int(65536), vec![0xCE, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            packed_int(4_294_967_295),
            vec![0xCE, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            packed_int(4_294_967_296),
            vec![0xCF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            packed_int(i64::MAX),
            vec![0xCF, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_encode_int_negative_boundaries() {
        assert_eq!(packed_int(-1), vec![0xFF]);
        assert_eq!(packed_int(-32), vec![0xE0]);
        assert_eq!(packed_int(-33), vec![0xD0, 0xDF]);
        assert_eq!(packed_int(-128), vec![0xD0, 0x80]);
        assert_eq!(packed_int(-129), vec![0xD1, 0xFF, 0x7F]);
        assert_eq!(packed_int(-32768), vec![0xD1, 0x80, 0x00]);
        assert_eq!(packed_int(-32769), vec![0xD2, 0xFF, 0xFF, 0x7F, 0xFF]);
        assert_eq!(
            packed_int(i64::from(i32::MIN)),
            vec![0xD2, 0x80, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            packed_int(i64::from(i32::MIN) - 1),
            vec![0xD3, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            packed_int(i64::MIN),
            vec![0xD3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_uint64() {
        assert_eq!(
            pack(&Node::uint(u64::MAX)),
            vec![0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        // Values that fit i64 normalize and take the shortest form.
        assert_eq!(pack(&Node::uint(5)), vec![0x05]);
    }

    #[test]
    fn test_encode_float_width_choice() {
        // 1.5 survives the f32 round trip.
        assert_eq!(
            pack(&Node::Float(1.5)),
            vec![0xCA, 0x3F, 0xC0, 0x00, 0x00]
        );
        // 1.1 does not.
        assert_eq!(
            pack(&Node::Float(1.1)),
            vec![0xCB, 0x3F, 0xF1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9A]
        );
        // NaN never compares equal to itself, so it takes the wide form.
        assert_eq!(pack(&Node::Float(f64::NAN))[0], 0xCB);
    }

    #[test]
    fn test_encode_str_boundaries() {
        assert_eq!(pack(&Node::string("")), vec![0xA0]);
        assert_eq!(
            pack(&Node::string("foo")),
            vec![0xA3, 0x66, 0x6F, 0x6F]
        );

        let s31 = "a".repeat(31);
        let enc = pack(&Node::string(&s31));
        assert_eq!(enc[0], 0xBF);
        assert_eq!(enc.len(), 32);

        let s32 = "a".repeat(32);
        let enc = pack(&Node::string(&s32));
        assert_eq!(&enc[..2], &[0xD9, 32]);

        let s256 = "a".repeat(256);
        let enc = pack(&Node::string(&s256));
        assert_eq!(&enc[..3], &[0xDA, 0x01, 0x00]);

        let s65536 = "a".repeat(65536);
        let enc = pack(&Node::string(&s65536));
        assert_eq!(&enc[..5], &[0xDB, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_bin_boundaries() {
        assert_eq!(pack(&Node::bin(b"")), vec![0xC4, 0x00]);
        assert_eq!(
            pack(&Node::bin(&[0xAA, 0xBB, 0xCC])),
            vec![0xC4, 0x03, 0xAA, 0xBB, 0xCC]
        );

        let b256 = vec![0u8; 256];
        assert_eq!(&pack(&Node::Bin(b256))[..3], &[0xC5, 0x01, 0x00]);

        let b65536 = vec![0u8; 65536];
        assert_eq!(
            &pack(&Node::Bin(b65536))[..5],
            &[0xC6, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_ext_fixext_widths() {
        assert_eq!(pack(&Node::ext(7, vec![0x2A])), vec![0xD4, 0x07, 0x2A]);
        assert_eq!(
            pack(&Node::ext(1, vec![0xBE, 0xEF])),
            vec![0xD5, 0x01, 0xBE, 0xEF]
        );
        assert_eq!(pack(&Node::ext(2, vec![0; 4]))[0], 0xD6);
        assert_eq!(pack(&Node::ext(2, vec![0; 8]))[0], 0xD7);
        assert_eq!(pack(&Node::ext(2, vec![0; 16]))[0], 0xD8);
    }

    #[test]
    fn test_encode_ext_sized_forms() {
        // Non-powers of two fall through to ext 8: length, then etype.
        assert_eq!(
            pack(&Node::ext(7, vec![1, 2, 3])),
            vec![0xC7, 0x03, 0x07, 1, 2, 3]
        );
        assert_eq!(pack(&Node::ext(9, vec![])), vec![0xC7, 0x00, 0x09]);
        // 32 is a power of two but above the fixext limit.
        assert_eq!(&pack(&Node::ext(5, vec![0; 32]))[..3], &[0xC7, 32, 0x05]);

        let enc = pack(&Node::ext(5, vec![0; 256]));
        assert_eq!(&enc[..4], &[0xC8, 0x01, 0x00, 0x05]);

        let enc = pack(&Node::ext(5, vec![0; 65536]));
        assert_eq!(&enc[..6], &[0xC9, 0x00, 0x01, 0x00, 0x00, 0x05]);
    }

    #[test]
    fn test_encode_array_headers() {
        let mut small = Node::array();
        for i in 0..2 {
            small.push(Node::int(i + 1)).unwrap();
        }
        assert_eq!(pack(&small), vec![0x92, 0x01, 0x02]);

        let mut buf = Vec::new();
        encode_array_header(&mut buf, 15);
        assert_eq!(buf, vec![0x9F]);

        buf.clear();
        encode_array_header(&mut buf, 16);
        assert_eq!(buf, vec![0xDC, 0x00, 0x10]);

        buf.clear();
        encode_array_header(&mut buf, 65535);
        assert_eq!(buf, vec![0xDC, 0xFF, 0xFF]);

        buf.clear();
        encode_array_header(&mut buf, 65536);
        assert_eq!(buf, vec![0xDD, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_map_headers() {
        let mut buf = Vec::new();
        encode_map_header(&mut buf, 0);
        assert_eq!(buf, vec![0x80]);

        buf.clear();
        encode_map_header(&mut buf, 16);
        assert_eq!(buf, vec![0xDE, 0x00, 0x10]);

        buf.clear();
        encode_map_header(&mut buf, 65536);
        assert_eq!(buf, vec![0xDF, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_map_emits_keys_in_insertion_order() {
        let mut map = Node::map();
        map.insert("a", Node::int(1)).unwrap();
        map.insert("b", Node::Bool(false)).unwrap();
        assert_eq!(
            pack(&map),
            vec![0x82, 0xA1, 0x61, 0x01, 0xA1, 0x62, 0xC2]
        );
    }

    #[test]
    fn test_pack_many_concatenates() {
        let roots = [Node::Nil, Node::Bool(true), Node::int(127)];
        assert_eq!(pack_many(&roots), vec![0xC0, 0xC3, 0x7F]);
    }
}
