//! Wire-format headers and node kinds.
//!
//! Every MessagePack value starts with a one-byte header. The fixed
//! families (fixint, fixstr, fixarray, fixmap, fixext) embed a small
//! length or value in the header byte itself; the sized families are
//! followed by big-endian length fields.

/// The kind of a document tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    Bin,
    Ext,
    Arr,
    Map,
}

impl Kind {
    /// Get the kind name as a string (for error messages).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Bin => "bin",
            Kind::Ext => "ext",
            Kind::Arr => "array",
            Kind::Map => "map",
        }
    }
}

/// Header bytes for the families that are not packed into a byte range.
pub mod marker {
    pub const NIL: u8 = 0xC0;
    pub const FALSE: u8 = 0xC2;
    pub const TRUE: u8 = 0xC3;
    pub const BIN8: u8 = 0xC4;
    pub const BIN16: u8 = 0xC5;
    pub const BIN32: u8 = 0xC6;
    pub const EXT8: u8 = 0xC7;
    pub const EXT16: u8 = 0xC8;
    pub const EXT32: u8 = 0xC9;
    pub const FLOAT32: u8 = 0xCA;
    pub const FLOAT64: u8 = 0xCB;
    pub const UINT8: u8 = 0xCC;
    pub const UINT16: u8 = 0xCD;
    pub const UINT32: u8 = 0xCE;
    pub const UINT64: u8 = 0xCF;
    pub const INT8: u8 = 0xD0;
    pub const INT16: u8 = 0xD1;
    pub const INT32: u8 = 0xD2;
    pub const INT64: u8 = 0xD3;
    pub const FIXEXT1: u8 = 0xD4;
    pub const STR8: u8 = 0xD9;
    pub const STR16: u8 = 0xDA;
    pub const STR32: u8 = 0xDB;
    pub const ARR16: u8 = 0xDC;
    pub const ARR32: u8 = 0xDD;
    pub const MAP16: u8 = 0xDE;
    pub const MAP32: u8 = 0xDF;
}

/// Wire family of a header byte, carrying any value or length the header
/// embeds. `0xC1` is the one byte MessagePack leaves undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    PosFixint(u8),
    FixMap(u8),
    FixArr(u8),
    FixStr(u8),
    Nil,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Fixext with the payload width (1, 2, 4, 8, or 16) already decoded.
    FixExt(u8),
    Str8,
    Str16,
    Str32,
    Arr16,
    Arr32,
    Map16,
    Map32,
    NegFixint(i8),
}

impl Format {
    /// Classify a header byte, or `None` for the undefined byte `0xC1`.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Format> {
        Some(match b {
            0x00..=0x7F => Format::PosFixint(b),
            0x80..=0x8F => Format::FixMap(b & 0x0F),
            0x90..=0x9F => Format::FixArr(b & 0x0F),
            0xA0..=0xBF => Format::FixStr(b & 0x1F),
            0xC0 => Format::Nil,
            0xC1 => return None,
            0xC2 => Format::False,
            0xC3 => Format::True,
            0xC4 => Format::Bin8,
            0xC5 => Format::Bin16,
            0xC6 => Format::Bin32,
            0xC7 => Format::Ext8,
            0xC8 => Format::Ext16,
            0xC9 => Format::Ext32,
            0xCA => Format::Float32,
            0xCB => Format::Float64,
            0xCC => Format::Uint8,
            0xCD => Format::Uint16,
            0xCE => Format::Uint32,
            0xCF => Format::Uint64,
            0xD0 => Format::Int8,
            0xD1 => Format::Int16,
            0xD2 => Format::Int32,
            0xD3 => Format::Int64,
            0xD4..=0xD8 => Format::FixExt(1 << (b - marker::FIXEXT1)),
            0xD9 => Format::Str8,
            0xDA => Format::Str16,
            0xDB => Format::Str32,
            0xDC => Format::Arr16,
            0xDD => Format::Arr32,
            0xDE => Format::Map16,
            0xDF => Format::Map32,
            0xE0..=0xFF => Format::NegFixint(b as i8),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_families() {
        assert_eq!(Format::from_byte(0x00), Some(Format::PosFixint(0)));
        assert_eq!(Format::from_byte(0x7F), Some(Format::PosFixint(127)));
        assert_eq!(Format::from_byte(0x80), Some(Format::FixMap(0)));
        assert_eq!(Format::from_byte(0x8F), Some(Format::FixMap(15)));
        assert_eq!(Format::from_byte(0x90), Some(Format::FixArr(0)));
        assert_eq!(Format::from_byte(0x9F), Some(Format::FixArr(15)));
        assert_eq!(Format::from_byte(0xA0), Some(Format::FixStr(0)));
        assert_eq!(Format::from_byte(0xBF), Some(Format::FixStr(31)));
        assert_eq!(Format::from_byte(0xE0), Some(Format::NegFixint(-32)));
        assert_eq!(Format::from_byte(0xFF), Some(Format::NegFixint(-1)));
    }

    #[test]
    fn test_fixext_widths() {
        assert_eq!(Format::from_byte(0xD4), Some(Format::FixExt(1)));
        assert_eq!(Format::from_byte(0xD5), Some(Format::FixExt(2)));
        assert_eq!(Format::from_byte(0xD6), Some(Format::FixExt(4)));
        assert_eq!(Format::from_byte(0xD7), Some(Format::FixExt(8)));
        assert_eq!(Format::from_byte(0xD8), Some(Format::FixExt(16)));
    }

    #[test]
    fn test_undefined_byte() {
        assert_eq!(Format::from_byte(0xC1), None);
    }

    #[test]
    fn test_sized_families() {
        assert_eq!(Format::from_byte(marker::NIL), Some(Format::Nil));
        assert_eq!(Format::from_byte(marker::BIN8), Some(Format::Bin8));
        assert_eq!(Format::from_byte(marker::EXT32), Some(Format::Ext32));
        assert_eq!(Format::from_byte(marker::STR16), Some(Format::Str16));
        assert_eq!(Format::from_byte(marker::ARR32), Some(Format::Arr32));
        assert_eq!(Format::from_byte(marker::MAP16), Some(Format::Map16));
        assert_eq!(Format::from_byte(marker::UINT64), Some(Format::Uint64));
        assert_eq!(Format::from_byte(marker::INT8), Some(Format::Int8));
    }
}
