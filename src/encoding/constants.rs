/// Largest positive fixint, 0x7f
pub(crate) const POS_FIXINT_MAX: u8 = 0x7f;
/// First negative fixint byte, 0xe0 (-32)
pub(crate) const NEG_FIXINT: u8 = 0xe0;
/// Smallest negative fixint value
pub(crate) const NEG_FIXINT_MIN: i64 = -32;

/// Fixmap type bits, count in the low nibble
pub(crate) const FIXMAP: u8 = 0x80;
/// Fixarray type bits, count in the low nibble
pub(crate) const FIXARRAY: u8 = 0x90;
/// Fixstr type bits, length in the low five bits
pub(crate) const FIXSTR: u8 = 0xa0;

pub(crate) const MASK_FIXCOL_LEN: u8 = 0b0000_1111;
pub(crate) const MASK_FIXSTR_LEN: u8 = 0b0001_1111;

pub(crate) const NIL: u8 = 0xc0;
pub(crate) const FALSE: u8 = 0xc2;
pub(crate) const TRUE: u8 = 0xc3;

pub(crate) const BIN8: u8 = 0xc4;
pub(crate) const BIN16: u8 = 0xc5;
pub(crate) const BIN32: u8 = 0xc6;

pub(crate) const EXT8: u8 = 0xc7;
pub(crate) const EXT16: u8 = 0xc8;
pub(crate) const EXT32: u8 = 0xc9;

pub(crate) const FLOAT32: u8 = 0xca;
pub(crate) const FLOAT64: u8 = 0xcb;

pub(crate) const UINT8: u8 = 0xcc;
pub(crate) const UINT16: u8 = 0xcd;
pub(crate) const UINT32: u8 = 0xce;
pub(crate) const UINT64: u8 = 0xcf;

pub(crate) const INT8: u8 = 0xd0;
pub(crate) const INT16: u8 = 0xd1;
pub(crate) const INT32: u8 = 0xd2;
pub(crate) const INT64: u8 = 0xd3;

/// Fixext 1, followed by fixext 2, 4, 8 and 16 at consecutive bytes
pub(crate) const FIXEXT1: u8 = 0xd4;
pub(crate) const FIXEXT16: u8 = 0xd8;

pub(crate) const STR8: u8 = 0xd9;
pub(crate) const STR16: u8 = 0xda;
pub(crate) const STR32: u8 = 0xdb;

pub(crate) const ARRAY16: u8 = 0xdc;
pub(crate) const ARRAY32: u8 = 0xdd;

pub(crate) const MAP16: u8 = 0xde;
pub(crate) const MAP32: u8 = 0xdf;

/// Payload lengths that have a fixext form, indexed by `tag - FIXEXT1`.
pub(crate) const FIXEXT_LENS: [usize; 5] = [1, 2, 4, 8, 16];

/// Largest length any tier can declare.
pub(crate) const MAX_LEN: usize = u32::max_value() as usize;

/// The tag bytes of one length-prefixed family, smallest tier first.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Tiers {
    /// Type bits and largest length of the tag-embedded tier, if the family has one.
    pub(crate) fix: Option<(u8, usize)>,
    /// Tag of the 1-byte-length tier, if the family has one.
    pub(crate) w8: Option<u8>,
    pub(crate) w16: u8,
    pub(crate) w32: u8,
    pub(crate) kind: &'static str,
}

pub(crate) const STR_TIERS: Tiers = Tiers {
    fix: Some((FIXSTR, MASK_FIXSTR_LEN as usize)),
    w8: Some(STR8),
    w16: STR16,
    w32: STR32,
    kind: "str",
};

pub(crate) const BIN_TIERS: Tiers = Tiers {
    fix: None,
    w8: Some(BIN8),
    w16: BIN16,
    w32: BIN32,
    kind: "bin",
};

pub(crate) const EXT_TIERS: Tiers = Tiers {
    fix: None,
    w8: Some(EXT8),
    w16: EXT16,
    w32: EXT32,
    kind: "ext",
};

pub(crate) const ARRAY_TIERS: Tiers = Tiers {
    fix: Some((FIXARRAY, MASK_FIXCOL_LEN as usize)),
    w8: None,
    w16: ARRAY16,
    w32: ARRAY32,
    kind: "array",
};

pub(crate) const MAP_TIERS: Tiers = Tiers {
    fix: Some((FIXMAP, MASK_FIXCOL_LEN as usize)),
    w8: None,
    w16: MAP16,
    w32: MAP32,
    kind: "map",
};
