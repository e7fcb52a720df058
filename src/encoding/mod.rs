//! # Binary encoder and decoder
//!
//! Encode and decode functions for the wire format.
//!
//! # Example
//!
//! ```
//! use mpack::prelude::*;
//!
//! // a map with one string key
//! let mut m = VecMap::new();
//! m.push(Value::from("key"), Value::from(1));
//! let value = Value::Map(m);
//!
//! // encode it
//! let enc_full = encode_full(&value).unwrap();
//! assert_eq!(enc_full, vec![0x81, 0xa3, b'k', b'e', b'y', 0x01]);
//!
//! // let's encode it a different way too
//! let out = &mut Vec::new();
//! encode(&value, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc_full);
//!
//! // decoding reports how many bytes the value took
//! let (dec, consumed) = decode_one(&enc_full, 0).unwrap();
//! assert_eq!(dec, value);
//! assert_eq!(consumed, enc_full.len());
//! ```

use crate::{
    errors::{Error, Result},
    limits::Limits,
    vecmap::VecMap,
    Float, Inum, Value,
};
use bytes::Bytes;
use tracing::trace;

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encode a value into its binary representation, appending to `out`.
///
/// On failure `out` is rewound to its length before the call, so nothing partial is
/// left behind.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let out = &mut Vec::new();
/// encode(&Value::Nil, out).unwrap();
/// assert_eq!(*out, vec![0xc0]);
/// ```
pub fn encode<T: Ser, S: Serializer>(t: T, out: &mut S) -> Result<()> {
    let mark = out.mark();
    match t.ser(out) {
        Ok(()) => {
            trace!(bytes = out.mark() - mark, "encoded value");
            Ok(())
        }
        Err(e) => {
            out.rewind(mark);
            Err(e)
        }
    }
}

/// Like [`encode`], with custom [`Limits`] on nesting depth.
pub fn encode_with_limits<S: Serializer>(v: &Value, out: &mut S, limits: Limits) -> Result<()> {
    let mark = out.mark();
    match out.put_value(v, limits) {
        Ok(()) => {
            trace!(bytes = out.mark() - mark, max_depth = limits.max_depth, "encoded value");
            Ok(())
        }
        Err(e) => {
            out.rewind(mark);
            Err(e)
        }
    }
}

/// Encodes a value into a fresh vector of bytes.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Value::from(200)).unwrap();
///
/// // 200 does not fit a positive fixint, so it takes uint8
/// assert_eq!(enc, vec![0xcc, 200]);
/// ```
pub fn encode_full<T: Ser>(t: T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(t, &mut out)?;
    Ok(out)
}

/// Decodes exactly one value starting at `offset`, returning it together with the
/// number of bytes it occupied (tag, length field and payload).
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let buf = [0xff, 0xcd, 0x01, 0x00];
///
/// assert_eq!(decode_one(&buf, 0).unwrap(), (Value::from(-1), 1));
/// assert_eq!(decode_one(&buf, 1).unwrap(), (Value::from(256u16), 3));
/// ```
pub fn decode_one(buf: &[u8], offset: usize) -> Result<(Value, usize)> {
    decode_one_with_limits(buf, offset, Limits::default())
}

/// Like [`decode_one`], with custom [`Limits`] on nesting depth.
pub fn decode_one_with_limits(buf: &[u8], offset: usize, limits: Limits) -> Result<(Value, usize)> {
    let mut d = Decoder::at(buf, offset).with_limits(limits);
    let v = d.decode_value()?;
    let consumed = d.position() - offset;
    trace!(offset, consumed, "decoded value");
    Ok((v, consumed))
}

/// Decodes a buffer that holds exactly one value.
///
/// # Errors
///
/// Besides the errors of [`decode_one`], fails with [`Error::TrailingBytes`] if the value
/// ends before the buffer does.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// assert_eq!(decode_full(&[0xc3]).unwrap(), Value::Bool(true));
/// assert!(decode_full(&[0xc3, 0xc0]).is_err());
/// ```
pub fn decode_full(buf: &[u8]) -> Result<Value> {
    let (v, consumed) = decode_one(buf, 0)?;
    if consumed == buf.len() {
        Ok(v)
    } else {
        Err(Error::TrailingBytes {
            consumed,
            remaining: buf.len() - consumed,
        })
    }
}

/// Decodes every back-to-back value in `buf`.
pub fn decode_many(buf: &[u8]) -> Result<Vec<Value>> { Decoder::new(buf).collect() }

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn enc(v: impl Into<Value>) -> Vec<u8> { encode_full(&v.into()).unwrap() }

    #[test]
    fn positive_fixint() {
        assert_eq!(enc(0), vec![0x00]);
        assert_eq!(enc(127), vec![0x7f]);
    }

    #[test]
    fn negative_fixint() {
        assert_eq!(enc(-1), vec![0xff]);
        assert_eq!(enc(-32), vec![0xe0]);
    }

    #[test]
    fn uint_tiers() {
        assert_eq!(enc(128), vec![UINT8, 128]);
        assert_eq!(enc(255), vec![UINT8, 255]);
        assert_eq!(enc(256), vec![UINT16, 1, 0]);
        assert_eq!(enc(65535), vec![UINT16, 0xff, 0xff]);
        assert_eq!(enc(65536), vec![UINT32, 0, 1, 0, 0]);
        assert_eq!(enc(4294967295u32), vec![UINT32, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(enc(4294967296u64), vec![UINT64, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn int_tiers() {
        assert_eq!(enc(-33), vec![INT8, 0xdf]);
        assert_eq!(enc(-128), vec![INT8, 0x80]);
        assert_eq!(enc(-129), vec![INT16, 0xff, 0x7f]);
        assert_eq!(enc(-32768), vec![INT16, 0x80, 0x00]);
        assert_eq!(enc(-32769), vec![INT32, 0xff, 0xff, 0x7f, 0xff]);
        assert_eq!(enc(-2147483648i64), vec![INT32, 0x80, 0, 0, 0]);
        assert_eq!(
            enc(-2147483649i64),
            vec![INT64, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn declared_width_does_not_pick_the_tier() {
        // a signed 200 still takes uint8
        assert_eq!(enc(Inum::I64(200)), vec![UINT8, 200]);
        assert_eq!(enc(Inum::U64(3)), vec![0x03]);
        assert_eq!(enc(Inum::Int(BigInt::from(-5i8))), vec![0xfb]);
    }

    #[test]
    fn integer_out_of_range() {
        let too_big: BigInt = BigInt::from(u64::max_value()) + 1u32;
        assert_eq!(
            encode_full(&Value::from(too_big.clone())),
            Err(Error::IntegerOutOfRange { value: too_big })
        );
    }

    #[test]
    fn constants() {
        assert_eq!(enc(Value::Nil), vec![NIL]);
        assert_eq!(enc(true), vec![TRUE]);
        assert_eq!(enc(false), vec![FALSE]);
    }

    #[test]
    fn floats() {
        let out = enc(1f32);
        assert_eq!(out[0], FLOAT32);
        assert_eq!(out[1..], [0x3f, 0x80, 0, 0]);

        let out = enc(1f64);
        assert_eq!(out[0], FLOAT64);
        assert_eq!(out[1..], [0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);

        let (v, n) = decode_one(&[0xca, 0x40, 0x49, 0x0f, 0xdb], 0).unwrap();
        assert_eq!(n, 5);
        match v {
            Value::Float(f) => assert!((f.to_f64() - 3.14159).abs() < 1e-5),
            other => panic!("expected a float, got {:?}", other),
        }
    }

    #[test]
    fn small_string() {
        let out = enc("w");

        // tag
        assert_eq!(out[0], 0b101_00001);
        // characters
        assert_eq!(out[1], b'w');
    }

    #[test]
    fn string_tiers() {
        let s31 = "w".repeat(31);
        assert_eq!(enc(s31.as_str())[0], 0xbf);

        let out = enc("w".repeat(32));
        assert_eq!(out[..2], [STR8, 32]);
        assert_eq!(out.len(), 34);

        assert_eq!(enc("w".repeat(255))[..2], [STR8, 255]);
        assert_eq!(enc("w".repeat(256))[..3], [STR16, 1, 0]);
    }

    #[test]
    fn bin_has_no_fix_tier() {
        assert_eq!(enc(Bytes::new()), vec![BIN8, 0]);
        assert_eq!(enc(Bytes::from_static(b"\x01\x02\x03")), vec![BIN8, 3, 1, 2, 3]);
        assert_eq!(enc(Bytes::from(vec![0u8; 256]))[..3], [BIN16, 1, 0]);
    }

    #[test]
    fn ext_tiers() {
        let fixed = [(1, 0xd4), (2, 0xd5), (4, 0xd6), (8, 0xd7), (16, 0xd8)];
        for (len, tag) in fixed.iter() {
            let out = enc(Value::Ext(5, Bytes::from(vec![7u8; *len])));
            assert_eq!(out[..2], [*tag, 5]);
            assert_eq!(out.len(), 2 + len);
        }

        let out = enc(Value::Ext(1, Bytes::from_static(b"\x01\x02\x03")));
        assert_eq!(out, vec![EXT8, 3, 1, 1, 2, 3]);

        let out = enc(Value::Ext(-1, Bytes::new()));
        assert_eq!(out, vec![EXT8, 0, 0xff]);
    }

    #[test]
    fn small_array() {
        let out = enc(vec![1, 2, 3]);
        assert_eq!(out, vec![0x93, 1, 2, 3]);
    }

    #[test]
    fn large_array() {
        let out = enc(vec![0; 16]);

        // tag
        assert_eq!(out[0], ARRAY16);
        // length
        assert_eq!(out[1..3], [0, 16]);
        // elements
        assert_eq!(out[3..].to_vec(), vec![0; 16]);
    }

    #[test]
    fn small_map() {
        let m: VecMap<Value, Value> = vec![(Value::from("a"), Value::from("b"))].into();
        let out = enc(m);
        assert_eq!(out, vec![0x81, 0xa1, b'a', 0xa1, b'b']);
    }

    #[test]
    fn large_map() {
        let m: VecMap<Value, Value> = (0..16u8).map(|x| (Value::from(x), Value::Nil)).collect();
        let out = enc(m);

        assert_eq!(out[..3], [MAP16, 0, 16]);

        // keys
        out[3..]
            .iter()
            .step_by(2)
            .enumerate()
            .for_each(|(i, x)| assert_eq!(*x as usize, i));

        // values
        out[4..].iter().step_by(2).for_each(|x| assert_eq!(*x, NIL));
    }

    #[test]
    fn map_keys_keep_their_type() {
        let m: VecMap<Value, Value> = vec![
            (Value::from(1), Value::from("int")),
            (Value::from(1.0), Value::from("float")),
        ]
        .into();
        let v = Value::Map(m);
        let out = enc(v.clone());
        let (dec, n) = decode_one(&out, 0).unwrap();
        assert_eq!(n, out.len());
        assert_eq!(dec, v);
        assert_eq!(dec.get(&Value::from(1.0)).unwrap(), &Value::from("float"));
    }

    #[test]
    fn decoded_width_is_explicit() {
        assert_eq!(decode_full(&[0x05]).unwrap().as_inum().unwrap().width_name(), "positive fixint");

        let v = decode_full(&[UINT16, 0, 5]).unwrap();
        match v {
            Value::Int(Inum::U16(5)) => {}
            other => panic!("expected uint16, got {:?}", other),
        }

        let v = decode_full(&[INT8, 0xff]).unwrap();
        match v {
            Value::Int(Inum::I8(-1)) => {}
            other => panic!("expected int8, got {:?}", other),
        }
    }

    #[test]
    fn truncated() {
        assert_eq!(
            decode_one(&[0xcc], 0),
            Err(Error::TruncatedInput {
                offset: 1,
                need: 1,
                remaining: 0
            })
        );
        assert!(decode_one(&[], 0).is_err());
        assert!(decode_one(&[0x01], 5).is_err());
        // declared length past the end
        assert!(decode_one(&[STR8, 4, b'a'], 0).is_err());
        // missing array element
        assert!(decode_one(&[0x92, 0x01], 0).is_err());
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(
            decode_one(&[0xa1, 0xff], 0),
            Err(Error::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn unknown_format() {
        assert_eq!(
            decode_one(&[0x91, 0xc1], 0),
            Err(Error::UnknownFormat {
                tag: 0xc1,
                offset: 1
            })
        );
    }

    #[test]
    fn forged_count_does_not_allocate() {
        // array32 claiming u32::MAX elements over a two-byte body
        let buf = [ARRAY32, 0xff, 0xff, 0xff, 0xff, 0xc0, 0xc0];
        match decode_one(&buf, 0) {
            Err(Error::TruncatedInput { offset: 7, .. }) => {}
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn failed_encode_leaves_no_bytes() {
        let mut out = vec![0xaa];
        let v = Value::Array(vec![Value::from(1), Value::from(BigInt::from(1u8) << 70usize)]);
        assert!(encode(&v, &mut out).is_err());
        assert_eq!(out, vec![0xaa]);
    }

    #[test]
    fn lengths_past_u32_are_rejected() {
        let too_long = u32::max_value() as usize + 1;
        let mut out = vec![0xaa];

        assert_eq!(
            out.put_array_len(too_long),
            Err(Error::LengthOutOfRange {
                kind: "array",
                len: too_long
            })
        );
        assert_eq!(
            out.put_map_len(too_long),
            Err(Error::LengthOutOfRange {
                kind: "map",
                len: too_long
            })
        );
        assert_eq!(out, vec![0xaa]);

        // the largest count still fits the 32-bit tier
        out.put_array_len(too_long - 1).unwrap();
        assert_eq!(out, vec![0xaa, ARRAY32, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn host_containers_count_depth() {
        let mut deep = Value::Nil;
        for _ in 0..crate::limits::DEFAULT_MAX_DEPTH {
            deep = Value::Array(vec![deep]);
        }

        // the outer Vec is one more level than the default allows
        let mut out = vec![0xaa];
        assert_eq!(
            encode(&vec![deep.clone()], &mut out),
            Err(Error::NestingTooDeep {
                limit: crate::limits::DEFAULT_MAX_DEPTH
            })
        );
        assert_eq!(out, vec![0xaa]);

        assert_eq!(
            encode_full(&vec![Some(vec![deep.clone()])]),
            Err(Error::NestingTooDeep {
                limit: crate::limits::DEFAULT_MAX_DEPTH
            })
        );

        // a bare value at the limit still encodes and decodes
        let enc = encode_full(&deep).unwrap();
        assert_eq!(decode_full(&enc), Ok(deep));
    }

    #[test]
    fn serializes_into_bytes_mut() {
        let mut out = bytes::BytesMut::new();
        encode(&Value::from("hi"), &mut out).unwrap();
        assert_eq!(out.finalize(), Bytes::from_static(&[0xa2, b'h', b'i']));
    }

    #[test]
    fn host_values_serialize_directly() {
        assert_eq!(encode_full(&1_000i64).unwrap(), vec![UINT16, 0x03, 0xe8]);
        assert_eq!(encode_full("hi").unwrap(), vec![0xa2, b'h', b'i']);
        assert_eq!(encode_full(&vec![true, false]).unwrap(), vec![0x92, TRUE, FALSE]);
        assert_eq!(encode_full(&None::<u8>).unwrap(), vec![NIL]);
    }

    #[test]
    fn many_values() {
        let vs = decode_many(&[0x01, 0xc0, 0x90]).unwrap();
        assert_eq!(vs, vec![Value::from(1), Value::Nil, Value::Array(vec![])]);

        let mut d = Decoder::new(&[0x01, 0xc1, 0x02]);
        assert!(d.next().unwrap().is_ok());
        assert!(d.next().unwrap().is_err());
        assert!(d.next().is_none());
    }
}
