pub use crate::{
    encoding::{
        decode_full, decode_many, decode_one, decode_one_with_limits, encode, encode_full,
        encode_with_limits, Decoder, Ser, Serializer, SerializerExt, Tag, Width,
    },
    errors::Error,
    float::Float,
    inum::Inum,
    limits::Limits,
    rep::*,
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
pub use num_bigint::BigInt;
pub use std::convert::TryFrom;
