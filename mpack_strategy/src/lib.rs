use bytes::Bytes;
use mpack::{
    inum::{MAX_ENCODABLE, MIN_ENCODABLE},
    vecmap::VecMap,
    Float, Inum, Value,
};
use num_bigint::BigInt;
use proptest::prelude::*;

/// arbitrary encodable BigInt for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    (MIN_ENCODABLE..=MAX_ENCODABLE).prop_map(BigInt::from)
}

/// arbitrary BigInt outside the encodable range
pub fn arb_wide_bigint() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        (MAX_ENCODABLE + 1..=i128::max_value()).prop_map(BigInt::from),
        (i128::min_value()..MIN_ENCODABLE).prop_map(BigInt::from),
    ]
}

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

/// arbitrary encodable Inum, in every width
pub fn arb_inum() -> impl Strategy<Value = Inum> {
    prop_oneof![
        (-32i8..=127).prop_map(Inum::Fix),
        any::<u8>().prop_map(Inum::U8),
        any::<u16>().prop_map(Inum::U16),
        any::<u32>().prop_map(Inum::U32),
        any::<u64>().prop_map(Inum::U64),
        any::<i8>().prop_map(Inum::I8),
        any::<i16>().prop_map(Inum::I16),
        any::<i32>().prop_map(Inum::I32),
        any::<i64>().prop_map(Inum::I64),
        arb_bigint().prop_map(Inum::Int),
    ]
}

/// arbitrary scalar usable as a map key
pub fn arb_key() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        arb_inum().prop_map(Value::Int),
        any::<String>().prop_map(Value::Str),
        arb_bs().prop_map(Value::Bin),
    ]
}

/// arbitrary encodable Value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Nil),
        // misc
        any::<bool>().prop_map(Value::Bool),
        any::<String>().prop_map(Value::Str),
        arb_bs().prop_map(Value::Bin),
        (any::<i8>(), arb_bs()).prop_map(|(ty, data)| Value::Ext(ty, data)),
        // integers
        arb_inum().prop_map(Value::Int),
        // floats, including NaN payloads
        any::<u32>().prop_map(|b| Value::Float(Float::Single(b))),
        any::<u64>().prop_map(|b| Value::Float(Float::Double(b))),
        any::<f32>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        20, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Value::Array),
                prop::collection::vec((arb_key(), inner), 0..10)
                    .prop_map(|pairs| Value::Map(VecMap::from(pairs)))
            ]
        },
    )
}
