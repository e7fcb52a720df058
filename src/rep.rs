use crate::{
    errors::{Error, Result},
    Float, Inum, Value, VecMap,
};
use bytes::Bytes;
use num_bigint::BigInt;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::{BuildHasher, Hash},
};

/// A host type representable as a [`Value`].
pub trait ValueRep: Clone + Sized {
    /// Converts the value into a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// assert_eq!(1u8.to_value(), Value::from(1));
    /// ```
    fn to_value(&self) -> Value { self.clone().into_value() }

    /// Consumes the value, converting it into a [`Value`].
    fn into_value(self) -> Value { self.to_value() }

    /// Converts back from a [`Value`].
    ///
    /// # Arguments
    ///
    /// `v: Value` - The value to be converted.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let v = "foo".to_string().into_value();
    ///
    /// assert_eq!(String::from_value(v).unwrap(), "foo");
    /// assert!(u8::from_value(Value::from(256)).is_err());
    /// ```
    fn from_value(v: Value) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> Result<T> {
    Err(Error::conversion(expected, found.type_name()))
}

impl ValueRep for Value {
    fn into_value(self) -> Value { self }

    fn from_value(v: Value) -> Result<Self> { Ok(v) }
}

impl ValueRep for bool {
    fn into_value(self) -> Value { Value::Bool(self) }

    fn from_value(v: Value) -> Result<Self> { v.as_bool() }
}

impl ValueRep for () {
    fn into_value(self) -> Value { Value::Nil }

    fn from_value(v: Value) -> Result<()> {
        if v.is_nil() {
            Ok(())
        } else {
            mismatch("nil", &v)
        }
    }
}

macro_rules! int_rep {
    ($($t:ty),*) => {
        $(
            impl ValueRep for $t {
                fn into_value(self) -> Value { Value::from(self) }

                fn from_value(v: Value) -> Result<Self> { <$t>::try_from(v.as_inum()?) }
            }
        )*
    };
}

int_rep!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl ValueRep for Inum {
    fn into_value(self) -> Value { Value::Int(self) }

    fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Int(i) => Ok(i),
            other => mismatch("integer", &other),
        }
    }
}

impl ValueRep for BigInt {
    fn into_value(self) -> Value { Value::Int(Inum::from(self)) }

    fn from_value(v: Value) -> Result<Self> { Inum::from_value(v).map(BigInt::from) }
}

impl ValueRep for Float {
    fn into_value(self) -> Value { Value::Float(self) }

    fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Float(f) => Ok(f),
            other => mismatch("float", &other),
        }
    }
}

impl ValueRep for f32 {
    fn into_value(self) -> Value { Value::from(self) }

    /// Only single precision values convert; a double is never narrowed.
    fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Float(Float::Single(bits)) => Ok(f32::from_bits(bits)),
            other => mismatch("f32", &other),
        }
    }
}

impl ValueRep for f64 {
    fn into_value(self) -> Value { Value::from(self) }

    fn from_value(v: Value) -> Result<Self> { v.as_f64() }
}

impl ValueRep for String {
    fn into_value(self) -> Value { Value::Str(self) }

    fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Str(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }
}

impl ValueRep for Bytes {
    fn into_value(self) -> Value { Value::Bin(self) }

    fn from_value(v: Value) -> Result<Self> {
        match v {
            Value::Bin(b) => Ok(b),
            other => mismatch("binary", &other),
        }
    }
}

impl<T: ValueRep> ValueRep for Vec<T> {
    fn into_value(self) -> Value { Value::Array(self.into_iter().map(T::into_value).collect()) }

    fn to_value(&self) -> Value { Value::Array(self.iter().map(T::to_value).collect()) }

    fn from_value(v: Value) -> Result<Self> {
        v.into_array()?.into_iter().map(T::from_value).collect()
    }
}

impl<T: ValueRep> ValueRep for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(t) => t.into_value(),
            None => Value::Nil,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(t) => t.to_value(),
            None => Value::Nil,
        }
    }

    fn from_value(v: Value) -> Result<Self> {
        if v.is_nil() {
            Ok(None)
        } else {
            T::from_value(v).map(Some)
        }
    }
}

fn tuple_items(v: Value, len: usize) -> Result<std::vec::IntoIter<Value>> {
    let arr = v.into_array()?;
    if arr.len() == len {
        Ok(arr.into_iter())
    } else {
        Err(Error::conversion("tuple", "array of another length"))
    }
}

impl<A: ValueRep, B: ValueRep> ValueRep for (A, B) {
    fn into_value(self) -> Value { Value::Array(vec![self.0.into_value(), self.1.into_value()]) }

    fn from_value(v: Value) -> Result<Self> {
        let mut items = tuple_items(v, 2)?;
        match (items.next(), items.next()) {
            (Some(a), Some(b)) => Ok((A::from_value(a)?, B::from_value(b)?)),
            _ => Err(Error::conversion("tuple", "array of another length")),
        }
    }
}

impl<A: ValueRep, B: ValueRep, C: ValueRep> ValueRep for (A, B, C) {
    fn into_value(self) -> Value {
        Value::Array(vec![
            self.0.into_value(),
            self.1.into_value(),
            self.2.into_value(),
        ])
    }

    fn from_value(v: Value) -> Result<Self> {
        let mut items = tuple_items(v, 3)?;
        match (items.next(), items.next(), items.next()) {
            (Some(a), Some(b), Some(c)) => {
                Ok((A::from_value(a)?, B::from_value(b)?, C::from_value(c)?))
            }
            _ => Err(Error::conversion("tuple", "array of another length")),
        }
    }
}

impl<K: ValueRep, V: ValueRep> ValueRep for VecMap<K, V> {
    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(v: Value) -> Result<Self> {
        let vm = v.into_map()?;
        let mut out = VecMap::with_capacity(vm.len());
        for (k, v) in vm {
            out.push(K::from_value(k)?, V::from_value(v)?);
        }
        Ok(out)
    }
}

impl<K, V, S> ValueRep for HashMap<K, V, S>
where
    K: ValueRep + Eq + Hash,
    V: ValueRep,
    S: BuildHasher + Default + Clone,
{
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    /// Later duplicates of a key replace earlier ones.
    fn from_value(v: Value) -> Result<Self> {
        v.into_map()?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K: ValueRep + Ord, V: ValueRep> ValueRep for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }

    fn from_value(v: Value) -> Result<Self> {
        v.into_map()?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{decode_one, encode_full};

    fn through_wire<T: ValueRep>(t: &T) -> T {
        let enc = encode_full(&t.to_value()).unwrap();
        let (v, _) = decode_one(&enc, 0).unwrap();
        T::from_value(v).unwrap()
    }

    #[test]
    fn natives() {
        assert_eq!(through_wire(&true), true);
        assert_eq!(through_wire(&()), ());
        assert_eq!(through_wire(&-200i16), -200);
        assert_eq!(through_wire(&u64::max_value()), u64::max_value());
        assert_eq!(through_wire(&1.5f32), 1.5);
        assert_eq!(through_wire(&-0.25f64), -0.25);
        assert_eq!(through_wire(&"hi".to_string()), "hi");
        assert_eq!(
            through_wire(&Bytes::from_static(b"\x00\x01")),
            Bytes::from_static(b"\x00\x01")
        );
    }

    #[test]
    fn narrowing_fails() {
        assert_eq!(
            u8::from_value(Value::from(300)),
            Err(Error::conversion("u8", "int32"))
        );
        assert!(u32::from_value(Value::from(-1)).is_err());
        assert!(f32::from_value(Value::from(1.0f64)).is_err());
        assert!(String::from_value(Value::Bin(Bytes::from_static(b"no"))).is_err());
    }

    #[test]
    fn options() {
        assert_eq!(Some(3u8).to_value(), Value::from(3));
        assert_eq!(None::<u8>.to_value(), Value::Nil);
        assert_eq!(Option::<u8>::from_value(Value::Nil), Ok(None));
        assert_eq!(Option::<u8>::from_value(Value::from(9)), Ok(Some(9)));
    }

    #[test]
    fn tuples() {
        let t = (1u8, "a".to_string(), vec![true, false]);
        assert_eq!(through_wire(&t), t);
        assert!(<(u8, u8)>::from_value(Value::from(vec![1, 2, 3])).is_err());
    }

    #[test]
    fn maps() {
        let mut vm = VecMap::new();
        vm.push("x".to_string(), 1i32);
        vm.push("y".to_string(), -1i32);
        assert_eq!(through_wire(&vm), vm);

        let mut hm: HashMap<u16, String> = HashMap::new();
        hm.insert(7, "seven".into());
        hm.insert(700, "seven hundred".into());
        assert_eq!(through_wire(&hm), hm);

        let bm: BTreeMap<i8, bool> = vec![(-1, true), (1, false)].into_iter().collect();
        assert_eq!(through_wire(&bm), bm);
    }
}
