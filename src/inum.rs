//! Integers with an explicit wire width.
//!
//! Decoding always produces the width named by the tag byte, but two [`Inum`]s compare,
//! order, and hash by numeric value, so `Inum::U8(1) == Inum::I64(1)`.

use crate::{
    errors::{Error, Result},
    from_fn,
};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
};

/// Smallest value any wire tier can carry.
pub const MIN_ENCODABLE: i128 = i64::min_value() as i128;
/// Largest value any wire tier can carry.
pub const MAX_ENCODABLE: i128 = u64::max_value() as i128;

/// An integer together with the width it was decoded from or built with.
#[derive(Clone, Debug)]
pub enum Inum {
    /// Compact single-byte form: positive fixint (0..=127) or negative fixint (-32..=-1).
    Fix(i8),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// A host-side integer with no native width. Only encodable when it lies in
    /// [`MIN_ENCODABLE`]`..=`[`MAX_ENCODABLE`].
    Int(BigInt),
}

use Inum::*;

impl Inum {
    /// The numeric value, or `None` for a [`Inum::Int`] that does not fit in an `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Fix(i) | I8(i) => Some(*i as i128),
            U8(u) => Some(*u as i128),
            U16(u) => Some(*u as i128),
            U32(u) => Some(*u as i128),
            U64(u) => Some(*u as i128),
            I16(i) => Some(*i as i128),
            I32(i) => Some(*i as i128),
            I64(i) => Some(*i as i128),
            Int(i) => i.to_i128(),
        }
    }

    /// The numeric value as a [`BigInt`].
    pub fn to_bigint(&self) -> BigInt {
        match self {
            Fix(i) | I8(i) => BigInt::from(*i),
            U8(u) => BigInt::from(*u),
            U16(u) => BigInt::from(*u),
            U32(u) => BigInt::from(*u),
            U64(u) => BigInt::from(*u),
            I16(i) => BigInt::from(*i),
            I32(i) => BigInt::from(*i),
            I64(i) => BigInt::from(*i),
            Int(i) => i.clone(),
        }
    }

    /// Checks that the value fits a wire tier, returning it as an `i128`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntegerOutOfRange`] for values outside `[-2^63, 2^64 - 1]`.
    pub fn encodable(&self) -> Result<i128> {
        match self.to_i128() {
            Some(i) if i >= MIN_ENCODABLE && i <= MAX_ENCODABLE => Ok(i),
            _ => Err(Error::IntegerOutOfRange {
                value: self.to_bigint(),
            }),
        }
    }

    /// Whether the value is negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Int(i) => i.sign() == num_bigint::Sign::Minus,
            _ => self.to_i128().map_or(false, |i| i < 0),
        }
    }

    /// Name of the width this integer carries.
    pub fn width_name(&self) -> &'static str {
        match self {
            Fix(i) if *i >= 0 => "positive fixint",
            Fix(_) => "negative fixint",
            U8(_) => "uint8",
            U16(_) => "uint16",
            U32(_) => "uint32",
            U64(_) => "uint64",
            I8(_) => "int8",
            I16(_) => "int16",
            I32(_) => "int32",
            I64(_) => "int64",
            Int(_) => "bigint",
        }
    }
}

impl PartialEq for Inum {
    fn eq(&self, other: &Inum) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Inum {}

impl PartialOrd for Inum {
    fn partial_cmp(&self, other: &Inum) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Inum {
    fn cmp(&self, other: &Inum) -> Ordering {
        match (self.to_i128(), other.to_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.to_bigint().cmp(&other.to_bigint()),
        }
    }
}

impl Hash for Inum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.to_i128() {
            Some(i) => i.hash(state),
            None => self.to_bigint().hash(state),
        }
    }
}

impl fmt::Display for Inum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_i128() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.to_bigint()),
        }
    }
}

from_fn!(Inum, u8, U8);
from_fn!(Inum, u16, U16);
from_fn!(Inum, u32, U32);
from_fn!(Inum, u64, U64);
from_fn!(Inum, i8, I8);
from_fn!(Inum, i16, I16);
from_fn!(Inum, i32, I32);
from_fn!(Inum, i64, I64);
from_fn!(Inum, usize, |u: usize| U64(u as u64));
from_fn!(Inum, isize, |i: isize| I64(i as i64));
from_fn!(Inum, BigInt, Int);

from_fn!(Inum, u128, |u: u128| {
    u64::try_from(u).map_or_else(|_| Int(BigInt::from(u)), U64)
});

from_fn!(Inum, i128, |i: i128| {
    i64::try_from(i).map_or_else(|_| Int(BigInt::from(i)), I64)
});

impl From<Inum> for BigInt {
    fn from(i: Inum) -> BigInt {
        match i {
            Int(i) => i,
            other => other.to_bigint(),
        }
    }
}

macro_rules! try_from_inum {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&Inum> for $t {
                type Error = Error;

                fn try_from(n: &Inum) -> Result<$t> {
                    n.to_i128()
                        .and_then(|i| <$t>::try_from(i).ok())
                        .ok_or_else(|| Error::conversion(stringify!($t), n.width_name()))
                }
            }

            impl TryFrom<Inum> for $t {
                type Error = Error;

                fn try_from(n: Inum) -> Result<$t> { <$t>::try_from(&n) }
            }
        )*
    };
}

try_from_inum!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
