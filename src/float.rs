use crate::from_fn;
use std::fmt;

/// An IEEE-754 float, stored as raw bits so that equality and hashing are exact.
///
/// The variant decides the wire form: [`Float::Single`] encodes as float32,
/// [`Float::Double`] as float64.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
pub enum Float {
    Single(u32),
    Double(u64),
}

use Float::*;

impl Float {
    /// Widens to an `f64`. Lossless for both variants.
    pub fn to_f64(self) -> f64 {
        match self {
            Single(bits) => f32::from_bits(bits) as f64,
            Double(bits) => f64::from_bits(bits),
        }
    }

    /// Whether this is the 32-bit form.
    pub fn is_single(self) -> bool {
        match self {
            Single(_) => true,
            Double(_) => false,
        }
    }
}

from_fn!(Float, f32, |f: f32| Single(f.to_bits()));
from_fn!(Float, f64, |f: f64| Double(f.to_bits()));

impl From<Float> for f64 {
    fn from(f: Float) -> f64 { f.to_f64() }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Single(bits) => write!(f, "{}", f32::from_bits(*bits)),
            Double(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_reflexive() {
        let nan = Float::from(std::f64::NAN);
        assert_eq!(nan, nan);
        assert!(nan.to_f64().is_nan());
    }

    #[test]
    fn widths_are_distinct() {
        assert_ne!(Float::from(1.0f32), Float::from(1.0f64));
        assert_eq!(Float::from(1.5f32).to_f64(), 1.5);
        assert!(Float::from(0.0f32).is_single());
    }
}
