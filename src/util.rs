#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

/// Number of bytes a length field of a given tier occupies.
#[inline]
pub(crate) fn width_bytes(max: u64) -> usize {
    if max <= u8::max_value() as u64 {
        1
    } else if max <= u16::max_value() as u64 {
        2
    } else if max <= u32::max_value() as u64 {
        4
    } else {
        8
    }
}
