use failure::Fail;
use num_bigint::BigInt;

/// Errors produced while encoding, decoding, or converting [`Value`](crate::Value)s.
///
/// Offsets are absolute positions in the buffer handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    /// The leading byte of a value matched no known format.
    #[fail(display = "unknown format tag 0x{:02x} at offset {}", tag, offset)]
    UnknownFormat {
        /// The offending byte.
        tag: u8,
        /// Where it was found.
        offset: usize,
    },
    /// A tag, length field, or payload ran past the end of the buffer.
    #[fail(
        display = "truncated input at offset {}: need {} bytes, {} remaining",
        offset, need, remaining
    )]
    TruncatedInput {
        /// Where the read was attempted.
        offset: usize,
        /// Bytes the read required.
        need: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// A string payload was not valid UTF-8.
    #[fail(display = "string payload at offset {} is not valid utf-8", offset)]
    InvalidUtf8 {
        /// Start of the string payload.
        offset: usize,
    },
    /// A string, binary, extension, or container is too long for the largest tier.
    #[fail(display = "{} of length {} exceeds the largest wire tier", kind, len)]
    LengthOutOfRange {
        /// Which family overflowed, e.g. `"str"` or `"array"`.
        kind: &'static str,
        /// The rejected length.
        len: usize,
    },
    /// An integer lies outside `[-2^63, 2^64 - 1]`.
    #[fail(display = "integer {} is outside the encodable range", value)]
    IntegerOutOfRange {
        /// The rejected integer.
        value: BigInt,
    },
    /// Containers were nested deeper than the configured limit.
    #[fail(display = "nesting depth exceeds the limit of {}", limit)]
    NestingTooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },
    /// A standalone decode left bytes unread.
    #[fail(
        display = "value ended after {} bytes but {} bytes remain",
        consumed, remaining
    )]
    TrailingBytes {
        /// Bytes the value occupied.
        consumed: usize,
        /// Bytes left over.
        remaining: usize,
    },
    /// A value had a different type than the caller asked for.
    #[fail(display = "expected {}, found {}", expected, found)]
    Conversion {
        /// What the caller asked for.
        expected: &'static str,
        /// What the value actually was.
        found: &'static str,
    },
}

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn truncated(offset: usize, need: usize, remaining: usize) -> Self {
        Error::TruncatedInput {
            offset,
            need,
            remaining,
        }
    }

    pub(crate) fn conversion(expected: &'static str, found: &'static str) -> Self {
        Error::Conversion { expected, found }
    }
}
