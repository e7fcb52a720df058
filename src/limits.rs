//! Resource limits shared by the encoder and decoder.

use crate::errors::{Error, Result};

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Bounds applied while walking a value tree.
///
/// Nesting depth counts the containers around a value, including the value itself when
/// it is a container: a top-level array sits at depth 1, an array inside it at depth 2.
/// Scalars never add depth.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let deep = Value::Array(vec![Value::Array(vec![])]);
///
/// let strict = Limits::with_max_depth(1);
/// let mut out = Vec::new();
/// assert!(encode_with_limits(&deep, &mut out, strict).is_err());
/// assert!(out.is_empty());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Deepest container nesting that is accepted.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Limits with a custom nesting depth.
    pub fn with_max_depth(max_depth: usize) -> Self { Limits { max_depth } }

    /// Enters one more container below `depth`, returning the new depth.
    #[inline]
    pub(crate) fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth.saturating_add(1);
        if depth > self.max_depth {
            Err(Error::NestingTooDeep {
                limit: self.max_depth,
            })
        } else {
            Ok(depth)
        }
    }
}
