//! Internal implementation of the resource identifier type.

use std::fmt;
use uuid::Uuid;

/// Canonical resource identifier (36 lowercase characters, hyphenated).
///
/// The contained UUID always renders in canonical form, so the string placed in a resource
/// `id` and the string used to build a `Patient/<id>` reference can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(Uuid);

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceId {
    /// Generates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns true if `input` is a canonical identifier.
    ///
    /// Purely syntactic: 36 bytes, hyphens at positions 8, 13, 18 and 23, lowercase hex
    /// everywhere else.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| match i {
                8 | 13 | 18 | 23 => b == b'-',
                _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
            })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
