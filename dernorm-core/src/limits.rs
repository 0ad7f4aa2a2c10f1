//! Decode hardening limits

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Limits applied while decoding untrusted BER input.
///
/// The nesting depth of a BER structure is controlled by whoever produced
/// the input, so the decoder refuses to recurse past `max_depth` instead of
/// exhausting the call stack. Trailing bytes after the single top-level
/// object are ignored unless `reject_trailing` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum nesting depth of the object tree. The top-level object sits
    /// at depth 1.
    pub max_depth: usize,
    /// Fail decoding when bytes remain after the top-level object.
    pub reject_trailing: bool,
}

impl DecodeLimits {
    /// Create limits with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject input carrying trailing bytes after the top-level object.
    pub fn with_reject_trailing(mut self, reject_trailing: bool) -> Self {
        self.reject_trailing = reject_trailing;
        self
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: false,
        }
    }
}
