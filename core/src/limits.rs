//! Decode limits
//!
//! Every length and count prefix is checked against the bytes that remain in
//! the stream. These limits add an upper bound on top of that, so a reader
//! handed a large but hostile buffer still refuses absurd prefixes.

use serde::{Deserialize, Serialize};

/// Default cap on a single string or byte block (64 MiB)
pub const DEFAULT_MAX_BLOCK_LEN: usize = 64 * 1024 * 1024;

/// Default cap on element counts (lists, parameter entries, breaks)
pub const DEFAULT_MAX_LIST_LEN: usize = 1 << 20;

/// Upper bounds applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum byte length of a string or raw block
    pub max_block_len: usize,
    /// Maximum element count of a list
    pub max_list_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_block_len: DEFAULT_MAX_BLOCK_LEN,
            max_list_len: DEFAULT_MAX_LIST_LEN,
        }
    }
}

impl DecodeLimits {
    /// Limits that only enforce the remaining-bytes check
    pub fn unbounded() -> Self {
        Self {
            max_block_len: usize::MAX,
            max_list_len: usize::MAX,
        }
    }
}
