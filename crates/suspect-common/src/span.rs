//! Byte-offset source spans.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, start + length)` in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteSpan {
    pub start: u32,
    pub length: u32,
}

impl ByteSpan {
    #[must_use]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub const fn end(self) -> u32 {
        self.start.saturating_add(self.length)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.length == 0
    }
}
