use serde::Serialize;
use std::fmt;

/// Number of chunks returned per query. Always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopK(usize);

impl TopK {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;
    pub const DEFAULT: usize = 3;

    /// Clamp a caller-supplied value into range. `None` means the default.
    pub fn clamped(requested: Option<i64>) -> Self {
        let requested = requested.unwrap_or(Self::DEFAULT as i64);
        TopK(requested.clamp(Self::MIN as i64, Self::MAX as i64) as usize)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl Default for TopK {
    fn default() -> Self {
        TopK(Self::DEFAULT)
    }
}

impl fmt::Display for TopK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
