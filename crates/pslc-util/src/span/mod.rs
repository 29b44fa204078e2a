//! Source locations.
//!
//! The reader tracks line and column directly (line starts at 1, column
//! starts at 0 and resets to 0 on `\n`), so a location is just that pair —
//! there is no multi-file source map, since the driver only ever compiles
//! one file per run.

/// A single point in the source text where a token starts, or a fault is
/// detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

impl Span {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}
