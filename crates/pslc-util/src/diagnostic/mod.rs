//! Printing a fault to standard output.
//!
//! There is exactly one diagnostic per run: the first fault encountered.
//! This module has no accumulation, no levels beyond "fatal", and no
//! notes/help/snippets — the format is the flat `L-C:Message` line the
//! external interface specifies.

use crate::error::CompileError;

/// Print `err` to standard output in the `line-col:message` format.
///
/// Callers are expected to set a non-zero process exit code afterwards;
/// this function only performs the print.
pub fn report(err: &CompileError) {
    println!("{err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn report_does_not_panic() {
        report(&CompileError::new(Span::new(1, 1), "test"));
    }
}
