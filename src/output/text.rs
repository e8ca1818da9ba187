//! Plain text output: one `source = duplicate` line per pair.

use std::io::{self, Write};

use crate::duplicates::DuplicatePair;

/// Line-oriented formatter for duplicate pairs.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    pairs: &'a [DuplicatePair],
}

impl<'a> TextOutput<'a> {
    /// Wrap a list of pairs for printing.
    #[must_use]
    pub fn new(pairs: &'a [DuplicatePair]) -> Self {
        Self { pairs }
    }

    /// Format a single pair without a trailing newline.
    #[must_use]
    pub fn format_pair(pair: &DuplicatePair) -> String {
        format!("{} = {}", pair.source.display(), pair.duplicate.display())
    }

    /// Write every pair, one per line.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for pair in self.pairs {
            writeln!(writer, "{}", Self::format_pair(pair))?;
        }
        writer.flush()
    }
}
