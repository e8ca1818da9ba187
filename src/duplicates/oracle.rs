//! Content equality of two file identities.
//!
//! # Overview
//!
//! Deciding whether two files hold the same bytes runs through a funnel of
//! checks ordered from cheap to expensive, stopping at the first rejection:
//!
//! 1. **Equivalence** - both paths resolve to the same file on disk (same
//!    path, hardlink, symlink). Size and hash are skipped.
//! 2. **Size** - different sizes cannot match. No I/O.
//! 3. **Hash** - full-content BLAKE3 digests. The only stage that reads files.
//! 4. **Validity** - both identities must still be valid; hashing may have
//!    revoked validity after a read failure or a mid-read change.
//!
//! [`evaluate`] reports which stage settled the verdict so each stage's
//! behaviour can be observed on its own.

use serde::Serialize;

use crate::scanner::FileIdentity;

/// A step of the comparison funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Same underlying file
    Equivalence,
    /// File size comparison
    Size,
    /// Content digest comparison
    Hash,
    /// Final validity check
    Validity,
}

/// Comparison stages in evaluation order. [`Stage::Validity`] always runs last.
pub const FUNNEL: [Stage; 3] = [Stage::Equivalence, Stage::Size, Stage::Hash];

/// Outcome of a single funnel stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Inconclusive; run the next stage.
    Continue,
    /// Not the same content.
    Reject,
    /// Skip remaining comparisons and go straight to the validity check.
    SkipToValidity,
}

/// Result of comparing two identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same content. `via_equivalence` is set when no content was compared.
    Equal {
        /// Both paths named the same file
        via_equivalence: bool,
    },
    /// Different content, or not comparable; carries the rejecting stage.
    Rejected(Stage),
}

impl Verdict {
    /// Whether the identities hold the same content.
    #[must_use]
    pub fn is_equal(self) -> bool {
        matches!(self, Self::Equal { .. })
    }
}

/// Run one funnel stage against two identities.
#[must_use]
pub fn run_stage(stage: Stage, a: &FileIdentity, b: &FileIdentity) -> StageOutcome {
    match stage {
        Stage::Equivalence => match (a.file_key(), b.file_key()) {
            (Some(ka), Some(kb)) if ka == kb => StageOutcome::SkipToValidity,
            _ => StageOutcome::Continue,
        },
        Stage::Size => {
            if a.size() == b.size() {
                StageOutcome::Continue
            } else {
                StageOutcome::Reject
            }
        }
        Stage::Hash => {
            if a.hash() == b.hash() {
                StageOutcome::Continue
            } else {
                StageOutcome::Reject
            }
        }
        Stage::Validity => {
            if a.is_ok() && b.is_ok() {
                StageOutcome::Continue
            } else {
                StageOutcome::Reject
            }
        }
    }
}

/// Compare two identities through the funnel.
///
/// The verdict is symmetric in its arguments.
#[must_use]
pub fn evaluate(a: &FileIdentity, b: &FileIdentity) -> Verdict {
    let mut via_equivalence = false;

    for stage in FUNNEL {
        match run_stage(stage, a, b) {
            StageOutcome::Continue => {}
            StageOutcome::Reject => return Verdict::Rejected(stage),
            StageOutcome::SkipToValidity => {
                via_equivalence = true;
                break;
            }
        }
    }

    match run_stage(Stage::Validity, a, b) {
        StageOutcome::Reject => Verdict::Rejected(Stage::Validity),
        _ => Verdict::Equal { via_equivalence },
    }
}

/// Whether two identities hold byte-identical content.
#[must_use]
pub fn same_content(a: &FileIdentity, b: &FileIdentity) -> bool {
    evaluate(a, b).is_equal()
}
