//! Commit collaborator
//!
//! The engine never persists anything itself. A [`SubdivisionCommitter`]
//! receives the validated request exactly once and reports what it created.

use crate::error::CommitError;
use crate::request::SubdivisionRequest;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Result of a successful commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    /// Records created for each lot, in lot order
    pub child_property_ids: Vec<String>,
}

/// External collaborator that persists a subdivision
pub trait SubdivisionCommitter {
    /// Turn the parent property into one child property per lot
    ///
    /// # Errors
    /// Whatever the collaborator reports; the session surfaces it unchanged.
    fn subdivide_property(&mut self, request: SubdivisionRequest) -> Result<CommitReceipt, CommitError>;
}

/// Committer that writes the request as pretty JSON and persists nothing
///
/// Used for dry runs.
#[derive(Debug)]
pub struct JsonCommitter<W> {
    out: W,
}

impl<W: Write> JsonCommitter<W> {
    /// Write requests to `out`
    #[inline]
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubdivisionCommitter for JsonCommitter<W> {
    fn subdivide_property(&mut self, request: SubdivisionRequest) -> Result<CommitReceipt, CommitError> {
        let json = request.to_json_pretty()?;
        writeln!(self.out, "{json}")?;
        self.out.flush()?;
        Ok(CommitReceipt::default())
    }
}
