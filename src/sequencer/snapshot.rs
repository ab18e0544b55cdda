/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Read-only progress views of a sequencer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerStatus {
    /// Some index below `total` has not been flushed yet.
    Active,
    /// Every item has been flushed; the output is final.
    Drained,
}

/// Point-in-time view of a sequencer's bookkeeping.
///
/// All fields are read under the same lock, so they are mutually consistent.
///
/// # Examples
///
/// ```
/// use inorder_rs::sequencer::{Sequencer, SequencerStatus};
///
/// let sequencer = Sequencer::<usize>::new(3);
/// sequencer.on_item_completed(2).ok();
///
/// let snapshot = sequencer.snapshot();
/// assert_eq!(snapshot.completed, 1);
/// assert_eq!(snapshot.next_expected, 0);
/// assert_eq!(snapshot.status, SequencerStatus::Active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerSnapshot {
    /// Instance id of the sequencer.
    pub id: Uuid,

    /// Number of items the sequencer was created with.
    pub total: usize,

    /// Lowest index not yet flushed.
    pub next_expected: usize,

    /// Number of distinct indices reported as finished.
    pub completed: usize,

    /// Number of batches flushed so far.
    pub flushes: u64,

    /// Lifecycle state.
    pub status: SequencerStatus,
}

impl SequencerSnapshot {
    /// Finished indices still waiting for a gap below them to close.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.completed.saturating_sub(self.next_expected)
    }
}
