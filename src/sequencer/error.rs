/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer error types.
//!
//! Only contract violations surface as errors. A stalled sequencer (an item
//! that never completes) is an observable state, not an error.

use thiserror::Error;

/// Errors raised when a completion violates the sequencer's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// The reported index lies outside `[0, total)`.
    #[error("index {index} out of range: sequencer tracks {total} items")]
    IndexOutOfRange {
        /// The index that was reported.
        index: usize,
        /// The number of items the sequencer was created with.
        total: usize,
    },

    /// The index was already reported once.
    ///
    /// Only returned when the sequencer runs with strict duplicate checking;
    /// otherwise duplicates are ignored and logged.
    #[error("index {index} reported as completed more than once")]
    DuplicateCompletion {
        /// The index reported twice.
        index: usize,
    },
}
