/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer result types.
//!
//! This module defines what a single completion call did to the sequencer.

use std::ops::RangeInclusive;

/// Outcome of reporting one completion to the [`Sequencer`].
///
/// [`Sequencer`]: super::Sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerResult {
    /// The completion closed the gap at the next-expected index and a
    /// contiguous batch was delivered.
    Flushed {
        /// First index of the batch.
        start: usize,
        /// Last index of the batch (inclusive).
        end: usize,
    },

    /// The completion was recorded but a gap remains before it.
    Deferred {
        /// The index that completed.
        index: usize,
        /// The lowest index still missing.
        next_expected: usize,
    },

    /// The index had already completed; nothing changed.
    Duplicate {
        /// The index reported again.
        index: usize,
    },
}

impl SequencerResult {
    /// Returns `true` if this completion delivered a batch.
    #[inline]
    #[must_use]
    pub fn is_flushed(&self) -> bool {
        matches!(self, Self::Flushed { .. })
    }

    /// Returns `true` if this completion was a repeated report.
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns the flushed index range, if any.
    #[must_use]
    pub fn flushed_range(&self) -> Option<RangeInclusive<usize>> {
        match *self {
            Self::Flushed { start, end } => Some(start..=end),
            _ => None,
        }
    }
}
