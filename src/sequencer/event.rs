/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Flush event types.
//!
//! This module defines the event emitted by the Sequencer each time a
//! contiguous run of completed items is delivered.

use std::ops::RangeInclusive;

/// Event emitted after the sequencer flushes a contiguous batch.
///
/// Events are emitted in strictly increasing `sequence_num` order, and the
/// ranges of successive events are adjacent: the `start` of one event is the
/// `end + 1` of the previous one.
///
/// # Examples
///
/// ```
/// use inorder_rs::sequencer::FlushEvent;
///
/// let event = FlushEvent::new(1, 0, 2, 4, vec!['c', 'd', 'e']);
/// assert_eq!(event.len(), 3);
/// assert_eq!(event.range(), 2..=4);
/// assert_eq!(event.loaded_total(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushEvent<T> {
    /// 1-based flush counter for the owning sequencer.
    pub sequence_num: u64,

    /// Nanosecond timestamp when the flush happened.
    pub timestamp_ns: u64,

    /// First index in the batch.
    pub start: usize,

    /// Last index in the batch (inclusive).
    pub end: usize,

    /// Payloads of `start..=end`, in index order.
    pub items: Vec<T>,
}

impl<T> FlushEvent<T> {
    /// Creates a new flush event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        start: usize,
        end: usize,
        items: Vec<T>,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            start,
            end,
            items,
        }
    }

    /// Number of items in the batch.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the batch carries no items. Sequencer flushes never do.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Length of the sequencer's output once this batch is appended.
    #[inline]
    #[must_use]
    pub fn loaded_total(&self) -> usize {
        self.end + 1
    }

    /// The flushed index range.
    #[inline]
    #[must_use]
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}
