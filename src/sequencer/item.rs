/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! One-shot completion handles.
//!
//! An [`ItemHandle`] is the completion signal of a single item. It is handed
//! to whatever performs the item's work (a task, a thread, a timer callback)
//! and consumed when the work finishes.

use super::core::Sequencer;
use super::error::SequencerError;
use super::result::SequencerResult;
use std::fmt;
use std::sync::Arc;

/// Completion signal for the item at a fixed index.
///
/// # Examples
///
/// ```
/// use inorder_rs::sequencer::Sequencer;
/// use std::sync::Arc;
///
/// let sequencer = Arc::new(Sequencer::<&str>::new(2));
/// let mut handles = sequencer.handles();
///
/// let second = handles.pop().unwrap();
/// let first = handles.pop().unwrap();
/// second.complete("b").ok();
/// first.complete("a").ok();
///
/// assert_eq!(sequencer.output_so_far(), vec!["a", "b"]);
/// ```
#[must_use = "an item that never completes stalls the sequencer"]
pub struct ItemHandle<T: Clone + Send + Sync + 'static> {
    index: usize,
    sequencer: Arc<Sequencer<T>>,
}

impl<T: Clone + Send + Sync + 'static> ItemHandle<T> {
    pub(crate) fn new(index: usize, sequencer: Arc<Sequencer<T>>) -> Self {
        Self { index, sequencer }
    }

    /// Index of the item this handle completes.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Signals completion with `item` as the payload, consuming the handle.
    ///
    /// # Errors
    ///
    /// Propagates [`SequencerError`] from [`Sequencer::complete`].
    pub fn complete(self, item: T) -> Result<SequencerResult, SequencerError> {
        self.sequencer.complete(self.index, item)
    }
}

impl<T: Clone + Send + Sync + 'static> fmt::Debug for ItemHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("index", &self.index)
            .field("sequencer", &self.sequencer.id())
            .finish()
    }
}
