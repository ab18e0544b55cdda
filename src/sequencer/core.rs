/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Core Sequencer implementation.
//!
//! This module provides the main Sequencer struct, which accepts completions
//! for `N` indexed items in any order and delivers them downstream strictly in
//! index order, one contiguous batch at a time.

use super::config::SequencerConfig;
use super::error::SequencerError;
use super::event::FlushEvent;
use super::item::ItemHandle;
use super::result::SequencerResult;
use super::snapshot::{SequencerSnapshot, SequencerStatus};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

/// Type alias for flush listener functions.
type FlushListener<T> = Arc<dyn Fn(&FlushEvent<T>) + Send + Sync>;

/// Bookkeeping guarded as a single unit by the sequencer's lock.
struct SequencerState<T> {
    /// Finished set, indexed by item.
    finished: Vec<bool>,

    /// Payloads of finished items that are not flushed yet.
    pending: Vec<Option<T>>,

    /// Lowest index not yet flushed.
    next_expected: usize,

    /// Number of distinct finished indices.
    completed: usize,

    /// Ordered output, always exactly `[0, next_expected)`.
    output: Vec<T>,

    /// Number of flushes performed.
    flushes: u64,

    /// Channel subscribers receiving every flush event.
    subscribers: Vec<Sender<FlushEvent<T>>>,
}

impl<T> SequencerState<T> {
    fn new(total: usize) -> Self {
        Self {
            finished: vec![false; total],
            pending: (0..total).map(|_| None).collect(),
            next_expected: 0,
            completed: 0,
            output: Vec::with_capacity(total),
            flushes: 0,
            subscribers: Vec::new(),
        }
    }

    /// Largest `highest` such that every index in `[from, highest]` is finished.
    ///
    /// `from` must itself be finished.
    fn highest_contiguous(&self, from: usize) -> usize {
        let run = self.finished[from..].iter().take_while(|&&done| done).count();
        from + run - 1
    }
}

/// An out-of-order completion sequencer.
///
/// The Sequencer tracks `N` items identified by indices `[0, N)`. Items report
/// completion in any order and from any thread. Whenever a completion fills the
/// slot at the next-expected index, the whole contiguous run of finished items
/// starting there is flushed as a single batch, and the pointer moves past it.
///
/// The finished set, the next-expected pointer and the output are mutated
/// under one lock, so concurrent completions can never duplicate a flush or
/// skip an index.
///
/// # Examples
///
/// ```
/// use inorder_rs::sequencer::{Sequencer, SequencerResult};
///
/// let sequencer = Sequencer::<usize>::new(3);
///
/// sequencer.on_item_completed(2).ok();
/// assert!(sequencer.output_so_far().is_empty());
///
/// sequencer.on_item_completed(0).ok();
/// assert_eq!(sequencer.output_so_far(), vec![0]);
///
/// let result = sequencer.on_item_completed(1).ok();
/// assert_eq!(result, Some(SequencerResult::Flushed { start: 1, end: 2 }));
/// assert_eq!(sequencer.output_so_far(), vec![0, 1, 2]);
/// assert!(sequencer.is_drained());
/// ```
pub struct Sequencer<T: Clone + Send + Sync + 'static> {
    /// Instance id, attached to every log line.
    id: Uuid,

    /// Item count and duplicate policy.
    config: SequencerConfig,

    /// All mutable bookkeeping.
    state: Mutex<SequencerState<T>>,

    /// Listeners called synchronously for each flush.
    listeners: Vec<FlushListener<T>>,

    /// Publishes `next_expected` after every flush.
    progress: watch::Sender<usize>,
}

impl<T: Clone + Send + Sync + 'static> Sequencer<T> {
    /// Creates a new Sequencer for `total` items with lenient duplicate handling.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of items; valid indices are `[0, total)`
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self::with_config(SequencerConfig::new(total))
    }

    /// Creates a new Sequencer from a configuration.
    #[must_use]
    pub fn with_config(config: SequencerConfig) -> Self {
        let id = Uuid::new_v4();
        let (progress, _) = watch::channel(0);

        debug!(
            sequencer = %id,
            total = config.total_items,
            strict_duplicates = config.strict_duplicates,
            "sequencer created"
        );

        Self {
            id,
            state: Mutex::new(SequencerState::new(config.total_items)),
            config,
            listeners: Vec::new(),
            progress,
        }
    }

    /// Registers a flush listener.
    ///
    /// Listeners are called synchronously, in flush order, while the sequencer
    /// lock is held, after progress and subscribers have seen the flush. A
    /// listener must not call back into the sequencer.
    ///
    /// # Arguments
    ///
    /// * `listener` - Function to call for each flush
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&FlushEvent<T>) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Returns a channel that receives every flush performed after this call.
    ///
    /// Dropping the receiver unsubscribes it at the next flush.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<FlushEvent<T>> {
        let (tx, rx) = channel::unbounded();
        self.state.lock().subscribers.push(tx);
        rx
    }

    /// Reports that the item at `index` completed with `item` as its payload.
    ///
    /// If `index` is the next-expected index, the contiguous run of finished
    /// items starting there is flushed as one batch. Otherwise the completion
    /// is only recorded.
    ///
    /// # Errors
    ///
    /// - [`SequencerError::IndexOutOfRange`] if `index >= total`
    /// - [`SequencerError::DuplicateCompletion`] if `index` already completed
    ///   and the sequencer runs with strict duplicate checking
    pub fn complete(&self, index: usize, item: T) -> Result<SequencerResult, SequencerError> {
        let total = self.config.total_items;
        if index >= total {
            error!(sequencer = %self.id, index, total, "completion index out of range");
            return Err(SequencerError::IndexOutOfRange { index, total });
        }

        let mut state = self.state.lock();

        if state.finished[index] {
            warn!(sequencer = %self.id, index, "item reported as completed more than once");
            if self.config.strict_duplicates {
                return Err(SequencerError::DuplicateCompletion { index });
            }
            return Ok(SequencerResult::Duplicate { index });
        }

        state.finished[index] = true;
        state.pending[index] = Some(item);
        state.completed += 1;
        trace!(sequencer = %self.id, index, "item finished");

        let next_expected = state.next_expected;
        if index != next_expected {
            debug!(sequencer = %self.id, index, next_expected, "completion deferred behind gap");
            return Ok(SequencerResult::Deferred {
                index,
                next_expected,
            });
        }

        let start = index;
        let end = state.highest_contiguous(start);
        let items: Vec<T> = state.pending[start..=end]
            .iter_mut()
            .filter_map(Option::take)
            .collect();

        state.output.extend_from_slice(&items);
        state.next_expected = end + 1;
        state.flushes += 1;

        info!(
            sequencer = %self.id,
            start,
            end,
            loaded = state.output.len(),
            "flushed contiguous batch"
        );

        // Progress and subscribers are published before user listeners run, so a
        // panicking listener cannot leave them behind the committed state.
        self.progress.send_replace(state.next_expected);
        let event = FlushEvent::new(state.flushes, nanos_since_epoch(), start, end, items);
        state
            .subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());

        if state.next_expected == total {
            info!(sequencer = %self.id, total, flushes = state.flushes, "sequencer drained");
        }

        for listener in &self.listeners {
            listener(&event);
        }

        Ok(SequencerResult::Flushed { start, end })
    }

    /// Returns the ordered output delivered so far.
    ///
    /// This is always the payloads of `[0, next_expected)` in index order.
    #[must_use]
    pub fn output_so_far(&self) -> Vec<T> {
        self.state.lock().output.clone()
    }

    /// Lowest index not yet flushed.
    #[must_use]
    pub fn next_expected(&self) -> usize {
        self.state.lock().next_expected
    }

    /// Returns `true` if `index` has completed, flushed or not.
    #[must_use]
    pub fn is_finished(&self, index: usize) -> bool {
        self.state
            .lock()
            .finished
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// Number of items tracked.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.config.total_items
    }

    /// Instance id of this sequencer.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Configuration the sequencer was created with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> SequencerStatus {
        if self.next_expected() == self.total() {
            SequencerStatus::Drained
        } else {
            SequencerStatus::Active
        }
    }

    /// Returns `true` once every item has been flushed.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.status() == SequencerStatus::Drained
    }

    /// Returns a consistent view of the sequencer's progress.
    #[must_use]
    pub fn snapshot(&self) -> SequencerSnapshot {
        let state = self.state.lock();
        let status = if state.next_expected == self.total() {
            SequencerStatus::Drained
        } else {
            SequencerStatus::Active
        };

        SequencerSnapshot {
            id: self.id,
            total: self.total(),
            next_expected: state.next_expected,
            completed: state.completed,
            flushes: state.flushes,
            status,
        }
    }

    /// Returns a receiver that observes `next_expected` after every flush.
    ///
    /// Consumers that want a stall timeout apply it to this receiver.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<usize> {
        self.progress.subscribe()
    }

    /// Waits until every item has been flushed.
    pub async fn wait_drained(&self) {
        let total = self.total();
        let mut progress = self.progress.subscribe();
        // The sender lives in `self`, so the channel stays open while we wait.
        let _ = progress.wait_for(|&next| next == total).await;
    }

    /// Creates one completion handle per index.
    ///
    /// Each handle is consumed when it signals, so a given handle can
    /// complete its item at most once.
    #[must_use]
    pub fn handles(self: &Arc<Self>) -> Vec<ItemHandle<T>> {
        (0..self.total())
            .map(|index| ItemHandle::new(index, Arc::clone(self)))
            .collect()
    }
}

impl Sequencer<usize> {
    /// Reports completion of `index` for sequencers whose payload is the
    /// index itself.
    ///
    /// # Errors
    ///
    /// Same as [`Sequencer::complete`].
    pub fn on_item_completed(&self, index: usize) -> Result<SequencerResult, SequencerError> {
        self.complete(index, index)
    }
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
