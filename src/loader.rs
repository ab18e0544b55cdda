/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Tokio driver for sequenced item jobs.
//!
//! [`InOrderLoader`] starts one task per item, runs the caller's work future
//! for that index, and completes the item's [`ItemHandle`] with the result.
//! Timeouts and failure handling belong here, on the work side. The
//! [`Sequencer`] itself never times out.
//!
//! # Examples
//!
//! ```no_run
//! use inorder_rs::loader::InOrderLoader;
//! use inorder_rs::sequencer::Sequencer;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = InOrderLoader::new(Sequencer::<String>::new(20))
//!     .with_item_timeout(Duration::from_secs(5));
//!
//! let pages = loader
//!     .run(|index| async move {
//!         tokio::time::sleep(Duration::from_millis(10 * (20 - index as u64))).await;
//!         Ok::<_, std::io::Error>(format!("page {index}"))
//!     })
//!     .await?;
//! assert_eq!(pages[0], "page 0");
//! # Ok(())
//! # }
//! ```
//!
//! [`ItemHandle`]: crate::sequencer::ItemHandle

use crate::sequencer::{Sequencer, SequencerError};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, trace, warn};

/// Errors that stop a load before every item completed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An item's work returned an error.
    #[error("item {index} failed: {reason}")]
    ItemFailed {
        /// Index of the failed item.
        index: usize,
        /// Rendered error from the work future.
        reason: String,
    },

    /// An item's work exceeded the per-item timeout.
    #[error("item {index} did not complete within {timeout:?}")]
    ItemTimedOut {
        /// Index of the item that timed out.
        index: usize,
        /// The configured limit.
        timeout: Duration,
    },

    /// An item task panicked or was cancelled.
    #[error("item task did not finish: {0}")]
    Join(#[from] JoinError),

    /// The sequencer rejected a completion.
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

/// Runs one job per item and feeds the completions into a [`Sequencer`].
pub struct InOrderLoader<T: Clone + Send + Sync + 'static> {
    sequencer: Arc<Sequencer<T>>,
    item_timeout: Option<Duration>,
}

impl<T: Clone + Send + Sync + 'static> InOrderLoader<T> {
    /// Creates a loader around a fresh sequencer.
    #[must_use]
    pub fn new(sequencer: Sequencer<T>) -> Self {
        Self::from_shared(Arc::new(sequencer))
    }

    /// Creates a loader around a sequencer that is also observed elsewhere.
    #[must_use]
    pub fn from_shared(sequencer: Arc<Sequencer<T>>) -> Self {
        Self {
            sequencer,
            item_timeout: None,
        }
    }

    /// Fails an item whose work takes longer than `timeout`.
    #[must_use]
    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = Some(timeout);
        self
    }

    /// The sequencer receiving completions.
    #[must_use]
    pub fn sequencer(&self) -> &Arc<Sequencer<T>> {
        &self.sequencer
    }

    /// Runs `work(index)` for every item concurrently and returns the ordered
    /// output once the sequencer drains.
    ///
    /// Items the sequencer has already seen complete are skipped, so a shared
    /// sequencer with prior progress only runs the missing jobs. On the first
    /// failure the remaining jobs are aborted. Whatever prefix was flushed
    /// before that stays in the sequencer.
    ///
    /// # Errors
    ///
    /// - [`LoadError::ItemFailed`] if a work future returns an error
    /// - [`LoadError::ItemTimedOut`] if a work future exceeds the item timeout
    /// - [`LoadError::Join`] if a job panics
    /// - [`LoadError::Sequencer`] if the sequencer rejects a completion
    pub async fn run<F, Fut, E>(self, mut work: F) -> Result<Vec<T>, LoadError>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let id = self.sequencer.id();
        if self.sequencer.is_drained() {
            debug!(sequencer = %id, "sequencer already drained, no jobs to run");
            return Ok(self.sequencer.output_so_far());
        }
        debug!(
            sequencer = %id,
            total = self.sequencer.total(),
            next_expected = self.sequencer.next_expected(),
            "starting item jobs"
        );

        let mut tasks = JoinSet::new();
        for handle in self.sequencer.handles() {
            let index = handle.index();
            if self.sequencer.is_finished(index) {
                trace!(sequencer = %id, index, "item already completed, skipping job");
                continue;
            }
            let job = work(index);
            let item_timeout = self.item_timeout;

            tasks.spawn(async move {
                let outcome = match item_timeout {
                    Some(limit) => tokio::time::timeout(limit, job)
                        .await
                        .map_err(|_| LoadError::ItemTimedOut {
                            index,
                            timeout: limit,
                        })?,
                    None => job.await,
                };
                let payload = outcome.map_err(|e| LoadError::ItemFailed {
                    index,
                    reason: e.to_string(),
                })?;

                handle.complete(payload)?;
                Ok::<usize, LoadError>(index)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let err = match joined {
                Ok(Ok(index)) => {
                    trace!(sequencer = %id, index, "item job finished");
                    continue;
                }
                Ok(Err(err)) => err,
                Err(join_err) => LoadError::Join(join_err),
            };

            warn!(
                sequencer = %id,
                error = %err,
                next_expected = self.sequencer.next_expected(),
                "aborting remaining item jobs"
            );
            tasks.abort_all();
            return Err(err);
        }

        Ok(self.sequencer.output_so_far())
    }
}
