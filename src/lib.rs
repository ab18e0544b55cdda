/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # inorder-rs
//!
//! An out-of-order completion sequencer.
//!
//! A batch of `N` work items is started up front. Each item finishes at an
//! unpredictable time, in an unpredictable order, possibly on another thread.
//! The [`Sequencer`] receives those completions and delivers the items
//! downstream strictly in index order. Every contiguous run of finished items
//! is flushed as one batch as soon as the gap in front of it closes.
//!
//! ## Features
//!
//! - **Strict ordering**: the output is always a gap-free prefix `[0, k)`, and
//!   `k` never decreases.
//! - **Maximal batching**: a single completion can release any number of items
//!   that were waiting behind it.
//! - **Thread-safe**: completions may arrive concurrently from tasks, threads
//!   or timer callbacks.
//! - **Push or poll**: read the output at any time, register listeners, or
//!   subscribe to a channel of [`FlushEvent`]s.
//! - **Tokio driver**: [`InOrderLoader`] runs item jobs with per-item timeouts
//!   and fail-fast abort.
//!
//! ## Example
//!
//! ```
//! use inorder_rs::{Sequencer, SequencerResult};
//!
//! let sequencer = Sequencer::<usize>::new(6);
//!
//! for index in [3, 4, 5] {
//!     sequencer.on_item_completed(index).ok();
//! }
//! sequencer.on_item_completed(0).ok();
//! sequencer.on_item_completed(1).ok();
//! assert_eq!(sequencer.output_so_far(), vec![0, 1]);
//!
//! let result = sequencer.on_item_completed(2).ok();
//! assert_eq!(result, Some(SequencerResult::Flushed { start: 2, end: 5 }));
//! assert!(sequencer.is_drained());
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Flushes are reported at `info`,
//! deferred completions at `debug`, duplicates at `warn` and out-of-range
//! indices at `error`. Installing a subscriber is left to the application.

pub mod loader;
pub mod sequencer;

pub use loader::{InOrderLoader, LoadError};
pub use sequencer::{
    ConfigError, FlushEvent, ItemHandle, Sequencer, SequencerConfig, SequencerError,
    SequencerResult, SequencerSnapshot, SequencerStatus,
};
