/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer module for in-order delivery of out-of-order completions.
//!
//! This module provides a Sequencer that tracks `N` indexed items, accepts
//! their completions in any order and from any thread, and delivers them
//! downstream strictly in index order. Every contiguous run of completed items
//! is flushed as a single batch, like a reorder buffer in network reassembly.
//!
//! # Architecture
//!
//! - Each item owns a one-shot [`ItemHandle`] that signals its completion
//! - The finished set, next-expected pointer and output share a single lock
//! - A completion at the next-expected index flushes the whole contiguous run
//! - Flushes are pushed to listeners and channel subscribers in order
//! - Progress is published on a watch channel for stall detection
//!
//! # Examples
//!
//! ```
//! use inorder_rs::sequencer::Sequencer;
//! use std::sync::{Arc, Mutex};
//!
//! let mut sequencer = Sequencer::<usize>::new(4);
//!
//! let batches = Arc::new(Mutex::new(Vec::new()));
//! let batches_clone = batches.clone();
//! sequencer.add_listener(move |event| {
//!     batches_clone.lock().unwrap().push((event.start, event.end));
//! });
//!
//! for index in [3, 1, 2, 0] {
//!     sequencer.on_item_completed(index).ok();
//! }
//!
//! assert_eq!(sequencer.output_so_far(), vec![0, 1, 2, 3]);
//! assert_eq!(*batches.lock().unwrap(), vec![(0, 3)]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod item;
pub mod result;
pub mod snapshot;

#[cfg(test)]
mod tests;

// Re-export main types
pub use config::{ConfigError, SequencerConfig};
pub use self::core::Sequencer;
pub use error::SequencerError;
pub use event::FlushEvent;
pub use item::ItemHandle;
pub use result::SequencerResult;
pub use snapshot::{SequencerSnapshot, SequencerStatus};
