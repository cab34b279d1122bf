//! Bulk import of tile pyramids into the offline tile cache.
//!
//! Responsibilities:
//! - Walk `{zoom}/{column}/{row}.{ext}` directory trees and store every tile.
//! - Report progress in deciles through an injected [`Notifier`].
//!
//! Boundaries:
//! - Storage layout and key encoding live in `tilecache-core`.
//! - All work is blocking; hosts keep it off latency-sensitive threads.
//!
//! Invariants:
//! - Files that do not describe a tile are skipped, never reported as errors.
//! - Each tile commits independently, so an aborted import leaves a
//!   consistent, partially filled cache.

#![forbid(unsafe_code)]

mod error;
mod importer;
mod layout;
mod notify;
mod progress;

pub use error::ImportError;
pub use importer::{ImportReport, TileImporter};
pub use layout::{TileLayout, ZxyLayout};
pub use notify::{ChannelNotifier, LogNotifier, Notifier, RecordingNotifier};
pub use progress::{ImportEvent, ProgressTracker};
