//! Import progress events and decile throttling.

use std::fmt;

/// Notification emitted during a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportEvent {
    /// The directory contained no regular files.
    NoTilesFound,
    /// Files were found and the import is starting.
    Started,
    /// The given percentage of files has been imported.
    Progress(u8),
    /// The walk finished.
    Completed,
}

impl fmt::Display for ImportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTilesFound => f.write_str("No tiles found in directory."),
            Self::Started => f.write_str("Caching map tiles in progress"),
            Self::Progress(percentage) => write!(f, "Map tiles caching progress {percentage}%"),
            Self::Completed => f.write_str("Operation completed successfully."),
        }
    }
}

/// Decides when an import has crossed another reportable decile.
///
/// A percentage is reported only when it is a multiple of ten and at least
/// ten points above the last reported one. Percentages are floored, so totals
/// that do not divide evenly can skip deciles; a total of 7 reports only 100.
///
/// # Examples
///
/// ```
/// use tilecache_import::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new(20);
/// assert_eq!(tracker.record(1), None);
/// assert_eq!(tracker.record(2), Some(10));
/// assert_eq!(tracker.record(3), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    total: u64,
    last_reported: u64,
}

impl ProgressTracker {
    /// Tracker for an import of `total` files.
    #[must_use]
    pub const fn new(total: u64) -> Self {
        Self {
            total,
            last_reported: 0,
        }
    }

    /// Record that `processed` files have been imported and return the
    /// percentage to report, if any.
    pub fn record(&mut self, processed: u64) -> Option<u8> {
        let percentage = processed.checked_mul(100)?.checked_div(self.total)?;
        if percentage < self.last_reported.saturating_add(10) || !percentage.is_multiple_of(10) {
            return None;
        }
        self.last_reported = percentage;
        u8::try_from(percentage).ok()
    }

    /// Last percentage returned by [`Self::record`], or zero.
    #[must_use]
    pub const fn last_reported(&self) -> u64 {
        self.last_reported
    }
}
