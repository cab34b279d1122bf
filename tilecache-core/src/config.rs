//! Configuration for locating and populating the tile cache.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Months, Utc};

/// Directory under the storage root that holds the tile cache.
pub const DEFAULT_NAMESPACE: &str = "osmdroid";

/// Provider label assigned to tiles imported from a directory tree.
pub const DEFAULT_PROVIDER: &str = "CustomTiles";

/// Number of years a freshly written tile stays valid.
pub const DEFAULT_EXPIRY_YEARS: u32 = 10;

const CACHE_SUBDIRECTORY: &str = "tiles";
const CACHE_FILE_NAME: &str = "cache.db";

/// Settings shared by the store and the importer.
///
/// The database lives at `{storage_root}/{namespace}/tiles/cache.db`.
///
/// # Examples
///
/// ```
/// use tilecache_core::TileCacheConfig;
///
/// let config = TileCacheConfig::new("/data/app/files");
/// assert_eq!(
///     config.database_path().as_str(),
///     "/data/app/files/osmdroid/tiles/cache.db"
/// );
/// assert_eq!(config.default_provider, "CustomTiles");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct TileCacheConfig {
    /// Application-private directory under which the cache is created.
    pub storage_root: Utf8PathBuf,
    /// Subdirectory of the storage root that owns the cache.
    pub namespace: String,
    /// Provider used when an import does not name one.
    pub default_provider: String,
    /// Years added to the write time to compute each tile's expiry.
    pub expiry_years: u32,
}

impl TileCacheConfig {
    /// Configuration rooted at `storage_root` with default settings.
    #[must_use]
    pub fn new(storage_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            ..Self::default()
        }
    }

    /// Replace the namespace directory.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the default provider label.
    #[must_use]
    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = provider.into();
        self
    }

    /// Replace the expiry horizon.
    #[must_use]
    pub const fn with_expiry_years(mut self, years: u32) -> Self {
        self.expiry_years = years;
        self
    }

    /// Location of the SQLite database file.
    #[must_use]
    pub fn database_path(&self) -> Utf8PathBuf {
        self.cache_dir().join(CACHE_FILE_NAME)
    }

    /// Directory that holds the database file.
    #[must_use]
    pub fn cache_dir(&self) -> Utf8PathBuf {
        self.storage_root
            .join(&self.namespace)
            .join(CACHE_SUBDIRECTORY)
    }

    /// Expiry horizon derived from [`Self::expiry_years`].
    #[must_use]
    pub const fn expiry(&self) -> ExpiryHorizon {
        ExpiryHorizon::years(self.expiry_years)
    }

    /// Storage root as a path reference.
    #[must_use]
    pub fn storage_root(&self) -> &Utf8Path {
        &self.storage_root
    }
}

impl Default for TileCacheConfig {
    fn default() -> Self {
        Self {
            storage_root: Utf8PathBuf::from("."),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            default_provider: DEFAULT_PROVIDER.to_owned(),
            expiry_years: DEFAULT_EXPIRY_YEARS,
        }
    }
}

/// Calendar horizon added to the write time of every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryHorizon {
    years: u32,
}

impl ExpiryHorizon {
    /// Horizon of `years` calendar years.
    #[must_use]
    pub const fn years(years: u32) -> Self {
        Self { years }
    }

    /// Number of calendar years in the horizon.
    #[must_use]
    pub const fn as_years(&self) -> u32 {
        self.years
    }

    /// Expiry timestamp in milliseconds since the Unix epoch for a tile
    /// written at `now`.
    ///
    /// Month arithmetic clamps to the end of the month, so a write on
    /// 29 February expires on 28 February when the target year is not a
    /// leap year. Returns `None` when the result is not representable.
    #[must_use]
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<i64> {
        let months = self.years.checked_mul(12)?;
        now.checked_add_months(Months::new(months))
            .map(|expiry| expiry.timestamp_millis())
    }
}

impl Default for ExpiryHorizon {
    fn default() -> Self {
        Self::years(DEFAULT_EXPIRY_YEARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn database_path_nests_namespace_and_tiles_dir() {
        let config = TileCacheConfig::new("/srv/files").with_namespace("maps");
        assert_eq!(config.database_path(), Utf8PathBuf::from("/srv/files/maps/tiles/cache.db"));
        assert_eq!(config.cache_dir(), Utf8PathBuf::from("/srv/files/maps/tiles"));
    }

    #[rstest]
    fn defaults_match_the_android_layout() {
        let config = TileCacheConfig::default();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.default_provider, DEFAULT_PROVIDER);
        assert_eq!(config.expiry(), ExpiryHorizon::years(10));
    }

    #[rstest]
    #[case(utc(2024, 3, 1), utc(2034, 3, 1))]
    #[case(utc(2024, 2, 29), utc(2034, 2, 28))]
    #[case(utc(2023, 12, 31), utc(2033, 12, 31))]
    fn adds_calendar_years(#[case] now: DateTime<Utc>, #[case] expected: DateTime<Utc>) {
        let expires = ExpiryHorizon::years(10).expires_at(now).expect("in range");
        assert_eq!(expires, expected.timestamp_millis());
    }

    #[rstest]
    fn zero_years_expire_immediately() {
        let now = utc(2025, 6, 1);
        assert_eq!(
            ExpiryHorizon::years(0).expires_at(now),
            Some(now.timestamp_millis())
        );
    }

    #[rstest]
    fn unrepresentable_horizon_yields_none() {
        assert_eq!(ExpiryHorizon::years(u32::MAX).expires_at(utc(2025, 1, 1)), None);
    }
}
