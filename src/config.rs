use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Fixed dashboard constants
// ---------------------------------------------------------------------------

/// Relative path of the expenditure CSV read at startup.
pub const DATA_PATH: &str = "healthexp.csv";

/// Seconds between two synthetic feed ticks.
pub const UPDATE_INTERVAL_SECS: u64 = 10;

/// Maximum number of synthetic records kept in the feed.
pub const FEED_CAPACITY: usize = 10;

pub const EXPENDITURE_BOUNDS: (f64, f64) = (0.0, 5000.0);
pub const EXPENDITURE_DEFAULT: (f64, f64) = (500.0, 3000.0);

pub const AGE_BOUNDS: (u32, u32) = (18, 100);
pub const AGE_DEFAULT: (u32, u32) = (25, 60);

/// Synthetic expenditure amounts are drawn uniformly from this range.
pub const SYNTHETIC_EXPENDITURE: (f64, f64) = (100.0, 5000.0);

pub const HEATMAP_BINS: (usize, usize) = (20, 20);

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Everything a session needs to know about its environment.
///
/// The production values are the constants above; tests build their own
/// instance with a smaller feed or a shorter interval.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub update_interval: Duration,
    pub feed_capacity: usize,
    pub heatmap_bins: (usize, usize),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            update_interval: Duration::from_secs(UPDATE_INTERVAL_SECS),
            feed_capacity: FEED_CAPACITY,
            heatmap_bins: HEATMAP_BINS,
        }
    }
}
