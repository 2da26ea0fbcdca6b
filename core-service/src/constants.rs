//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Generation defaults, node naming and artifact naming live here.

/// Default number of simulated nodes
pub const DEFAULT_NUM_NODES: u32 = 100;

/// Default history length (days)
pub const DEFAULT_HISTORY_DAYS: u32 = 10;

/// Default sampling interval (minutes)
pub const DEFAULT_INTERVAL_MINUTES: u32 = 10;

/// Longest history a run may cover (days)
pub const MAX_HISTORY_DAYS: u32 = 36_500;

/// Minutes in one calendar day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// First generated node gets `NODE-1000`
pub const NODE_ID_BASE: u32 = 1000;

/// Prefix of every node identifier
pub const NODE_ID_PREFIX: &str = "NODE-";

/// Default ensemble size for the risk scorer
pub const DEFAULT_ENSEMBLE_SIZE: usize = 100;

/// Fixed ensemble seed, so identical series give identical probabilities
pub const DEFAULT_ENSEMBLE_SEED: u64 = 42;

/// Trailing window (records) for `rolling_avg_cpu`
pub const ROLLING_CPU_WINDOW: usize = 6;

/// Prefix of generated CSV artifacts
pub const ARTIFACT_PREFIX: &str = "telemetry";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Node Twin";
