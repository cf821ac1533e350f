/// Rest days used when a game has no schedule entry
pub const DEFAULT_HOME_REST_DAYS: u32 = 2;
pub const DEFAULT_AWAY_REST_DAYS: u32 = 1;

/// Provider identity columns that never reach the models
pub const EXCLUDED_STAT_COLUMNS: &[&str] = &["TEAM_ID", "TEAM_NAME"];

/// Progress milestones (percent)
pub const PROGRESS_ACCEPTED: u8 = 10;
pub const PROGRESS_MODELS_STARTING: u8 = 30;
pub const PROGRESS_DONE: u8 = 100;

/// Decimal places for reported confidences and decision metrics
pub const CONFIDENCE_DECIMALS: u32 = 1;
pub const METRIC_DECIMALS: u32 = 2;

pub const DEFAULT_LOG_FILTER: &str = "info";
