use std::env;
use std::path::PathBuf;

const DEFAULT_MODELS_DIR: &str = "Models";

/// Environment override for the trained artifact root
pub const MODELS_DIR_ENV: &str = "NBA_MODELS_DIR";

/// Sub-directory per model family
pub const BOOSTED_MODEL_DIR: &str = "XGBoost_Models";
pub const NEURAL_MODEL_DIR: &str = "NN_Models";

/// Artifact file patterns (moneyline vs. over/under)
pub const BOOSTED_MONEYLINE_PATTERN: &str = "*ML*.json";
pub const BOOSTED_TOTALS_PATTERN: &str = "*UO*.json";
pub const NEURAL_MONEYLINE_PATTERN: &str = "*ML*.safetensors";
pub const NEURAL_TOTALS_PATTERN: &str = "*UO*.safetensors";

pub fn get_models_dir() -> PathBuf {
    env::var(MODELS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELS_DIR))
}
