use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Which model family runs a prediction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Gradient-boosted trees ("xgb")
    Boosted,
    /// Neural network ("nn")
    Neural,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Boosted, ModelKind::Neural];

    /// Accepted CLI spellings, short key first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ModelKind::Boosted => &["xgb", "xgboost"],
            ModelKind::Neural => &["nn", "neural"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Boosted => "XGBoost",
            ModelKind::Neural => "Neural Network",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&key.as_str()))
            .ok_or(PipelineError::UnknownModel(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_keys() {
        assert_eq!("xgb".parse::<ModelKind>().unwrap(), ModelKind::Boosted);
        assert_eq!(" NN ".parse::<ModelKind>().unwrap(), ModelKind::Neural);
        assert!(matches!(
            "forest".parse::<ModelKind>(),
            Err(PipelineError::UnknownModel(k)) if k == "forest"
        ));
    }

    #[test]
    fn test_key_round_trips() {
        for kind in ModelKind::ALL {
            for alias in kind.aliases() {
                assert_eq!(alias.parse::<ModelKind>().unwrap(), kind);
            }
        }
        assert_eq!("XGBoost".parse::<ModelKind>().unwrap(), ModelKind::Boosted);
    }
}
