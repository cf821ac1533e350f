use std::collections::HashMap;

/// One team's season statistics, in provider column order
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStatRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl TeamStatRow {
    pub fn new(columns: Vec<(String, f64)>) -> Self {
        let (names, values) = columns.into_iter().unzip();
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

pub type TeamStats = HashMap<String, TeamStatRow>;
