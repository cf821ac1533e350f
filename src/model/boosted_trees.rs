use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::features::FeatureVector;
use super::model_trait::{validate_batch, ClassProbabilities, ProbabilityModel};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TreeNode {
    /// `row[feature] < threshold` → `yes`, otherwise `no`
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    fn leaf_value(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf(value) => return value,
                TreeNode::Split { feature, threshold, yes, no } => {
                    index = if row[feature] < threshold { yes } else { no };
                }
            }
        }
    }
}

fn default_base_score() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
struct TreeEnsembleArtifact {
    #[serde(default = "default_base_score")]
    base_score: f64,
    num_features: usize,
    trees: Vec<Tree>,
}

/// Gradient-boosted tree ensemble with a logistic output (binary classifier)
///
/// p(class 1) = sigmoid(logit(base_score) + Σ leaf values)
#[derive(Debug)]
pub struct BoostedTreeModel {
    name: String,
    base_margin: f64,
    num_features: usize,
    trees: Vec<Tree>,
}

impl BoostedTreeModel {
    pub fn from_json_str(name: &str, json: &str) -> Result<Self> {
        let artifact: TreeEnsembleArtifact = serde_json::from_str(json)?;
        let malformed = |reason: String| PipelineError::MalformedArtifact {
            path: name.to_string(),
            reason,
        };

        if !(artifact.base_score > 0.0 && artifact.base_score < 1.0) {
            return Err(malformed(format!("base_score {} outside (0, 1)", artifact.base_score)));
        }

        for (t, tree) in artifact.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(malformed(format!("tree {} has no nodes", t)));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split { feature, yes, no, .. } = *node {
                    if feature >= artifact.num_features {
                        return Err(malformed(format!(
                            "tree {} node {} splits on feature {} of {}",
                            t, i, feature, artifact.num_features
                        )));
                    }
                    // children must come later in the node list, which rules out cycles
                    if yes <= i || no <= i || yes >= tree.nodes.len() || no >= tree.nodes.len() {
                        return Err(malformed(format!("tree {} node {} has invalid children", t, i)));
                    }
                }
            }
        }

        let base = artifact.base_score;
        Ok(Self {
            name: name.to_string(),
            base_margin: (base / (1.0 - base)).ln(),
            num_features: artifact.num_features,
            trees: artifact.trees,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tree model {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let model = Self::from_json_str(&name, &json)
            .with_context(|| format!("Failed to load tree model {}", path.display()))?;

        info!("Loaded tree model {} ({} trees, {} features)", model.name, model.trees.len(), model.num_features);
        Ok(model)
    }

    fn margin(&self, row: &[f64]) -> f64 {
        self.base_margin + self.trees.iter().map(|t| t.leaf_value(row)).sum::<f64>()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ProbabilityModel for BoostedTreeModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dim(&self) -> usize {
        self.num_features
    }

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<ClassProbabilities>> {
        validate_batch(self, batch)?;
        Ok(batch
            .iter()
            .map(|row| ClassProbabilities::from_p1(sigmoid(self.margin(row.values()))))
            .collect())
    }
}
