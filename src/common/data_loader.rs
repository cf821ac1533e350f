use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::slate::Slate;

/// 슬레이트 파일과 학습된 모델 파일 로딩을 담당하는 유틸리티
pub struct DataLoader;

impl DataLoader {
    /// Glob 패턴에 맞는 모델 파일 하나를 선택 (정렬 후 마지막 파일)
    pub fn find_artifact(dir: &Path, pattern: &str) -> Result<PathBuf> {
        let full_pattern = dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let mut candidates = Vec::new();
        for entry in glob(&full_pattern).context("Failed to read glob pattern")? {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        candidates.push(path);
                    }
                }
                Err(e) => warn!("Error reading path: {}", e),
            }
        }

        // Sort files for consistent ordering
        candidates.sort();

        let artifact = candidates
            .pop()
            .ok_or_else(|| PipelineError::ArtifactNotFound(full_pattern.to_string()))?;

        info!("Selected model artifact {}", artifact.display());
        Ok(artifact)
    }

    pub fn load_slate(path: &Path) -> Result<Slate> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read slate file {}", path.display()))?;
        let slate = Slate::from_json_str(&json)
            .with_context(|| format!("Invalid slate file {}", path.display()))?;

        info!(
            "Loaded slate {}: {} game(s), {} team stat row(s)",
            path.display(),
            slate.games.len(),
            slate.team_stats.len()
        );
        Ok(slate)
    }
}
