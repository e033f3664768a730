//! Job catalog loading

use crate::domain::Job;
use crate::error::{JswpError, Result};
use std::fs;
use std::path::Path;

/// Loads a JSON array of jobs from `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Job>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        JswpError::CatalogError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let jobs: Vec<Job> = serde_json::from_str(&contents).map_err(|e| {
        JswpError::CatalogError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), jobs = jobs.len(), "loaded job catalog");
    Ok(jobs)
}
