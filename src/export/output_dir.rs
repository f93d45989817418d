//! Clean-slate output directory handling.

use std::fs;
use std::path::Path;

use crate::error::{MixError, Result};

/// What happened to the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepared {
    /// Did not exist and was created.
    Created,
    /// Existed but was empty.
    ReusedEmpty,
    /// Existed with content that was deleted.
    Cleared,
}

/// Make `dir` an empty directory.
///
/// Existing content is deleted only when `force` is set; otherwise the
/// call fails so earlier output is never lost by accident.
pub fn prepare_output_dir(dir: &Path, force: bool) -> Result<Prepared> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(MixError::io(dir, "Output path exists and is not a directory"));
        }

        let has_content = fs::read_dir(dir)
            .map_err(|e| MixError::io(dir, format!("Failed to read output directory: {}", e)))?
            .next()
            .is_some();

        if !has_content {
            return Ok(Prepared::ReusedEmpty);
        }

        if !force {
            return Err(MixError::Io {
                path: dir.to_path_buf(),
                message: "Output directory is not empty".to_string(),
                help: Some("Use --force to delete it and regenerate the collection".to_string()),
            });
        }

        fs::remove_dir_all(dir)
            .map_err(|e| MixError::io(dir, format!("Failed to clear output directory: {}", e)))?;
        create(dir)?;
        return Ok(Prepared::Cleared);
    }

    create(dir)?;
    Ok(Prepared::Created)
}

fn create(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| MixError::io(dir, format!("Failed to create output directory: {}", e)))
}
