use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{glob, Pattern};

use super::loader::is_supported;
use super::model::Partition;
use crate::error::ReportError;

/// List result files `<base>/<partition>/<partition>_*` in discovery order.
///
/// Files with an extension the loader cannot read are left out. An empty
/// list is not an error here.
pub fn select_files(base: &Path, partition: Partition) -> Result<Vec<PathBuf>> {
    let dir = base.join(partition.key());
    let pattern = format!(
        "{}/{}_*",
        Pattern::escape(&dir.to_string_lossy()),
        partition.key()
    );
    log::debug!("Selecting result files matching {pattern}");

    let mut files = Vec::new();
    for entry in glob(&pattern).map_err(ReportError::from)? {
        let path = entry.context("listing result files")?;
        if !path.is_file() {
            continue;
        }
        if !is_supported(&path) {
            log::debug!("Ignoring {}: unsupported extension", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(files)
}
