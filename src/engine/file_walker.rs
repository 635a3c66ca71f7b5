use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use ignore::WalkBuilder;
use tracing::debug;

/// Extensions of the exports we know how to read
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".xlsx", ".csv"];

/// List the exports directly inside `root`, in directory-listing order.
///
/// - Only immediate children; subdirectories are not entered
/// - No ignore files or hidden-file filtering; every entry is considered
/// - Symlinks are followed, so a linked export counts as a file
/// - Keeps files whose name ends in a supported extension
/// - Skips summaries this tool wrote earlier (stem ending in `suffix`)
pub fn discover_exports(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("input directory {} does not exist", root.display());
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false) // plain directory listing
        .max_depth(Some(1))
        .follow_links(true);

    let mut files = Vec::new();

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }

                let name = entry.file_name().to_string_lossy();
                if !is_supported(&name) {
                    debug!("Ignoring {}", entry.path().display());
                    continue;
                }

                if is_summary(entry.path(), suffix) {
                    debug!("Skipping earlier summary {}", entry.path().display());
                    continue;
                }

                files.push(entry.path().to_path_buf());
            }
            Err(e) => {
                debug!("Walk error: {}", e);
            }
        }
    }

    Ok(files)
}

/// Case-sensitive check against [`SUPPORTED_EXTENSIONS`]
pub fn is_supported(file_name: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

fn is_summary(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(suffix))
}
