//! Documentation directory discovery under a provider root.

use crate::error::SourceError;
use crate::layout::{
    CDKTF_INDEX_DIRECTORY, LEGACY_INDEX_DIRECTORY, REGISTRY_DATA_SOURCES_DIRECTORY,
    REGISTRY_GUIDES_DIRECTORY, REGISTRY_INDEX_DIRECTORY, REGISTRY_RESOURCES_DIRECTORY,
    relative_directory,
};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

const REGISTRY_INDEX_FILE: &str = "index.md";

/// Every directory holding at least one file, relative to `base` and sorted.
///
/// `website/docs` is walked whole. Under `docs`, which providers often use
/// for unrelated material, only the documentation subtrees are walked and the
/// root itself counts only when `docs/index.md` exists.
pub fn documentation_directories(base: &Path) -> Result<Vec<String>, SourceError> {
    let mut directories = BTreeSet::new();

    let legacy = base.join(LEGACY_INDEX_DIRECTORY);
    if legacy.is_dir() {
        collect_file_directories(base, &legacy, &mut directories)?;
    }

    let registry = base.join(REGISTRY_INDEX_DIRECTORY);
    if registry.is_dir() {
        if registry.join(REGISTRY_INDEX_FILE).is_file() {
            directories.insert(REGISTRY_INDEX_DIRECTORY.to_string());
        }
        for subtree in [
            REGISTRY_DATA_SOURCES_DIRECTORY,
            REGISTRY_GUIDES_DIRECTORY,
            REGISTRY_RESOURCES_DIRECTORY,
            CDKTF_INDEX_DIRECTORY,
        ] {
            let path = registry.join(subtree);
            if path.is_dir() {
                collect_file_directories(base, &path, &mut directories)?;
            }
        }
    }

    Ok(directories.into_iter().collect())
}

fn collect_file_directories(
    base: &Path,
    root: &Path,
    directories: &mut BTreeSet<String>,
) -> Result<(), SourceError> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SourceError::Walk {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        if let Some(relative) = relative_directory(base, parent) {
            directories.insert(relative);
        }
    }
    Ok(())
}
