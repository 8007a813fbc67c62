//! Documentation directory layouts.
//!
//! ```text
//! Legacy                          Registry
//! website/docs/                   docs/
//!   index.html.markdown             index.md
//!   r/<provider>_<name>.*           resources/<name>.md
//!   d/<provider>_<name>.*           data-sources/<name>.md
//!   guides/<name>.*                 guides/<name>.md
//!   cdktf/<language>/{r,d,guides}   cdktf/<language>/{resources,data-sources,guides}
//! ```
//!
//! A directory is classified once, from its path relative to the provider
//! root, and the result is passed explicitly to every checker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use tfproviderdocs_schema::ResourceKind;

pub const LEGACY_INDEX_DIRECTORY: &str = "website/docs";
pub const LEGACY_DATA_SOURCES_DIRECTORY: &str = "d";
pub const LEGACY_GUIDES_DIRECTORY: &str = "guides";
pub const LEGACY_RESOURCES_DIRECTORY: &str = "r";

pub const REGISTRY_INDEX_DIRECTORY: &str = "docs";
pub const REGISTRY_DATA_SOURCES_DIRECTORY: &str = "data-sources";
pub const REGISTRY_GUIDES_DIRECTORY: &str = "guides";
pub const REGISTRY_RESOURCES_DIRECTORY: &str = "resources";

pub const CDKTF_INDEX_DIRECTORY: &str = "cdktf";
pub const CDKTF_LANGUAGES: [&str; 5] = ["csharp", "go", "java", "python", "typescript"];

/// Terraform Registry storage limits.
pub const REGISTRY_MAXIMUM_NUMBER_OF_FILES: usize = 2000;
pub const REGISTRY_MAXIMUM_SIZE_OF_FILE: usize = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryLayout {
    Legacy,
    Registry,
}

impl DirectoryLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Registry => "registry",
        }
    }

    fn index_directory(self) -> &'static str {
        match self {
            Self::Legacy => LEGACY_INDEX_DIRECTORY,
            Self::Registry => REGISTRY_INDEX_DIRECTORY,
        }
    }

    fn role_for_subdirectory(self, name: &str) -> Option<DirectoryRole> {
        match (self, name) {
            (Self::Legacy, LEGACY_RESOURCES_DIRECTORY)
            | (Self::Registry, REGISTRY_RESOURCES_DIRECTORY) => {
                Some(DirectoryRole::Kind(ResourceKind::Resource))
            }
            (Self::Legacy, LEGACY_DATA_SOURCES_DIRECTORY)
            | (Self::Registry, REGISTRY_DATA_SOURCES_DIRECTORY) => {
                Some(DirectoryRole::Kind(ResourceKind::DataSource))
            }
            (_, LEGACY_GUIDES_DIRECTORY) => Some(DirectoryRole::Guides),
            _ => None,
        }
    }
}

impl fmt::Display for DirectoryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryRole {
    /// Layout root (`website/docs`, `docs`, or a CDKTF language root).
    Root,
    Guides,
    Kind(ResourceKind),
}

/// What a single document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Index,
    Guide,
    Resource,
    DataSource,
}

impl DocumentCategory {
    pub fn kind(self) -> Option<ResourceKind> {
        match self {
            Self::Resource => Some(ResourceKind::Resource),
            Self::DataSource => Some(ResourceKind::DataSource),
            Self::Index | Self::Guide => None,
        }
    }
}

impl From<ResourceKind> for DocumentCategory {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Resource => Self::Resource,
            ResourceKind::DataSource => Self::DataSource,
        }
    }
}

/// A classified documentation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocDirectory {
    /// Path relative to the provider root, `/`-separated.
    pub path: String,
    pub layout: DirectoryLayout,
    pub role: DirectoryRole,
    pub cdktf_language: Option<String>,
}

impl DocDirectory {
    /// Classify a `/`-separated path relative to the provider root. `None`
    /// for anything outside the known layouts.
    pub fn classify(path: &str) -> Option<Self> {
        let path = normalize_relative(path);
        let layout = if path == LEGACY_INDEX_DIRECTORY
            || path.starts_with(&format!("{LEGACY_INDEX_DIRECTORY}/"))
        {
            DirectoryLayout::Legacy
        } else if path == REGISTRY_INDEX_DIRECTORY
            || path.starts_with(&format!("{REGISTRY_INDEX_DIRECTORY}/"))
        {
            DirectoryLayout::Registry
        } else {
            return None;
        };

        let rest = path[layout.index_directory().len()..].trim_start_matches('/');
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        let (role, cdktf_language) = match segments.as_slice() {
            [] => (DirectoryRole::Root, None),
            [CDKTF_INDEX_DIRECTORY] => (DirectoryRole::Root, None),
            [CDKTF_INDEX_DIRECTORY, language] if CDKTF_LANGUAGES.contains(language) => {
                (DirectoryRole::Root, Some(language.to_string()))
            }
            [CDKTF_INDEX_DIRECTORY, language, sub] if CDKTF_LANGUAGES.contains(language) => {
                (layout.role_for_subdirectory(sub)?, Some(language.to_string()))
            }
            [sub] => (layout.role_for_subdirectory(sub)?, None),
            _ => return None,
        };

        Some(Self {
            path,
            layout,
            role,
            cdktf_language,
        })
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        match self.role {
            DirectoryRole::Kind(kind) => Some(kind),
            DirectoryRole::Root | DirectoryRole::Guides => None,
        }
    }

    /// Category of a document in this directory, given its extension-less
    /// base name.
    pub fn category_for(&self, stem: &str) -> DocumentCategory {
        match self.role {
            DirectoryRole::Kind(kind) => kind.into(),
            DirectoryRole::Guides => DocumentCategory::Guide,
            DirectoryRole::Root if stem == "index" => DocumentCategory::Index,
            DirectoryRole::Root => DocumentCategory::Guide,
        }
    }

    /// Registry roots hold only `index.md`; any other file there is not
    /// documentation.
    pub fn accepts_document(&self, stem: &str) -> bool {
        !(self.layout == DirectoryLayout::Registry
            && self.role == DirectoryRole::Root
            && stem != "index")
    }

    pub fn file_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.path)
    }
}

/// `/`-separated form of `path` relative to `base`, if it lies under it.
pub fn relative_directory(base: &Path, path: &Path) -> Option<String> {
    let relative = match path.strip_prefix(base) {
        Ok(relative) => relative,
        Err(_) if path.is_relative() => path,
        Err(_) => return None,
    };
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// True when both layouts are in use. A bare registry `docs` root does not
/// count, since legacy providers commonly keep unrelated files there.
pub fn has_mixed_layouts(directories: &[DocDirectory]) -> bool {
    let legacy = directories
        .iter()
        .any(|dir| dir.layout == DirectoryLayout::Legacy);
    let registry = directories
        .iter()
        .any(|dir| dir.layout == DirectoryLayout::Registry && dir.path != REGISTRY_INDEX_DIRECTORY);
    legacy && registry
}

fn normalize_relative(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
