//! Filename to document identifier normalization.

use crate::layout::DirectoryLayout;
use tfproviderdocs_schema::ResourceKind;

/// Ordered longest first so `.html.markdown` wins over `.markdown`.
pub const LEGACY_FILE_EXTENSIONS: [&str; 4] = [".html.markdown", ".html.md", ".markdown", ".md"];
pub const REGISTRY_FILE_EXTENSIONS: [&str; 1] = [".md"];

/// Result of normalizing one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A recognized document with its identifier.
    Document(String),
    /// A document whose name breaks the layout's naming convention.
    NamingViolation { base_name: String },
    /// Not documentation; callers skip it without reporting.
    Unrecognized,
}

/// Strip the layout's documentation extension, or `None` when the file is
/// not a document in that layout.
pub fn strip_extension(file_name: &str, layout: DirectoryLayout) -> Option<&str> {
    let extensions: &[&str] = match layout {
        DirectoryLayout::Legacy => &LEGACY_FILE_EXTENSIONS,
        DirectoryLayout::Registry => &REGISTRY_FILE_EXTENSIONS,
    };
    if file_name.starts_with('.') {
        return None;
    }
    extensions
        .iter()
        .find_map(|extension| file_name.strip_suffix(extension))
        .filter(|stem| !stem.is_empty())
}

/// Derive the identifier for `file_name`.
///
/// Legacy resource and data source pages must be named
/// `<provider>_<name>.<ext>`. A page named exactly after the provider is
/// accepted too. Registry pages, guides, and index pages carry no prefix.
/// With an empty `provider_name` the prefix cannot be enforced and the
/// base name is used as-is.
pub fn normalize_identifier(
    file_name: &str,
    layout: DirectoryLayout,
    kind: Option<ResourceKind>,
    provider_name: &str,
) -> Normalized {
    let Some(stem) = strip_extension(file_name, layout) else {
        return Normalized::Unrecognized;
    };

    if layout == DirectoryLayout::Registry || kind.is_none() || provider_name.is_empty() {
        return Normalized::Document(stem.to_string());
    }

    if stem == provider_name {
        return Normalized::Document(stem.to_string());
    }

    match stem
        .strip_prefix(provider_name)
        .and_then(|rest| rest.strip_prefix('_'))
    {
        Some(identifier) if !identifier.is_empty() => Normalized::Document(identifier.to_string()),
        _ => Normalized::NamingViolation {
            base_name: stem.to_string(),
        },
    }
}
