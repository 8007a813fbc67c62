//! Check configuration and provider name resolution.

use crate::error::ConfigError;
use crate::frontmatter::FrontMatterRules;
use crate::layout::{DirectoryLayout, DocumentCategory};
use crate::mismatch::FileMismatchOptions;
use std::collections::BTreeSet;
use std::path::Path;
use tfproviderdocs_schema::ResourceKind;

const PROVIDER_REPOSITORY_PREFIX: &str = "terraform-provider-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Short provider name (e.g. `aws`). Empty when unknown.
    pub provider_name: String,
    /// Full source address (e.g. `registry.terraform.io/hashicorp/aws`).
    pub provider_source: Option<String>,
    pub allowed_guide_subcategories: BTreeSet<String>,
    pub allowed_resource_subcategories: BTreeSet<String>,
    pub require_guide_subcategory: bool,
    pub require_resource_subcategory: bool,
    pub enable_contents_check: bool,
    pub require_schema_ordering: bool,
    pub resource_file_mismatch: FileMismatchOptions,
    pub data_source_file_mismatch: FileMismatchOptions,
    /// Compute missing-file findings, then drop them.
    pub ignore_cdktf_missing_files: bool,
}

impl CheckOptions {
    /// Reject option combinations that cannot run. `schema_requested` is
    /// true when the caller supplies (or is about to load) a schema.
    pub fn validate(&self, schema_requested: bool) -> Result<(), ConfigError> {
        if self.require_schema_ordering && !self.enable_contents_check {
            return Err(ConfigError::OrderingWithoutContents);
        }
        if self.provider_name.is_empty() && (schema_requested || self.enable_contents_check) {
            return Err(ConfigError::UnknownProviderName);
        }
        Ok(())
    }

    pub fn file_mismatch(&self, kind: ResourceKind) -> &FileMismatchOptions {
        match kind {
            ResourceKind::Resource => &self.resource_file_mismatch,
            ResourceKind::DataSource => &self.data_source_file_mismatch,
        }
    }

    pub fn front_matter_rules(
        &self,
        category: DocumentCategory,
        layout: DirectoryLayout,
    ) -> FrontMatterRules {
        let forbid_legacy_keys = layout == DirectoryLayout::Registry;
        match category {
            DocumentCategory::Index => FrontMatterRules {
                forbid_legacy_keys,
                ..FrontMatterRules::default()
            },
            DocumentCategory::Guide => FrontMatterRules {
                allowed_subcategories: self.allowed_guide_subcategories.clone(),
                require_subcategory: self.require_guide_subcategory,
                forbid_legacy_keys,
            },
            DocumentCategory::Resource | DocumentCategory::DataSource => FrontMatterRules {
                allowed_subcategories: self.allowed_resource_subcategories.clone(),
                require_subcategory: self.require_resource_subcategory,
                forbid_legacy_keys,
            },
        }
    }
}

/// Last path segment of a source address.
pub fn provider_name_from_source(source: &str) -> Option<String> {
    source
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Provider name from a `terraform-provider-<name>` directory basename.
pub fn provider_name_from_path(path: &Path) -> Option<String> {
    let base = path.file_name()?.to_str()?;
    if base.contains(['.', '/']) {
        return None;
    }
    base.strip_prefix(PROVIDER_REPOSITORY_PREFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Split a comma separated list, dropping blank entries.
pub fn split_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn ordering_without_contents_is_rejected() {
        let options = CheckOptions {
            provider_name: "example".to_string(),
            require_schema_ordering: true,
            ..CheckOptions::default()
        };
        assert_eq!(
            options.validate(true),
            Err(ConfigError::OrderingWithoutContents)
        );

        let enabled = CheckOptions {
            enable_contents_check: true,
            ..options
        };
        assert_eq!(enabled.validate(true), Ok(()));
    }

    #[test]
    fn schema_checks_need_a_provider_name() {
        let options = CheckOptions::default();
        assert_eq!(options.validate(false), Ok(()));
        assert_eq!(
            options.validate(true),
            Err(ConfigError::UnknownProviderName)
        );
    }

    #[test]
    fn provider_name_from_source_takes_last_segment() {
        assert_eq!(
            provider_name_from_source("registry.terraform.io/hashicorp/aws").as_deref(),
            Some("aws")
        );
        assert_eq!(provider_name_from_source("aws").as_deref(), Some("aws"));
        assert_eq!(provider_name_from_source(""), None);
    }

    #[test]
    fn provider_name_from_path_requires_repository_prefix() {
        assert_eq!(
            provider_name_from_path(&PathBuf::from("/src/terraform-provider-aws")).as_deref(),
            Some("aws")
        );
        assert_eq!(provider_name_from_path(&PathBuf::from("/src/aws")), None);
        assert_eq!(
            provider_name_from_path(&PathBuf::from("/src/terraform-provider-aws.bak")),
            None
        );
        assert_eq!(provider_name_from_path(&PathBuf::from(".")), None);
    }

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(
            split_list("a, b,,c ,"),
            ["a", "b", "c"].into_iter().map(String::from).collect()
        );
    }

    #[test]
    fn front_matter_rules_follow_category() {
        let options = CheckOptions {
            allowed_guide_subcategories: split_list("Guides"),
            require_resource_subcategory: true,
            ..CheckOptions::default()
        };
        let guide = options.front_matter_rules(DocumentCategory::Guide, DirectoryLayout::Legacy);
        assert!(!guide.require_subcategory);
        assert!(!guide.forbid_legacy_keys);
        assert!(guide.allowed_subcategories.contains("Guides"));

        let resource =
            options.front_matter_rules(DocumentCategory::DataSource, DirectoryLayout::Registry);
        assert!(resource.require_subcategory);
        assert!(resource.forbid_legacy_keys);

        let index = options.front_matter_rules(DocumentCategory::Index, DirectoryLayout::Legacy);
        assert_eq!(index, FrontMatterRules::default());
    }
}
