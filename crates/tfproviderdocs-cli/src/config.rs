//! Option resolution: defaults, then the `--config` TOML file, then flags.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tfproviderdocs_check::{
    CheckOptions, FileMismatchOptions, provider_name_from_path, provider_name_from_source,
    split_list,
};

/// `--config` file contents. Keys match the flag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub provider_name: Option<String>,
    pub provider_source: Option<String>,
    pub providers_schema_json: Option<String>,
    pub allowed_guide_subcategories: Option<Vec<String>>,
    pub allowed_guide_subcategories_file: Option<String>,
    pub allowed_resource_subcategories: Option<Vec<String>>,
    pub allowed_resource_subcategories_file: Option<String>,
    pub enable_contents_check: Option<bool>,
    pub ignore_cdktf_missing_files: Option<bool>,
    pub ignore_file_mismatch_data_sources: Option<Vec<String>>,
    pub ignore_file_mismatch_resources: Option<Vec<String>>,
    pub ignore_file_missing_data_sources: Option<Vec<String>>,
    pub ignore_file_missing_resources: Option<Vec<String>>,
    pub require_guide_subcategory: Option<bool>,
    pub require_resource_subcategory: Option<bool>,
    pub require_schema_ordering: Option<bool>,
}

/// Flag values as parsed; `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub path: String,
    pub allowed_guide_subcategories: Option<String>,
    pub allowed_guide_subcategories_file: Option<String>,
    pub allowed_resource_subcategories: Option<String>,
    pub allowed_resource_subcategories_file: Option<String>,
    pub enable_contents_check: bool,
    pub ignore_cdktf_missing_files: bool,
    pub ignore_file_mismatch_data_sources: Option<String>,
    pub ignore_file_mismatch_resources: Option<String>,
    pub ignore_file_missing_data_sources: Option<String>,
    pub ignore_file_missing_resources: Option<String>,
    pub provider_name: Option<String>,
    pub provider_source: Option<String>,
    pub providers_schema_json: Option<String>,
    pub require_guide_subcategory: bool,
    pub require_resource_subcategory: bool,
    pub require_schema_ordering: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub options: CheckOptions,
    pub providers_schema_json: Option<PathBuf>,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    toml::from_str(&text).map_err(|e| format!("failed to parse config {}: {e}", path.display()))
}

/// Newline separated list file; blank lines are ignored.
pub fn read_list_file(path: &Path) -> Result<BTreeSet<String>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("error reading file ({}): {e}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn resolve(flags: &Flags, file: FileConfig) -> Result<ResolvedConfig, String> {
    let provider_source = flags.provider_source.clone().or(file.provider_source);
    let provider_name = flags
        .provider_name
        .clone()
        .or(file.provider_name)
        .or_else(|| provider_source.as_deref().and_then(provider_name_from_source))
        .or_else(|| provider_name_for_path(Path::new(&flags.path)))
        .unwrap_or_default();

    let allowed_guide_subcategories = subcategories(
        flags.allowed_guide_subcategories_file.as_deref(),
        flags.allowed_guide_subcategories.as_deref(),
        file.allowed_guide_subcategories_file.as_deref(),
        file.allowed_guide_subcategories,
    )?;
    let allowed_resource_subcategories = subcategories(
        flags.allowed_resource_subcategories_file.as_deref(),
        flags.allowed_resource_subcategories.as_deref(),
        file.allowed_resource_subcategories_file.as_deref(),
        file.allowed_resource_subcategories,
    )?;

    let options = CheckOptions {
        provider_name,
        provider_source,
        allowed_guide_subcategories,
        allowed_resource_subcategories,
        require_guide_subcategory: flag_or(
            flags.require_guide_subcategory,
            file.require_guide_subcategory,
        ),
        require_resource_subcategory: flag_or(
            flags.require_resource_subcategory,
            file.require_resource_subcategory,
        ),
        enable_contents_check: flag_or(flags.enable_contents_check, file.enable_contents_check),
        require_schema_ordering: flag_or(
            flags.require_schema_ordering,
            file.require_schema_ordering,
        ),
        resource_file_mismatch: FileMismatchOptions {
            ignore_file_mismatch: list_or(
                flags.ignore_file_mismatch_resources.as_deref(),
                file.ignore_file_mismatch_resources,
            ),
            ignore_file_missing: list_or(
                flags.ignore_file_missing_resources.as_deref(),
                file.ignore_file_missing_resources,
            ),
        },
        data_source_file_mismatch: FileMismatchOptions {
            ignore_file_mismatch: list_or(
                flags.ignore_file_mismatch_data_sources.as_deref(),
                file.ignore_file_mismatch_data_sources,
            ),
            ignore_file_missing: list_or(
                flags.ignore_file_missing_data_sources.as_deref(),
                file.ignore_file_missing_data_sources,
            ),
        },
        ignore_cdktf_missing_files: flag_or(
            flags.ignore_cdktf_missing_files,
            file.ignore_cdktf_missing_files,
        ),
    };

    Ok(ResolvedConfig {
        options,
        providers_schema_json: flags
            .providers_schema_json
            .clone()
            .or(file.providers_schema_json)
            .map(PathBuf::from),
    })
}

/// `terraform-provider-<name>` basename of `path`, resolving `.` and
/// relative paths against the working directory.
fn provider_name_for_path(path: &Path) -> Option<String> {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    provider_name_from_path(&resolved)
}

fn flag_or(flag: bool, file: Option<bool>) -> bool {
    flag || file.unwrap_or(false)
}

fn list_or(flag: Option<&str>, file: Option<Vec<String>>) -> BTreeSet<String> {
    match flag {
        Some(value) => split_list(value),
        None => clean_list(file.unwrap_or_default()),
    }
}

fn clean_list(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// A list file wins over a comma list at the same level; flags win over the
/// config file.
fn subcategories(
    flag_file: Option<&str>,
    flag_list: Option<&str>,
    config_file: Option<&str>,
    config_list: Option<Vec<String>>,
) -> Result<BTreeSet<String>, String> {
    if let Some(path) = flag_file {
        return read_list_file(Path::new(path));
    }
    if let Some(list) = flag_list {
        return Ok(split_list(list));
    }
    if let Some(path) = config_file {
        return read_list_file(Path::new(path));
    }
    Ok(clean_list(config_list.unwrap_or_default()))
}
