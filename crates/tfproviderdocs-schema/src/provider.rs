//! Providers schema JSON: the output of `terraform providers schema -json`.
//!
//! Only the parts documentation checks need are modeled strictly. Unknown
//! fields are tolerated so newer Terraform releases keep loading.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Major `format_version` values this crate understands.
pub const SUPPORTED_FORMAT_MAJOR_VERSIONS: [u64; 2] = [0, 1];

/// Top-level providers schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderSchemas {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, ProviderSchema>,
}

/// Schemas for one provider, keyed by resource or data source type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderSchema {
    #[serde(default)]
    pub provider: Option<Schema>,
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, Schema>,
    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, Schema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub block: SchemaBlock,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaBlock {
    #[serde(default)]
    pub attributes: BTreeMap<String, SchemaAttribute>,
    #[serde(default)]
    pub block_types: BTreeMap<String, SchemaBlockType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl SchemaBlock {
    /// Names documented at the top level of a page: attributes and nested
    /// block types alike.
    pub fn top_level_names(&self) -> BTreeSet<String> {
        self.attributes
            .keys()
            .chain(self.block_types.keys())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaAttribute {
    #[serde(default, rename = "type")]
    pub attribute_type: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaBlockType {
    #[serde(default)]
    pub nesting_mode: String,
    #[serde(default)]
    pub block: SchemaBlock,
    #[serde(default)]
    pub min_items: u64,
    #[serde(default)]
    pub max_items: u64,
}

impl ProviderSchemas {
    /// Structural validation applied after parsing.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let version = self.format_version.trim();
        if version.is_empty() {
            return Err(SchemaError::Validate(
                "unexpected providers schema data, format version is missing".to_string(),
            ));
        }

        let major = version
            .split('.')
            .next()
            .and_then(|part| part.parse::<u64>().ok())
            .ok_or_else(|| {
                SchemaError::Validate(format!("invalid format version {version:?}"))
            })?;
        if !SUPPORTED_FORMAT_MAJOR_VERSIONS.contains(&major) {
            return Err(SchemaError::Validate(format!(
                "unsupported providers schema format version {version:?}"
            )));
        }

        if self
            .provider_schemas
            .keys()
            .any(|name| name.trim().is_empty())
        {
            return Err(SchemaError::Validate(
                "provider_schemas contains an empty provider key".to_string(),
            ));
        }

        Ok(())
    }

    /// Select a provider by full source address, falling back to the bare
    /// provider name.
    pub fn provider(&self, name: &str, source: Option<&str>) -> Option<&ProviderSchema> {
        source
            .filter(|source| !source.is_empty())
            .and_then(|source| self.provider_schemas.get(source))
            .or_else(|| self.provider_schemas.get(name))
    }
}

/// Parse and validate a providers schema JSON payload.
pub fn parse_provider_schemas(payload: &str) -> Result<ProviderSchemas, SchemaError> {
    let schemas: ProviderSchemas =
        serde_json::from_str(payload).map_err(|e| SchemaError::Parse(e.to_string()))?;
    schemas.validate()?;
    Ok(schemas)
}

/// Read, parse and validate a providers schema JSON file.
pub fn load_provider_schemas(path: impl AsRef<Path>) -> Result<ProviderSchemas, SchemaError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|e| SchemaError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_provider_schemas(&payload).map_err(|error| error.at_path(path))
}

/// Errors from loading a providers schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("error reading providers schema JSON file ({path}): {message}")]
    Io { path: String, message: String },

    #[error("error parsing providers schema JSON: {0}")]
    Parse(String),

    #[error("error validating providers schema JSON: {0}")]
    Validate(String),
}

impl SchemaError {
    fn at_path(self, path: &Path) -> Self {
        match self {
            Self::Parse(message) => Self::Parse(format!("{}: {message}", path.display())),
            Self::Validate(message) => Self::Validate(format!("{}: {message}", path.display())),
            io @ Self::Io { .. } => io,
        }
    }
}
