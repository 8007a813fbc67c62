//! Read-only lookup from document identifier to declared attribute names.

use crate::provider::{ProviderSchema, ProviderSchemas};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Unordered set of attribute names declared for one type.
pub type AttributeSet = BTreeSet<String>;

/// The two kinds of schema-declared entities a provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Resource,
    DataSource,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Resource, ResourceKind::DataSource];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::DataSource => "data source",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the `<provider>_` prefix from a schema type name.
///
/// Type names without the prefix (e.g. the `http` data source of the `http`
/// provider) are returned whole.
pub fn identifier_for_type_name<'a>(provider_name: &str, type_name: &'a str) -> &'a str {
    if provider_name.is_empty() {
        return type_name;
    }
    type_name
        .strip_prefix(provider_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(type_name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    provider_name: String,
    resources: BTreeMap<String, AttributeSet>,
    data_sources: BTreeMap<String, AttributeSet>,
}

impl SchemaIndex {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            ..Self::default()
        }
    }

    /// Index one provider's resource and data source schemas.
    pub fn from_provider_schema(provider_name: &str, provider: &ProviderSchema) -> Self {
        let mut index = Self::new(provider_name);
        for (type_name, schema) in &provider.resource_schemas {
            index.insert(
                ResourceKind::Resource,
                type_name,
                schema.block.top_level_names(),
            );
        }
        for (type_name, schema) in &provider.data_source_schemas {
            index.insert(
                ResourceKind::DataSource,
                type_name,
                schema.block.top_level_names(),
            );
        }
        index
    }

    /// Select the provider (source address first, then bare name) and index
    /// it. `None` when neither key is present.
    pub fn from_provider_schemas(
        schemas: &ProviderSchemas,
        provider_name: &str,
        provider_source: Option<&str>,
    ) -> Option<Self> {
        schemas
            .provider(provider_name, provider_source)
            .map(|provider| Self::from_provider_schema(provider_name, provider))
    }

    /// Register a schema type by its full type name.
    pub fn insert<I, S>(&mut self, kind: ResourceKind, type_name: &str, attributes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifier = identifier_for_type_name(&self.provider_name, type_name).to_string();
        let attributes = attributes.into_iter().map(Into::into).collect();
        self.entries_mut(kind).insert(identifier, attributes);
    }

    pub fn with_entry<I, S>(mut self, kind: ResourceKind, type_name: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(kind, type_name, attributes);
        self
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn lookup(&self, kind: ResourceKind, identifier: &str) -> Option<&AttributeSet> {
        self.entries(kind).get(identifier)
    }

    pub fn contains(&self, kind: ResourceKind, identifier: &str) -> bool {
        self.entries(kind).contains_key(identifier)
    }

    /// Identifiers declared for `kind`, in sorted order.
    pub fn identifiers(&self, kind: ResourceKind) -> impl Iterator<Item = &str> {
        self.entries(kind).keys().map(String::as_str)
    }

    pub fn len(&self, kind: ResourceKind) -> usize {
        self.entries(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.data_sources.is_empty()
    }

    fn entries(&self, kind: ResourceKind) -> &BTreeMap<String, AttributeSet> {
        match kind {
            ResourceKind::Resource => &self.resources,
            ResourceKind::DataSource => &self.data_sources,
        }
    }

    fn entries_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<String, AttributeSet> {
        match kind {
            ResourceKind::Resource => &mut self.resources,
            ResourceKind::DataSource => &mut self.data_sources,
        }
    }
}
