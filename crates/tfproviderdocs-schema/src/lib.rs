//! # tfproviderdocs-schema
//!
//! Schema layer for documentation checks.
//!
//! This crate provides:
//! - `ProviderSchemas` and friends (the `terraform providers schema -json`
//!   interchange format)
//! - loading and validation of that format
//! - `SchemaIndex`, the read-only identifier to attribute-set lookup the
//!   checks consult
//!
//! It does not know anything about documentation layouts. That lives in
//! `tfproviderdocs-check`.
//!
//! ## Data model
//!
//! ```text
//! providers schema JSON (on disk)
//!     ↓  load + validate
//! ProviderSchemas { provider_schemas: source → ProviderSchema }
//!     ↓  select provider (source, then bare name)
//! SchemaIndex { kind → identifier → attribute names }
//! ```

pub mod index;
pub mod provider;

pub use index::{AttributeSet, ResourceKind, SchemaIndex, identifier_for_type_name};
pub use provider::{
    ProviderSchema, ProviderSchemas, SUPPORTED_FORMAT_MAJOR_VERSIONS, Schema, SchemaAttribute,
    SchemaBlock, SchemaBlockType, SchemaError, load_provider_schemas, parse_provider_schemas,
};
