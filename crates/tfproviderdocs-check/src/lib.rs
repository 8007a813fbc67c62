//! # tfproviderdocs-check
//!
//! Reconciliation engine for Terraform Provider documentation.
//!
//! A check walks documentation directories, derives an identifier for every
//! document, and reports disagreements with the provider schema as
//! `Finding`s. Findings never abort a run; only configuration and I/O
//! problems do.
//!
//! ## Pipeline
//!
//! ```text
//! directory list
//!     ↓  classify (legacy / registry / CDKTF; role)
//! DocDirectory
//!     ↓  per file: normalize name → identifier
//!     ↓  per file: front matter rules, contents vs SchemaIndex
//!     ↓  per kind directory: reconcile documents vs SchemaIndex
//! CheckResult { findings, summary }
//! ```
//!
//! Documents are read through a `DocumentSource`, so the engine runs the
//! same against the filesystem (`FsSource`) and in memory (`MemorySource`).

pub mod check;
pub mod contents;
pub mod discover;
pub mod error;
pub mod finding;
pub mod frontmatter;
pub mod identifier;
pub mod layout;
pub mod mismatch;
pub mod observer;
pub mod options;
pub mod source;

pub use check::Check;
pub use contents::{
    ContentAttributes, ContentSection, ContentsViolation, check_contents,
    extract_content_attributes,
};
pub use discover::documentation_directories;
pub use error::{CheckError, ConfigError, SourceError};
pub use finding::{CHECK_KIND, CheckResult, CheckSummary, Finding, FindingCategory};
pub use frontmatter::{FrontMatter, FrontMatterRules, ParsedDocument, parse_document};
pub use identifier::{Normalized, normalize_identifier};
pub use layout::{DirectoryLayout, DirectoryRole, DocDirectory, DocumentCategory};
pub use mismatch::{FileMismatchOptions, ObservedDocument, reconcile};
pub use observer::{CheckObserver, NoopObserver, TracingObserver};
pub use options::{CheckOptions, provider_name_from_path, provider_name_from_source, split_list};
pub use source::{DocumentSource, FsSource, MemorySource};
pub use tfproviderdocs_schema::{ResourceKind, SchemaIndex};
