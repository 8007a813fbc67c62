//! Check orchestration across documentation directories.

use crate::contents::{ContentsViolation, check_contents, extract_content_attributes};
use crate::error::CheckError;
use crate::finding::{CheckResult, CheckSummary, Finding, FindingCategory};
use crate::frontmatter::parse_document;
use crate::identifier::{Normalized, normalize_identifier, strip_extension};
use crate::layout::{
    DirectoryLayout, DocDirectory, LEGACY_INDEX_DIRECTORY, REGISTRY_MAXIMUM_NUMBER_OF_FILES,
    REGISTRY_MAXIMUM_SIZE_OF_FILE, has_mixed_layouts, relative_directory,
};
use crate::mismatch::{ObservedDocument, reconcile};
use crate::observer::{CheckObserver, NoopObserver};
use crate::options::CheckOptions;
use crate::source::DocumentSource;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tfproviderdocs_schema::{ResourceKind, SchemaIndex};

/// A configured check. Options and schema are fixed at construction; `run`
/// may be called any number of times.
pub struct Check {
    options: CheckOptions,
    schema: Option<SchemaIndex>,
    observer: Box<dyn CheckObserver>,
}

impl Check {
    /// Validate `options` against the presence of `schema`.
    pub fn new(options: CheckOptions, schema: Option<SchemaIndex>) -> Result<Self, CheckError> {
        options.validate(schema.is_some())?;
        Ok(Self {
            options,
            schema,
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: impl CheckObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn schema(&self) -> Option<&SchemaIndex> {
        self.schema.as_ref()
    }

    /// Check every directory in `directories`, given relative to the source
    /// root or as absolute paths under it.
    ///
    /// Findings come out grouped: directory-level findings first, then per
    /// directory in path order, reconciliation before per-document findings.
    pub fn run(
        &self,
        source: &dyn DocumentSource,
        directories: &[String],
    ) -> Result<CheckResult, CheckError> {
        let mut findings = Vec::new();
        let mut classified: Vec<DocDirectory> = Vec::new();

        for directory in directories {
            match DocDirectory::classify(&source_relative(source, directory)) {
                Some(classified_directory) => classified.push(classified_directory),
                None => findings.push(Finding::new(
                    FindingCategory::InvalidDirectory,
                    directory.as_str(),
                    directory.as_str(),
                    format!("invalid Terraform Provider documentation directory found: {directory}"),
                )),
            }
        }
        classified.sort_by(|a, b| a.path.cmp(&b.path));
        classified.dedup_by(|a, b| a.path == b.path);

        if has_mixed_layouts(&classified) {
            findings.push(Finding::new(
                FindingCategory::InvalidDirectory,
                "",
                LEGACY_INDEX_DIRECTORY,
                "mixed Terraform Provider documentation directory layouts found, must use only legacy or registry layout",
            ));
        }

        if self.options.provider_name.is_empty()
            && classified
                .iter()
                .any(|dir| dir.layout == DirectoryLayout::Legacy && dir.kind().is_some())
        {
            self.observer
                .notice("provider name unknown, legacy file name prefixes are not enforced");
        }

        let mut summary = CheckSummary {
            directory_count: classified.len(),
            ..CheckSummary::default()
        };

        for directory in &classified {
            let outcome = self.check_directory(source, directory)?;
            summary.document_count += outcome.document_count;
            findings.extend(outcome.findings);
        }

        if self.options.ignore_cdktf_missing_files {
            let before = findings.len();
            findings.retain(|finding| finding.category != FindingCategory::MissingFile);
            summary.discarded_missing_count = before - findings.len();
        }

        let result = CheckResult::new(findings, summary);
        self.observer.finished(&result);
        Ok(result)
    }

    fn check_directory(
        &self,
        source: &dyn DocumentSource,
        directory: &DocDirectory,
    ) -> Result<DirectoryOutcome, CheckError> {
        self.observer.directory_started(directory);

        let kind = directory.kind();
        let registry = directory.layout == DirectoryLayout::Registry;
        let mut observed = Vec::new();
        let mut document_findings = Vec::new();
        let mut document_count = 0;

        for file_name in source.list_files(&directory.path)? {
            let path = directory.file_path(&file_name);
            let Some(stem) = strip_extension(&file_name, directory.layout) else {
                self.observer
                    .document_skipped(&path, "not a documentation file");
                continue;
            };
            if !directory.accepts_document(stem) {
                self.observer
                    .document_skipped(&path, "registry documentation root holds only index.md");
                continue;
            }

            let identifier = match normalize_identifier(
                &file_name,
                directory.layout,
                kind,
                &self.options.provider_name,
            ) {
                Normalized::Unrecognized => {
                    self.observer
                        .document_skipped(&path, "not a documentation file");
                    continue;
                }
                Normalized::NamingViolation { base_name } => {
                    document_findings.push(Finding::new(
                        FindingCategory::MismatchFile,
                        base_name.as_str(),
                        path.as_str(),
                        format!(
                            "file name {file_name} does not match the {}_<name> naming convention",
                            self.options.provider_name
                        ),
                    ));
                    None
                }
                Normalized::Document(identifier) => Some(identifier),
            };

            if let (Some(_), Some(identifier)) = (kind, identifier.as_deref()) {
                observed.push(ObservedDocument::new(identifier, path.as_str()));
            }

            document_count += 1;
            let contents = source.read_document(&path)?;
            let report_id = identifier.as_deref().unwrap_or(stem);
            self.check_document(
                directory,
                &path,
                stem,
                identifier.as_deref(),
                &contents,
                &mut document_findings,
            );

            if registry && contents.len() > REGISTRY_MAXIMUM_SIZE_OF_FILE {
                document_findings.push(Finding::new(
                    FindingCategory::RegistryLimit,
                    report_id,
                    path.as_str(),
                    format!(
                        "exceeded maximum ({REGISTRY_MAXIMUM_SIZE_OF_FILE}) size of documentation file for Terraform Registry: {} bytes",
                        contents.len()
                    ),
                ));
            }
        }

        if registry && document_count > REGISTRY_MAXIMUM_NUMBER_OF_FILES {
            document_findings.push(Finding::new(
                FindingCategory::RegistryLimit,
                "",
                directory.path.as_str(),
                format!(
                    "exceeded maximum ({REGISTRY_MAXIMUM_NUMBER_OF_FILES}) number of documentation files for Terraform Registry: {document_count}"
                ),
            ));
        }

        let mut findings = match kind {
            Some(kind) => {
                let schema_identifiers = self.schema_identifiers(kind);
                reconcile(
                    kind,
                    &directory.path,
                    &observed,
                    schema_identifiers.as_ref(),
                    self.options.file_mismatch(kind),
                )
            }
            None => Vec::new(),
        };
        findings.extend(document_findings);

        Ok(DirectoryOutcome {
            findings,
            document_count,
        })
    }

    fn check_document(
        &self,
        directory: &DocDirectory,
        path: &str,
        stem: &str,
        identifier: Option<&str>,
        contents: &str,
        findings: &mut Vec<Finding>,
    ) {
        let report_id = identifier.unwrap_or(stem);
        let parsed = parse_document(contents);
        if let Some(reason) = &parsed.malformed {
            self.observer
                .notice(&format!("{path}: ignoring malformed front matter: {reason}"));
        }

        self.observer
            .document_checked(path, report_id, &parsed.front_matter);

        let rules = self
            .options
            .front_matter_rules(directory.category_for(stem), directory.layout);
        for message in rules.check(&parsed.front_matter) {
            findings.push(Finding::new(
                FindingCategory::FrontMatterInvalid,
                report_id,
                path,
                message,
            ));
        }

        if !self.options.enable_contents_check {
            return;
        }
        let (Some(kind), Some(identifier), Some(schema)) =
            (directory.kind(), identifier, self.schema.as_ref())
        else {
            return;
        };
        let Some(schema_attributes) = schema.lookup(kind, identifier) else {
            return;
        };

        let attributes = extract_content_attributes(parsed.body);
        for violation in check_contents(
            &attributes,
            schema_attributes,
            self.options.require_schema_ordering,
        ) {
            let category = match violation {
                ContentsViolation::Unordered { .. } => FindingCategory::OrderingViolation,
                ContentsViolation::NotInSchema { .. } | ContentsViolation::NotDocumented { .. } => {
                    FindingCategory::ContentsMismatch
                }
            };
            findings.push(Finding::new(
                category,
                identifier,
                path,
                violation.to_string(),
            ));
        }
    }

    fn schema_identifiers(&self, kind: ResourceKind) -> Option<BTreeSet<String>> {
        self.schema
            .as_ref()
            .map(|schema| schema.identifiers(kind).map(str::to_string).collect())
    }
}

/// `directory` relative to the source root. Absolute paths outside the root
/// come back unchanged and fail classification.
fn source_relative(source: &dyn DocumentSource, directory: &str) -> String {
    let path = Path::new(directory);
    let Some(base) = source.base_path().filter(|_| path.is_absolute()) else {
        return directory.to_string();
    };
    relative_directory(base, path)
        .or_else(|| {
            let base = fs::canonicalize(base).ok()?;
            let path = fs::canonicalize(path).ok()?;
            relative_directory(&base, &path)
        })
        .unwrap_or_else(|| directory.to_string())
}

struct DirectoryOutcome {
    findings: Vec<Finding>,
    document_count: usize,
}
