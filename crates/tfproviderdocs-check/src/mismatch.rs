//! File-to-schema reconciliation for one resource kind directory.

use crate::finding::{Finding, FindingCategory};
use std::collections::{BTreeMap, BTreeSet};
use tfproviderdocs_schema::ResourceKind;

/// Identifier exception lists for one resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMismatchOptions {
    /// Excluded from extra-file reporting.
    pub ignore_file_mismatch: BTreeSet<String>,
    /// Excluded from missing-file reporting.
    pub ignore_file_missing: BTreeSet<String>,
}

/// A document found on disk and the identifier it normalized to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObservedDocument {
    pub identifier: String,
    pub path: String,
}

impl ObservedDocument {
    pub fn new(identifier: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }
}

/// Reconcile on-disk documents of `kind` in `directory` against the schema
/// identifiers, when a schema is available.
///
/// - duplicates (two files, one identifier) are always reported
/// - extra files: (D \ S) \ ignore_file_mismatch
/// - missing files: (S \ D) \ ignore_file_missing
///
/// Findings are sorted by identifier, so input order never matters.
pub fn reconcile(
    kind: ResourceKind,
    directory: &str,
    observed: &[ObservedDocument],
    schema_identifiers: Option<&BTreeSet<String>>,
    options: &FileMismatchOptions,
) -> Vec<Finding> {
    let mut by_identifier: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for document in observed {
        by_identifier
            .entry(document.identifier.as_str())
            .or_default()
            .push(document.path.as_str());
    }
    for paths in by_identifier.values_mut() {
        paths.sort_unstable();
    }

    let mut findings = Vec::new();

    for (identifier, paths) in &by_identifier {
        let first = paths[0];
        for duplicate in &paths[1..] {
            findings.push(Finding::new(
                FindingCategory::MismatchFile,
                *identifier,
                *duplicate,
                format!(
                    "duplicate {kind} documentation file: {duplicate} and {first} both normalize to {identifier:?}"
                ),
            ));
        }
    }

    let Some(schema_identifiers) = schema_identifiers else {
        sort_findings(&mut findings);
        return findings;
    };

    for (identifier, paths) in &by_identifier {
        if schema_identifiers.contains(*identifier)
            || options.ignore_file_mismatch.contains(*identifier)
        {
            continue;
        }
        findings.push(Finding::new(
            FindingCategory::MismatchFile,
            *identifier,
            paths[0],
            format!("matching {kind} for documentation file ({}) not found, file is extraneous or incorrectly named", paths[0]),
        ));
    }

    for identifier in schema_identifiers {
        if by_identifier.contains_key(identifier.as_str())
            || options.ignore_file_missing.contains(identifier)
        {
            continue;
        }
        findings.push(Finding::new(
            FindingCategory::MissingFile,
            identifier.as_str(),
            directory,
            format!("missing documentation file for {kind}: {identifier}"),
        ));
    }

    sort_findings(&mut findings);
    findings
}

fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.identifier
            .cmp(&b.identifier)
            .then(a.category.cmp(&b.category))
            .then(a.path.cmp(&b.path))
    });
}
