//! Findings and the aggregate check result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const CHECK_KIND: &str = "tfproviderdocs.check.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingCategory {
    /// File present without a schema entry, misnamed, or duplicated.
    #[serde(rename = "file.mismatch")]
    MismatchFile,
    /// Schema entry without a file.
    #[serde(rename = "file.missing")]
    MissingFile,
    #[serde(rename = "frontmatter.invalid")]
    FrontMatterInvalid,
    #[serde(rename = "contents.mismatch")]
    ContentsMismatch,
    #[serde(rename = "contents.ordering")]
    OrderingViolation,
    /// Directory outside the known layouts, or both layouts in use.
    #[serde(rename = "directory.invalid")]
    InvalidDirectory,
    /// Terraform Registry file count or size limit exceeded.
    #[serde(rename = "registry.limit")]
    RegistryLimit,
}

impl FindingCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MismatchFile => "file.mismatch",
            Self::MissingFile => "file.missing",
            Self::FrontMatterInvalid => "frontmatter.invalid",
            Self::ContentsMismatch => "contents.mismatch",
            Self::OrderingViolation => "contents.ordering",
            Self::InvalidDirectory => "directory.invalid",
            Self::RegistryLimit => "registry.limit",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub category: FindingCategory,
    pub identifier: String,
    pub path: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        category: FindingCategory,
        identifier: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.category, self.path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub directory_count: usize,
    pub document_count: usize,
    pub finding_count: usize,
    /// Missing-file findings computed but dropped by configuration.
    pub discarded_missing_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub check_kind: String,
    pub success: bool,
    pub findings: Vec<Finding>,
    pub summary: CheckSummary,
}

impl CheckResult {
    pub fn new(findings: Vec<Finding>, mut summary: CheckSummary) -> Self {
        summary.finding_count = findings.len();
        Self {
            check_kind: CHECK_KIND.to_string(),
            success: findings.is_empty(),
            findings,
            summary,
        }
    }

    pub fn result(&self) -> &'static str {
        if self.success { "accepted" } else { "rejected" }
    }

    /// Distinct finding categories, sorted.
    pub fn failure_classes(&self) -> Vec<&'static str> {
        self.findings
            .iter()
            .map(|finding| finding.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn count(&self, category: FindingCategory) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.category == category)
            .count()
    }
}
