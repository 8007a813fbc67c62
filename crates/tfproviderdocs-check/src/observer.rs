//! Progress reporting hooks for a check run.
//!
//! The engine never logs on its own; callers inject an observer.
//! `TracingObserver` is the one the CLI uses.

use crate::finding::CheckResult;
use crate::frontmatter::FrontMatter;
use crate::layout::DocDirectory;

pub trait CheckObserver {
    fn directory_started(&self, _directory: &DocDirectory) {}

    fn document_skipped(&self, _path: &str, _reason: &str) {}

    fn document_checked(&self, _path: &str, _identifier: &str, _front_matter: &FrontMatter) {}

    /// Something worth a warning that is not itself a finding.
    fn notice(&self, _message: &str) {}

    fn finished(&self, _result: &CheckResult) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CheckObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CheckObserver for TracingObserver {
    fn directory_started(&self, directory: &DocDirectory) {
        tracing::debug!(
            directory = %directory.path,
            layout = %directory.layout,
            cdktf_language = directory.cdktf_language.as_deref().unwrap_or(""),
            "checking documentation directory"
        );
    }

    fn document_skipped(&self, path: &str, reason: &str) {
        tracing::trace!(path, reason, "skipping file");
    }

    fn document_checked(&self, path: &str, identifier: &str, front_matter: &FrontMatter) {
        tracing::trace!(
            path,
            identifier,
            has_title = front_matter.has_title(),
            has_description = front_matter.has_description(),
            "checked documentation file"
        );
    }

    fn notice(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn finished(&self, result: &CheckResult) {
        tracing::info!(
            directories = result.summary.directory_count,
            documents = result.summary.document_count,
            findings = result.summary.finding_count,
            discarded_missing = result.summary.discarded_missing_count,
            "documentation check finished"
        );
    }
}
