use crate::config::{FileConfig, Flags, load_file_config, resolve};
use serde_json::json;
use std::path::{Path, PathBuf};
use tfproviderdocs_check::{
    Check, CheckResult, FsSource, SchemaIndex, TracingObserver, documentation_directories,
};
use tfproviderdocs_schema::load_provider_schemas;

pub struct Args {
    pub config: Option<String>,
    pub flags: Flags,
    pub json: bool,
}

fn exit_with_error(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn load_schema_index(
    path: &Path,
    provider_name: &str,
    provider_source: Option<&str>,
) -> Option<SchemaIndex> {
    let schemas = load_provider_schemas(path).unwrap_or_else(|error| exit_with_error(error));
    let index = SchemaIndex::from_provider_schemas(&schemas, provider_name, provider_source);
    if index.is_none() {
        tracing::warn!(
            provider = provider_name,
            source = provider_source.unwrap_or(""),
            path = %path.display(),
            "provider not found in providers schema, schema checks disabled"
        );
    }
    index
}

pub fn render_text(result: &CheckResult) -> String {
    let mut out = format!(
        "[tfproviderdocs] {} (directories={}, documents={}, findings={})\n",
        if result.success { "OK" } else { "FAIL" },
        result.summary.directory_count,
        result.summary.document_count,
        result.summary.finding_count
    );
    for finding in &result.findings {
        out.push_str(&format!("  - {finding}\n"));
    }
    if result.summary.discarded_missing_count > 0 {
        out.push_str(&format!(
            "  (ignored {} missing documentation files)\n",
            result.summary.discarded_missing_count
        ));
    }
    out
}

pub fn run(args: Args) {
    let file_config = match args.config.as_deref() {
        Some(path) => {
            load_file_config(Path::new(path)).unwrap_or_else(|error| exit_with_error(error))
        }
        None => FileConfig::default(),
    };
    let resolved = resolve(&args.flags, file_config).unwrap_or_else(|error| exit_with_error(error));
    let options = resolved.options;

    let base = PathBuf::from(&args.flags.path);
    if !base.is_dir() {
        exit_with_error(format!("provider path is not a directory: {}", base.display()));
    }

    if let Err(error) = options.validate(resolved.providers_schema_json.is_some()) {
        exit_with_error(error);
    }

    let directories =
        documentation_directories(&base).unwrap_or_else(|error| exit_with_error(error));
    if directories.is_empty() {
        exit_with_error(format!(
            "no Terraform Provider documentation directories found at {}",
            base.display()
        ));
    }
    tracing::debug!(count = directories.len(), "found documentation directories");

    let schema = resolved.providers_schema_json.as_deref().and_then(|path| {
        load_schema_index(
            path,
            &options.provider_name,
            options.provider_source.as_deref(),
        )
    });

    let check = Check::new(options, schema)
        .unwrap_or_else(|error| exit_with_error(error))
        .with_observer(TracingObserver);
    let result = check
        .run(&FsSource::new(&base), &directories)
        .unwrap_or_else(|error| exit_with_error(error));

    if args.json {
        let payload = json!({
            "schema": 1,
            "checkKind": result.check_kind,
            "path": base.display().to_string(),
            "result": result.result(),
            "failureClasses": result.failure_classes(),
            "findings": result.findings,
            "summary": result.summary,
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
            eprintln!("error: failed to render check payload: {error}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        print!("{}", render_text(&result));
    }

    if !result.success {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfproviderdocs_check::{CheckSummary, Finding, FindingCategory};

    #[test]
    fn render_text_lists_findings() {
        let result = CheckResult::new(
            vec![
                Finding::new(
                    FindingCategory::MissingFile,
                    "thing",
                    "docs/resources",
                    "missing documentation file for resource: thing",
                ),
                Finding::new(
                    FindingCategory::FrontMatterInvalid,
                    "guide",
                    "docs/guides/guide.md",
                    "missing required front matter subcategory",
                ),
            ],
            CheckSummary {
                directory_count: 3,
                document_count: 5,
                ..CheckSummary::default()
            },
        );
        insta::assert_snapshot!(render_text(&result), @r"
        [tfproviderdocs] FAIL (directories=3, documents=5, findings=2)
          - file.missing docs/resources: missing documentation file for resource: thing
          - frontmatter.invalid docs/guides/guide.md: missing required front matter subcategory
        ");
    }

    #[test]
    fn render_text_reports_success() {
        let result = CheckResult::new(
            Vec::new(),
            CheckSummary {
                directory_count: 1,
                document_count: 1,
                discarded_missing_count: 2,
                ..CheckSummary::default()
            },
        );
        insta::assert_snapshot!(render_text(&result), @r"
        [tfproviderdocs] OK (directories=1, documents=1, findings=0)
          (ignored 2 missing documentation files)
        ");
    }
}
