use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const PROVIDER_SOURCE: &str = "registry.terraform.io/hashicorp/example";

const SCHEMA: &str = r#"{
    "format_version": "1.0",
    "provider_schemas": {
        "registry.terraform.io/hashicorp/example": {
            "resource_schemas": {
                "example_thing": {
                    "version": 0,
                    "block": {
                        "attributes": {
                            "id": {"type": "string", "computed": true},
                            "name": {"type": "string", "required": true}
                        }
                    }
                }
            },
            "data_source_schemas": {}
        }
    }
}"#;

fn run_tfproviderdocs<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_tfproviderdocs");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("tfproviderdocs command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
    assert_eq!(output.status.code(), Some(1));
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be JSON: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dirs should be created");
    }
    fs::write(path, contents).expect("fixture should write");
}

fn resource_doc(arguments: &[&str]) -> String {
    let mut doc = String::from(
        "---\nsubcategory: \"Compute\"\npage_title: \"example_thing\"\n---\n\n# Resource: example_thing\n\n## Argument Reference\n\n",
    );
    for argument in arguments {
        doc.push_str(&format!("* `{argument}` - (Optional) Value.\n"));
    }
    doc
}

/// A registry-layout provider checkout named `terraform-provider-example`.
fn registry_provider(temp: &tempfile::TempDir) -> PathBuf {
    let root = temp.path().join("terraform-provider-example");
    write_file(&root, "docs/index.md", "---\npage_title: \"Provider: Example\"\n---\n");
    write_file(&root, "docs/resources/thing.md", &resource_doc(&["id", "name"]));
    write_file(
        &root,
        "docs/guides/getting-started.md",
        "---\nsubcategory: \"Guides\"\npage_title: \"Getting Started\"\n---\n",
    );
    write_file(&root, "docs/CONTRIBUTING.md", "not documentation\n");
    root
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths should be utf-8")
}

#[test]
fn check_accepts_clean_registry_provider() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);

    let output = run_tfproviderdocs(["check", path_arg(&root)]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(
        stdout.starts_with("[tfproviderdocs] OK (directories=3, documents=3, findings=0)"),
        "{stdout}"
    );
}

#[test]
fn check_reports_missing_and_extra_files_against_schema() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);
    fs::remove_file(root.join("docs/resources/thing.md")).expect("fixture should be removed");
    write_file(&root, "docs/resources/other.md", &resource_doc(&[]));
    let schema = temp.path().join("schema.json");
    fs::write(&schema, SCHEMA).expect("schema should write");

    let output = run_tfproviderdocs([
        "check",
        "--providers-schema-json",
        path_arg(&schema),
        "--provider-source",
        PROVIDER_SOURCE,
        "--json",
        path_arg(&root),
    ]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["schema"], 1);
    assert_eq!(payload["checkKind"], "tfproviderdocs.check.v1");
    assert_eq!(payload["result"], "rejected");
    assert_eq!(
        payload["failureClasses"],
        serde_json::json!(["file.mismatch", "file.missing"])
    );
    let findings = payload["findings"]
        .as_array()
        .expect("findings should be an array");
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["identifier"], "other");
    assert_eq!(findings[0]["path"], "docs/resources/other.md");
    assert_eq!(findings[1]["identifier"], "thing");
    assert_eq!(findings[1]["path"], "docs/resources");
}

#[test]
fn check_ignore_flags_clear_file_findings() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);
    fs::remove_file(root.join("docs/resources/thing.md")).expect("fixture should be removed");
    write_file(&root, "docs/resources/other.md", &resource_doc(&[]));
    let schema = temp.path().join("schema.json");
    fs::write(&schema, SCHEMA).expect("schema should write");

    let output = run_tfproviderdocs([
        "check",
        "--providers-schema-json",
        path_arg(&schema),
        "--provider-source",
        PROVIDER_SOURCE,
        "--ignore-file-mismatch-resources",
        "other",
        "--ignore-cdktf-missing-files",
        path_arg(&root),
    ]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("ignored 1 missing documentation files"));
}

#[test]
fn check_enforces_subcategory_allow_list() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);

    let output = run_tfproviderdocs([
        "check",
        "--allowed-resource-subcategories",
        "Storage,Networking",
        path_arg(&root),
    ]);
    assert_failure(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.contains("[tfproviderdocs] FAIL"), "{stdout}");
    assert!(
        stdout.contains("frontmatter.invalid docs/resources/thing.md"),
        "{stdout}"
    );
}

#[test]
fn check_contents_reports_ordering() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);
    write_file(&root, "docs/resources/thing.md", &resource_doc(&["name", "id"]));
    let schema = temp.path().join("schema.json");
    fs::write(&schema, SCHEMA).expect("schema should write");

    let output = run_tfproviderdocs([
        "check",
        "--providers-schema-json",
        path_arg(&schema),
        "--provider-source",
        PROVIDER_SOURCE,
        "--enable-contents-check",
        "--require-schema-ordering",
        "--json",
        path_arg(&root),
    ]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["failureClasses"], serde_json::json!(["contents.ordering"]));
}

#[test]
fn check_rejects_ordering_without_contents() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);

    let output = run_tfproviderdocs(["check", "--require-schema-ordering", path_arg(&root)]);
    assert_failure(&output);
    assert!(stdout_text(&output).is_empty());
    assert!(
        stderr_text(&output).contains("--require-schema-ordering requires --enable-contents-check"),
        "{}",
        stderr_text(&output)
    );
}

#[test]
fn check_requires_provider_name_for_schema_checks() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = temp.path().join("docs-checkout");
    write_file(&root, "docs/resources/thing.md", &resource_doc(&[]));

    let output = run_tfproviderdocs(["check", "--enable-contents-check", path_arg(&root)]);
    assert_failure(&output);
    assert!(
        stderr_text(&output).contains("unknown provider name"),
        "{}",
        stderr_text(&output)
    );
}

#[test]
fn check_reads_toml_config() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);
    let subcategories = temp.path().join("subcategories.txt");
    fs::write(&subcategories, "Storage\n\nNetworking\n").expect("list should write");
    let config = temp.path().join("tfproviderdocs.toml");
    fs::write(
        &config,
        format!(
            "require-guide-subcategory = true\nallowed-resource-subcategories-file = {:?}\n",
            subcategories.display().to_string()
        ),
    )
    .expect("config should write");

    let output = run_tfproviderdocs([
        "check",
        "--config",
        path_arg(&config),
        "--json",
        path_arg(&root),
    ]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["failureClasses"], serde_json::json!(["frontmatter.invalid"]));

    let overridden = run_tfproviderdocs([
        "check",
        "--config",
        path_arg(&config),
        "--allowed-resource-subcategories",
        "Compute",
        path_arg(&root),
    ]);
    assert_success(&overridden);
}

#[test]
fn check_rejects_unknown_config_keys() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = registry_provider(&temp);
    let config = temp.path().join("tfproviderdocs.toml");
    fs::write(&config, "enable_contents_check = true\n").expect("config should write");

    let output = run_tfproviderdocs(["check", "--config", path_arg(&config), path_arg(&root)]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("failed to parse config"));
}

#[test]
fn check_without_documentation_fails() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let output = run_tfproviderdocs(["check", path_arg(temp.path())]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("no Terraform Provider documentation directories"));
}

#[test]
fn check_legacy_layout_enforces_file_prefix() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = temp.path().join("terraform-provider-example");
    write_file(
        &root,
        "website/docs/r/example_thing.html.markdown",
        "---\nsubcategory: \"Compute\"\nlayout: \"example\"\n---\n",
    );
    write_file(
        &root,
        "website/docs/r/thing.html.markdown",
        "---\nsubcategory: \"Compute\"\n---\n",
    );

    let output = run_tfproviderdocs(["check", "--json", path_arg(&root)]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    let findings = payload["findings"]
        .as_array()
        .expect("findings should be an array");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["category"], "file.mismatch");
    assert_eq!(findings[0]["path"], "website/docs/r/thing.html.markdown");
}
