//! End-to-end CLI integration tests for the `formsmith` binary.
//!
//! Each test writes its form documents into its own temporary directory and
//! runs the binary as a subprocess via `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `formsmith` binary, isolated
/// from the caller's environment.
fn formsmith(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("formsmith").unwrap();
    cmd.current_dir(tmp.path())
        .env("NO_COLOR", "1")
        .env_remove("FORMSMITH_DIR")
        .env_remove("FORMSMITH_EXPORT__FORMAT")
        .env_remove("FORMSMITH_EXPORT__INDENT");
    cmd
}

fn write(tmp: &TempDir, name: &str, content: &str) {
    std::fs::write(tmp.path().join(name), content).unwrap();
}

const SIGNUP: &str = r#"{
  "name": "Signup",
  "fields": [
    {"id": "name", "type": "text", "label": "Name", "required": true, "maxLength": 40},
    {"id": "country", "type": "select", "label": "Country",
     "options": [{"label": "United States", "value": "us"}, {"label": "Other", "value": "other"}]},
    {"id": "other_country", "type": "text", "label": "Which country?",
     "conditionalLogic": {"rules": [{"field": "country", "operator": "equals", "value": "other"}],
                          "combinator": "AND", "action": "show"}},
    {"id": "pb", "type": "pageBreak", "label": "Preferences", "helpText": "Almost done"},
    {"id": "topics", "type": "checkbox", "label": "Topics",
     "options": [{"label": "A", "value": "a"}, {"label": "B", "value": "b"}]}
  ]
}"#;

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_json_round_trips_a_required_text_field() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "form.json",
        r#"{"name": "Contact", "fields": [{"id": "name", "type": "text", "label": "Name", "required": true}]}"#,
    );

    let output = formsmith(&tmp)
        .args(["export", "form.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields = doc["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["label"], "Name");
    assert_eq!(fields[0]["required"], true);
    assert_eq!(doc["name"], "Contact");
}

#[test]
fn export_every_format_to_files() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);

    for (format, file, needle) in [
        ("css-framework", "out/signup.html", "<form"),
        ("react", "out/Signup.jsx", "export default function SignupForm()"),
        ("typescript", "out/Signup.tsx", "interface ConditionalLogic"),
        ("wordpress", "out/signup.txt", "[formsmith_step id=\"step-2\" title=\"Preferences\""),
    ] {
        formsmith(&tmp)
            .args(["export", "signup.json", "-f", format, "-o", file])
            .assert()
            .success()
            .stderr(predicate::str::contains("Wrote"));
        let text = std::fs::read_to_string(tmp.path().join(file)).unwrap();
        assert!(text.contains(needle), "{format} output lacks {needle:?}");
    }
}

#[test]
fn exported_json_keeps_wizard_steps() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    formsmith(&tmp)
        .args(["export", "signup.json", "-f", "json", "-o", "exported.json"])
        .assert()
        .success();

    let output = formsmith(&tmp)
        .args(["steps", "exported.json", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["isWizard"], true);
    assert_eq!(report["steps"][1]["title"], "Preferences");
}

#[test]
fn export_into_a_directory_names_the_file() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    std::fs::create_dir(tmp.path().join("out")).unwrap();

    formsmith(&tmp)
        .args(["export", "signup.json", "-f", "typescript", "-o", "out"])
        .assert()
        .success();
    let text = std::fs::read_to_string(tmp.path().join("out/signup.tsx")).unwrap();
    assert!(text.contains("interface ConditionalLogic"));
}

#[test]
fn export_json_mode_reports_metadata() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);

    let output = formsmith(&tmp)
        .args(["export", "signup.json", "-f", "react", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "react");
    assert_eq!(report["mediaType"], "text/jsx");
    assert!(report["content"].as_str().unwrap().contains("useState"));
}

#[test]
fn export_uses_configured_defaults() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    formsmith(&tmp).args(["init", "--quiet"]).assert().success();
    std::fs::write(
        tmp.path().join(".formsmith/config.yaml"),
        "export:\n  format: wordpress\n  shortcode_tag: signup_form\n",
    )
    .unwrap();

    formsmith(&tmp)
        .args(["export", "signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[signup_form name=\"Signup\""));
}

#[test]
fn export_rejects_unknown_format_and_missing_file() {
    let tmp = TempDir::new().unwrap();
    formsmith(&tmp)
        .args(["export", "form.json", "-f", "pdf"])
        .assert()
        .failure();

    formsmith(&tmp)
        .args(["export", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load form"));
}

#[test]
fn json_errors_are_structured() {
    let tmp = TempDir::new().unwrap();
    let output = formsmith(&tmp)
        .args(["export", "missing.json", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("missing.json"));
}

// ---------------------------------------------------------------------------
// Preview / Steps
// ---------------------------------------------------------------------------

#[test]
fn preview_follows_conditional_logic() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    write(&tmp, "us.json", r#"{"country": "us"}"#);
    write(&tmp, "other.yaml", "country: other\n");

    let visible_ids = |values: &str| -> Vec<String> {
        let output = formsmith(&tmp)
            .args(["preview", "signup.json", "--values", values, "--visible-only", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        report["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(visible_ids("us.json"), ["name", "country", "topics"]);
    assert_eq!(
        visible_ids("other.yaml"),
        ["name", "country", "other_country", "topics"]
    );
}

#[test]
fn preview_text_mode_summarizes() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    formsmith(&tmp)
        .args(["preview", "signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 4 fields visible"));
}

#[test]
fn steps_reports_wizard_layout() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);

    let output = formsmith(&tmp)
        .args(["steps", "signup.json", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["isWizard"], true);
    let steps = layout["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["title"], "Step 1");
    assert_eq!(steps[1]["title"], "Preferences");
    assert_eq!(steps[1]["description"], "Almost done");
    assert_eq!(steps[1]["fields"], serde_json::json!(["topics"]));

    formsmith(&tmp)
        .args(["steps", "signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STEP 2/2  Preferences"));
}

#[test]
fn leading_page_break_is_a_single_page_form() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "form.yaml",
        "name: Short\nfields:\n  - {id: pb, type: pageBreak}\n  - {id: q, type: text, label: Question}\n",
    );
    formsmith(&tmp)
        .args(["steps", "form.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("single page form"));
}

// ---------------------------------------------------------------------------
// Validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_a_clean_form() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    formsmith(&tmp)
        .args(["validate", "signup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn validate_rejects_an_invalid_pattern() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "bad.json",
        r#"{"fields": [{"id": "code", "type": "text", "label": "Code", "pattern": "[invalid("}]}"#,
    );
    formsmith(&tmp)
        .args(["validate", "bad.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("code: invalid pattern"))
        .stderr(predicate::str::contains("1 problem(s) found"));

    // The session drops the field, so exports never see it.
    let output = formsmith(&tmp)
        .args(["export", "bad.json", "-f", "json"])
        .output()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["fields"], serde_json::json!([]));
}

#[test]
fn validate_checks_submissions_of_visible_fields() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "signup.json", SIGNUP);
    write(&tmp, "empty.json", r#"{"country": "us"}"#);
    write(&tmp, "ok.json", r#"{"name": "Ada", "country": "us"}"#);

    let output = formsmith(&tmp)
        .args(["validate", "signup.json", "--values", "empty.json", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["submissionErrors"], 1);
    assert_eq!(report["problems"][0]["message"], "Name is required");

    formsmith(&tmp)
        .args(["validate", "signup.json", "--values", "ok.json"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Init / Config / Misc
// ---------------------------------------------------------------------------

#[test]
fn init_creates_project_dir_once() {
    let tmp = TempDir::new().unwrap();
    formsmith(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized formsmith project"));
    assert!(tmp.path().join(".formsmith/config.yaml").is_file());

    formsmith(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    formsmith(&tmp).args(["init", "--force"]).assert().success();
}

#[test]
fn config_get_list_and_env_override() {
    let tmp = TempDir::new().unwrap();
    formsmith(&tmp).args(["init", "-q"]).assert().success();

    formsmith(&tmp)
        .args(["config", "get", "export.indent"])
        .assert()
        .success()
        .stdout("2\n");

    formsmith(&tmp)
        .args(["config", "get", "export.indent"])
        .env("FORMSMITH_EXPORT__INDENT", "4")
        .assert()
        .success()
        .stdout("4\n");

    formsmith(&tmp)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export.format = json"))
        .stdout(predicate::str::contains("form.name = Untitled Form"));

    formsmith(&tmp)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}

#[test]
fn version_and_completion() {
    let tmp = TempDir::new().unwrap();
    formsmith(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("formsmith version"))
        .stdout(predicate::str::contains(
            "formats: json, css-framework, react, typescript, wordpress",
        ));

    formsmith(&tmp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formsmith"));
}
