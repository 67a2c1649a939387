//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: global flags,
//! the resolved project directory and the loaded configuration.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formsmith_config::config::{FormsmithConfig, load_config};
use formsmith_config::project_dir::find_project_dir;
use formsmith_core::document::{FormDocument, load_document};
use formsmith_core::options::FormOptions;
use formsmith_core::session::FormSession;
use formsmith_core::values::FormValues;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Project directory (e.g. `/repo/.formsmith`), if one was found.
    pub project_dir: Option<PathBuf>,

    /// Directory given with `--config-dir`, if any.
    pub explicit_dir: Option<PathBuf>,

    /// Layered configuration.
    pub config: FormsmithConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// `--config-dir` wins over discovery from the current directory.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let project_dir = match &global.config_dir {
            Some(dir) => Some(dir.clone()),
            None => {
                let cwd = env::current_dir().context("failed to get current directory")?;
                find_project_dir(&cwd)
            }
        };
        let config = load_config(project_dir.as_deref()).with_context(|| match &project_dir {
            Some(dir) => format!("failed to load configuration from {}", dir.display()),
            None => "failed to load configuration".to_string(),
        })?;

        Ok(Self {
            project_dir,
            explicit_dir: global.config_dir.clone(),
            config,
            json: global.json,
            quiet: global.quiet,
        })
    }

    /// Loads a form document and opens it as a session. Fields that break a
    /// write rule are dropped there. The configured name and options stand
    /// in for a document that carries none.
    pub fn open_form(&self, path: &Path) -> Result<FormSession> {
        let mut doc = load_document(path)
            .with_context(|| format!("failed to load form: {}", path.display()))?;
        self.apply_defaults(&mut doc);
        let session = FormSession::from_document(doc);
        debug!(
            path = %path.display(),
            fields = session.fields().len(),
            "opened form"
        );
        Ok(session)
    }

    /// Loads a form document as written, without the session's checks.
    pub fn load_raw_form(&self, path: &Path) -> Result<FormDocument> {
        let mut doc = load_document(path)
            .with_context(|| format!("failed to load form: {}", path.display()))?;
        self.apply_defaults(&mut doc);
        Ok(doc)
    }

    fn apply_defaults(&self, doc: &mut FormDocument) {
        let blank = FormDocument::default();
        if doc.name.trim().is_empty() || doc.name == blank.name {
            doc.name = self.config.form.name.clone();
        }
        if doc.options == FormOptions::default() {
            doc.options = self.config.form.options.clone();
        }
    }
}

/// Loads a values file: a JSON or YAML object of field id to value.
pub fn load_values(path: &Path) -> Result<FormValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read values: {}", path.display()))?;
    let values = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid values file: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid values file: {}", path.display()))?,
    };
    Ok(values)
}

/// Loads `path` when given, otherwise returns empty values.
pub fn load_values_opt(path: Option<&Path>) -> Result<FormValues> {
    path.map(load_values).transpose().map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::values::FormValue;

    fn ctx() -> RuntimeContext {
        RuntimeContext {
            project_dir: None,
            explicit_dir: None,
            config: FormsmithConfig::default(),
            json: false,
            quiet: false,
        }
    }

    #[test]
    fn values_load_from_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("values.json");
        std::fs::write(&json, r#"{"plan": "pro", "age": 21, "tags": ["a"], "skip": null}"#).unwrap();
        let values = load_values(&json).unwrap();
        assert_eq!(values.get("plan"), Some(&FormValue::from("pro")));
        assert_eq!(values.get("age"), Some(&FormValue::from(21.0)));
        assert!(values.get("skip").is_none());

        let yaml = dir.path().join("values.yaml");
        std::fs::write(&yaml, "subscribe: true\n").unwrap();
        let values = load_values(&yaml).unwrap();
        assert_eq!(values.get("subscribe"), Some(&FormValue::from(true)));
    }

    #[test]
    fn missing_values_file_is_empty() {
        assert!(load_values_opt(None).unwrap().is_empty());
    }

    #[test]
    fn configured_name_fills_unnamed_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        std::fs::write(&path, r#"[{"id": "email", "type": "email", "label": "Email"}]"#).unwrap();

        let mut ctx = ctx();
        ctx.config.form.name = "Newsletter".into();
        let session = ctx.open_form(&path).unwrap();
        assert_eq!(session.name(), "Newsletter");
        assert_eq!(session.fields().len(), 1);
    }
}
