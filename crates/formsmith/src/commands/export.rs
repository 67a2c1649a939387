//! `formsmith export` -- generate code for a form.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formsmith_core::enums::ExportFormat;
use formsmith_export::escape::slug;
use formsmith_export::{ExportRequest, ExportSettings, generate};

use crate::cli::ExportArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, write_artifact};

/// An existing directory given as `--output` receives `<form-name>.<ext>`.
fn output_path(output: &Path, name: &str, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(format!("{}.{}", slug(name), format.file_extension()))
    } else {
        output.to_path_buf()
    }
}

/// Execute the `formsmith export` command.
pub fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let session = ctx.open_form(&args.file)?;
    let defaults = &ctx.config.export;

    let format = args.format.unwrap_or(defaults.format);
    let settings = ExportSettings {
        framework: args.framework.unwrap_or(defaults.framework),
        indent: args.indent.unwrap_or(defaults.indent),
        shortcode_tag: args
            .shortcode_tag
            .clone()
            .unwrap_or_else(|| defaults.shortcode_tag.clone()),
    };
    let name = args.name.as_deref().unwrap_or(session.name());

    let request =
        ExportRequest::new(name, session.fields(), session.options()).with_settings(settings);
    let artifact = generate(format, &request)
        .with_context(|| format!("failed to export {}", args.file.display()))?;

    let output = args
        .output
        .as_deref()
        .map(|path| output_path(path, name, format));

    if ctx.json {
        let mut report = serde_json::json!({
            "format": format,
            "mediaType": format.media_type(),
            "fields": session.fields().len(),
            "bytes": artifact.len(),
        });
        match &output {
            Some(path) => {
                write_artifact(Some(path), &artifact)?;
                report["output"] = serde_json::json!(path.display().to_string());
            }
            None => report["content"] = serde_json::json!(artifact),
        }
        output_json(&report);
        return Ok(());
    }

    write_artifact(output.as_deref(), &artifact)?;
    if let Some(path) = &output {
        if !ctx.quiet {
            eprintln!("Wrote {} export to {}", format, path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_output_gets_a_file_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path(dir.path(), "Contact Us", ExportFormat::Typescript),
            dir.path().join("contact-us.tsx")
        );
        let file = dir.path().join("form.html");
        assert_eq!(output_path(&file, "Contact Us", ExportFormat::CssFramework), file);
    }
}
