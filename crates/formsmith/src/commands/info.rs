//! `formsmith version` and `formsmith completion`.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use formsmith_core::enums::ExportFormat;

use crate::cli::{Cli, CompletionArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set `FORMSMITH_BUILD` at compile time to stamp release builds.
const BUILD: &str = match option_env!("FORMSMITH_BUILD") {
    Some(b) => b,
    None => "dev",
};

/// Prints the version, the export formats this build generates and the
/// project directory in effect.
pub fn version(ctx: &RuntimeContext) -> Result<()> {
    let platform = format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH);

    if ctx.json {
        let formats: Vec<_> = ExportFormat::ALL
            .iter()
            .map(|f| serde_json::json!({ "name": f, "mediaType": f.media_type() }))
            .collect();
        output_json(&serde_json::json!({
            "version": VERSION,
            "build": BUILD,
            "platform": platform,
            "formats": formats,
            "projectDir": ctx.project_dir,
        }));
        return Ok(());
    }

    println!("formsmith version {} ({}) {}", VERSION, BUILD, platform);
    if !ctx.quiet {
        let names: Vec<&str> = ExportFormat::ALL.iter().map(ExportFormat::as_str).collect();
        println!("formats: {}", names.join(", "));
        if let Some(dir) = &ctx.project_dir {
            println!("project: {}", dir.display());
        }
    }
    Ok(())
}

/// Writes a completion script for the requested shell to stdout.
pub fn completion(args: &CompletionArgs) -> Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "formsmith", &mut io::stdout());
    Ok(())
}
