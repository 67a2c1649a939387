//! `formsmith init` -- create a `.formsmith/` project directory.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use formsmith_config::config::{CONFIG_FILE_NAME, FormsmithConfig, save_config};
use formsmith_config::project_dir::ensure_project_dir;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `formsmith init` command.
///
/// Creates `.formsmith/` under the current directory (or uses
/// `--config-dir` as given) and writes the default configuration.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    // `--config-dir` names the project directory itself.
    let project_dir = match &ctx.explicit_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory: {}", dir.display()))?;
            dir.clone()
        }
        None => {
            let cwd = env::current_dir().context("failed to get current directory")?;
            ensure_project_dir(&cwd).with_context(|| {
                format!("failed to create project directory under {}", cwd.display())
            })?
        }
    };

    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists\n\nUse --force to overwrite it with the defaults.",
            config_path.display()
        );
    }

    save_config(&project_dir, &FormsmithConfig::default())
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "projectDir": project_dir.display().to_string(),
            "config": config_path.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!("Initialized formsmith project in {}", project_dir.display());
    }
    Ok(())
}
