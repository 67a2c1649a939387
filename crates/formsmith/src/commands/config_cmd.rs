//! `formsmith config` -- inspect configuration (get/list/path).

use anyhow::Result;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `formsmith config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Get(get_args) => {
            let value = ctx.config.get(&get_args.key)?;
            if ctx.json {
                output_json(&serde_json::json!({
                    "key": get_args.key,
                    "value": value,
                }));
            } else {
                println!("{}", value);
            }
        }

        ConfigCommands::List => {
            let entries = ctx.config.entries()?;
            if ctx.json {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                output_json(&map);
            } else if entries.is_empty() {
                println!("No configuration values set");
            } else {
                for (key, value) in &entries {
                    println!("{} = {}", key, value);
                }
            }
        }

        ConfigCommands::Path => {
            let path = ctx.project_dir.as_ref().map(|p| p.display().to_string());
            if ctx.json {
                output_json(&serde_json::json!({ "projectDir": path }));
            } else {
                match path {
                    Some(p) => println!("{}", p),
                    None => println!("No .formsmith directory found (using defaults)"),
                }
            }
        }
    }

    Ok(())
}
