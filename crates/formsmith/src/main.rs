//! `formsmith` -- form schema checker and code generator CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    // Set up logging before the context so config discovery is traced too.
    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("formsmith=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| match cli.command {
        Some(Commands::Export(args)) => commands::export::run(&ctx, &args),
        Some(Commands::Preview(args)) => commands::preview::run(&ctx, &args),
        Some(Commands::Steps(args)) => commands::steps::run(&ctx, &args),
        Some(Commands::Validate(args)) => commands::validate::run(&ctx, &args),
        Some(Commands::Init(args)) => commands::init::run(&ctx, &args),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::info::completion(&args),
        Some(Commands::Version) => commands::info::version(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
