//! Clap CLI definitions for the `formsmith` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use formsmith_core::enums::{CssFramework, ExportFormat};

/// formsmith -- build, check and export forms from a field list.
#[derive(Parser, Debug)]
#[command(
    name = "formsmith",
    about = "Form schema checker and code generator",
    long_about = "Reads a form document (fields, options) and previews its conditional logic, \
                  shows its wizard steps, validates it, or generates JSON, HTML, React, \
                  TypeScript or WordPress shortcode output.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Project directory holding config.yaml (default: auto-discover .formsmith/).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Working With Forms =====
    /// Generate code for a form.
    #[command(alias = "gen")]
    Export(ExportArgs),

    /// Show which fields are visible for a set of values.
    Preview(PreviewArgs),

    /// Show how a form splits into wizard steps.
    Steps(StepsArgs),

    /// Check a form's fields, and optionally a submission, against their rules.
    #[command(alias = "check")]
    Validate(ValidateArgs),

    // ===== Setup & Configuration =====
    /// Create a .formsmith/ project directory with a default config.
    Init(InitArgs),

    /// Inspect configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Arguments for `formsmith export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Form document (.json, .yaml, .yml or .toml).
    pub file: PathBuf,

    /// Output format: json, css-framework, react, typescript, wordpress
    /// (default: from config).
    #[arg(short = 'f', long)]
    pub format: Option<ExportFormat>,

    /// Form name override.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// CSS framework for css-framework output: bootstrap, tailwind, plain.
    #[arg(long)]
    pub framework: Option<CssFramework>,

    /// Spaces per indentation level.
    #[arg(long)]
    pub indent: Option<usize>,

    /// Shortcode tag for wordpress output.
    #[arg(long)]
    pub shortcode_tag: Option<String>,

    /// Write to this file instead of stdout. An existing directory gets
    /// `<form-name>.<ext>`.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Preview / Steps / Validate
// ---------------------------------------------------------------------------

/// Arguments for `formsmith preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Form document.
    pub file: PathBuf,

    /// Values file (JSON or YAML object of field id to value).
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Only list visible fields.
    #[arg(long)]
    pub visible_only: bool,
}

/// Arguments for `formsmith steps`.
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Form document.
    pub file: PathBuf,
}

/// Arguments for `formsmith validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form document.
    pub file: PathBuf,

    /// Values file to check as a submission.
    #[arg(long)]
    pub values: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Arguments for `formsmith init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `formsmith config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value by dotted key (e.g. export.format).
    Get(ConfigGetArgs),
    /// List all configuration values.
    List,
    /// Print the project directory in use.
    Path,
}

/// Arguments for `formsmith config get`.
#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Configuration key.
    pub key: String,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `formsmith completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
