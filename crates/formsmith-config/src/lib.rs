//! Configuration management for formsmith.
//!
//! This crate discovers the `.formsmith/` project directory and loads
//! `.formsmith/config.yaml` layered under environment overrides, giving the
//! CLI typed defaults for exports and new forms.

pub mod config;
pub mod project_dir;
