//! Command handlers. Most modules expose `run(&RuntimeContext, &Args)`.

pub mod config_cmd;
pub mod export;
pub mod info;
pub mod init;
pub mod preview;
pub mod steps;
pub mod validate;
