//! Core types for the formsmith form builder.
//!
//! This crate holds the field schema, form-wide options, run-time values,
//! form documents and the builder session that owns them.

pub mod document;
pub mod enums;
pub mod field;
pub mod idgen;
pub mod options;
pub mod pattern;
pub mod sanitize;
pub mod session;
pub mod validation;
pub mod values;
