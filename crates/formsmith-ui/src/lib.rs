//! Terminal styling for formsmith CLI output.
//!
//! Colour helpers, icons and terminal detection used by the report
//! commands (`preview`, `steps`, `validate`).

pub mod styles;
pub mod terminal;
