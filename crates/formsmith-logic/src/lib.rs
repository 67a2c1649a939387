//! Conditional logic and step layout for formsmith forms.
//!
//! Everything here is a pure function over borrowed fields and values.

pub mod condition;
pub mod steps;
pub mod submission;
pub mod visibility;

pub use condition::evaluate;
pub use steps::{Partition, Step, partition};
pub use submission::{FieldError, Violation, validate_submission};
pub use visibility::{is_visible, visible_fields};
