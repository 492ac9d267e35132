//! TUI screen implementations.

pub mod application_form;
pub mod help;
pub mod summary;

pub use application_form::{ApplicationFormState, draw_application_form};
pub use help::{HelpState, draw_help};
pub use summary::{SummaryState, draw_summary};
