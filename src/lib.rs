#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Terminal job application form: a submit/edit state machine over an
//! application record, a field validator, and a ratatui front end.

pub mod logging;
pub mod model;
pub mod tui;
