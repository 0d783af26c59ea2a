//! Core library for the factcheck-jobs command line application.
//!
//! The library attributes month-over-month changes in private employment to
//! the party holding the presidency and renders the result as a Markdown
//! report. Input readers live under [`factcheck::jobs::io`], data types in
//! [`factcheck::jobs::model`], the delta fold in [`factcheck::jobs::aggregate`],
//! the snapshot comparison in [`factcheck::jobs::check`], and the end-to-end
//! orchestration under [`factcheck::jobs::run`].

pub mod factcheck;

pub use factcheck::jobs::{Result, ToolError, aggregate, check, error, io, model, report, run};
