pub mod aggregate;
pub mod check;
pub mod error;
pub mod io;
pub mod model;
pub mod report;
pub mod run;

pub use error::{Result, ToolError};
