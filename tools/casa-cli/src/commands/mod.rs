//! CLI commands.

mod demo;
mod report;
mod seed;

pub use demo::demo;
pub use report::{report, ReportArgs};
pub use seed::seed;
