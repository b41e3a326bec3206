pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

pub use config::LitmusConfig;
pub use error::{LitmusError, Result};
pub use report::{build_report, error_report, ReportSection, ReportView, Tone};
