//! # fibdrv-cli
//!
//! Output formatting, timing reports, and shell completion for the
//! `fibdrv-client` binary.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod report;

pub use presenter::{CLIResultPresenter, ResultPresenter};
pub use report::{ReportFormat, TimingReport, TimingSample};
