//! Command-line interface for repo-stats
//!
//! Two commands are available:
//!
//! - **analyze**: Fetch statistics for one repository, given either directly on the
//!   command line or as a `{"repo_url": ...}` request body, and print the resulting
//!   JSON document
//! - **init**: Generate a default configuration file
//!
//! All output goes through a [`Host`] so the commands can be exercised without touching
//! the real terminal or terminating the process.

mod analyze;
mod common;
mod host;
mod init;
mod run;

pub use analyze::{AnalyzeArgs, analyze_repository};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
