//! Aggregate statistics about a GitHub repository.
//!
//! # Usage
//!
//! ```bash
//! export GITHUB_TOKEN=...
//! repo-stats analyze tokio-rs/tokio
//! repo-stats analyze https://github.com/tokio-rs/tokio --log-level info
//! echo '{"repo_url": "serde-rs/serde"}' | repo-stats analyze --request -
//! repo-stats init
//! ```
//!
//! The statistics document is written to stdout as JSON. When the analysis fails, a
//! `{"detail": ...}` body is written instead, the HTTP status is reported on stderr,
//! and the process exits with status code 1.

use repo_stats::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real terminal.
#[derive(Debug, Clone, Default)]
struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
