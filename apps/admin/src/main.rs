//! # Retail Admin Entry Point
//!
//! Restores or starts a session, loads the landing data and exits. The
//! process exit code tells whether the backend was reachable and the user
//! could sign in.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match retail_admin::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = ?e.code, message = %e.message, "Retail admin stopped");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
