//! One-shot run of the alerts check, as invoked by the cron host.

use std::process::ExitCode;

use tracing::{error, info};

use crate::client::AlertCheck;
use crate::error::CheckError;
use crate::response::AlertCheckResponse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failure,
}

impl JobOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            JobOutcome::Success => 0,
            JobOutcome::Failure => 1,
        }
    }
}

impl From<JobOutcome> for ExitCode {
    fn from(outcome: JobOutcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Build the client, run a single check and report how it went.
///
/// `base_url` of `None` means the default configuration. Construction errors
/// and panics inside the check are logged and count as a failure, and so
/// does a 200 whose body is an empty object.
pub async fn run(base_url: Option<&str>) -> JobOutcome {
    info!("Starting BYMA alert check...");

    let result = match AlertCheck::new(base_url) {
        Ok(checker) => isolated(async move { checker.check_alerts().await }).await,
        Err(e) => Err(e),
    };
    outcome_of(result)
}

fn outcome_of(result: Result<Option<AlertCheckResponse>, CheckError>) -> JobOutcome {
    match result {
        Ok(Some(response)) if !response.is_empty() => {
            info!("Alert check completed successfully");
            JobOutcome::Success
        }
        Ok(_) => {
            error!("Alert check failed");
            JobOutcome::Failure
        }
        Err(e) => {
            error!("Unexpected error: {e}");
            JobOutcome::Failure
        }
    }
}

/// Run the check on its own task so a panic comes back as an error.
async fn isolated<F>(check: F) -> Result<Option<AlertCheckResponse>, CheckError>
where
    F: Future<Output = Option<AlertCheckResponse>> + Send + 'static,
{
    tokio::spawn(check)
        .await
        .map_err(|e| CheckError::Join(e.to_string()))
}
