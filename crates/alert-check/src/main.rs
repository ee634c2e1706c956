use byma_alert_check::logging::init_tracing;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<ExitCode> {
    color_eyre::install()?;

    // A missing .env file is fine; the cron host normally sets the variables.
    let _ = dotenvy::dotenv();

    init_tracing();

    let outcome = byma_alert_check::run(None).await;
    Ok(outcome.into())
}
