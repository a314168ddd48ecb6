use anyhow::Context;
use roster_app::{App, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roster_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(path = %config.storage_path().display(), reset = config.reset, "starting");

    let app = App::bootstrap(&config).await?;

    let state = app.service().state();
    tracing::info!(
        people = state.people().people().len(),
        visible = state.people().filtered_people().len(),
        favorites = state.favorites().favorites().len(),
        "people manager ready"
    );

    app.service().flush().await;
    if app.service().write_failures() > 0 {
        tracing::warn!(failures = app.service().write_failures(), "some writes did not reach storage");
    }

    app.shutdown().await;
    Ok(())
}
