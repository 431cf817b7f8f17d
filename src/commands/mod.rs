use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;

use crate::{client::PricePredictionClient, config::Settings, runtime::Runtime};

mod config;
mod predict;

pub use config::show_config;

/// Price every input (files, or stdin when none are given) and print the results
#[tracing::instrument(skip(runtime, league, api_url))]
pub async fn predict<R: Runtime>(
    runtime: R,
    files: &[PathBuf],
    summary: bool,
    league: Option<String>,
    api_url: Option<String>,
) -> Result<()> {
    let settings = Settings::resolve(&runtime, league, api_url)?;
    let client = Client::builder().user_agent("poeprice-cli").build()?;
    let predictor = PricePredictionClient::new(client, Some(settings.api_url.value));

    predict::run(
        &runtime,
        &predictor,
        &settings.league.value,
        files,
        summary,
        &mut std::io::stdout(),
    )
    .await
}

/// Print the resolved settings and where each one came from
#[tracing::instrument(skip(runtime, league, api_url))]
pub fn config<R: Runtime>(
    runtime: R,
    league: Option<String>,
    api_url: Option<String>,
) -> Result<()> {
    show_config(&runtime, league, api_url, &mut std::io::stdout())
}
