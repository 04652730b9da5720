use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use shadecheck::{
    configuration::get_configuration,
    services::{build_http_client, ForensicScraper, RegulatorScraper},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let client = build_http_client(&configuration.http).context("Failed to build http client")?;
    let forensic_scraper = ForensicScraper::new(client.clone(), configuration.forensic);
    let regulator_scrapers = configuration
        .regulators
        .into_iter()
        .map(|settings| RegulatorScraper::new(client.clone(), settings))
        .collect();

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Serving dashboard on http://{}", address);

    run(listener, forensic_scraper, regulator_scrapers)?.await?;
    Ok(())
}
