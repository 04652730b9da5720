use std::time::Duration;

use reqwest::Client;

use crate::configuration::HttpSettings;

/// Single client shared by every scraper.
pub fn build_http_client(settings: &HttpSettings) -> reqwest::Result<Client> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
}
