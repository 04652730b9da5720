use anyhow::Context;
use reqwest::Client;

use crate::{
    configuration::RegulatorSettings,
    domain::headline::{
        extract_list_items, filter_headlines, HeadlineSection, KeywordFilter, Tone,
    },
};

pub struct RegulatorScraper {
    client: Client,
    name: String,
    title: String,
    url: String,
    tone: Tone,
    filter: KeywordFilter,
}

impl RegulatorScraper {
    pub fn new(client: Client, settings: RegulatorSettings) -> Self {
        RegulatorScraper {
            client,
            filter: KeywordFilter::new(&settings.keywords),
            name: settings.name,
            title: settings.title,
            url: settings.url,
            tone: settings.tone,
        }
    }

    pub fn fallback(&self) -> String {
        format!("Error fetching {} data", self.name)
    }

    /// Never fails: any upstream problem becomes the single fallback line.
    pub async fn fetch_headlines(&self) -> Vec<String> {
        match self.try_fetch_headlines().await {
            Ok(headlines) => {
                log::info!("Found {} {} headlines", headlines.len(), self.name);
                headlines
            }
            Err(e) => {
                log::error!(
                    "Failed to fetch {} headlines from {}: {:?}",
                    self.name,
                    self.url,
                    e
                );
                vec![self.fallback()]
            }
        }
    }

    pub async fn fetch_section(&self) -> HeadlineSection {
        HeadlineSection {
            source: self.name.clone(),
            title: self.title.clone(),
            tone: self.tone,
            headlines: self.fetch_headlines().await,
        }
    }

    async fn try_fetch_headlines(&self) -> anyhow::Result<Vec<String>> {
        let html_content = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("No response from regulator page")?
            .error_for_status()?
            .text()
            .await
            .context("Failed to read regulator page body")?;

        let items = extract_list_items(&html_content);

        Ok(filter_headlines(items, &self.filter))
    }
}

/// Scrapes each source in turn, preserving configuration order.
pub async fn fetch_all_sections(scrapers: &[RegulatorScraper]) -> Vec<HeadlineSection> {
    let mut sections = Vec::with_capacity(scrapers.len());
    for scraper in scrapers {
        sections.push(scraper.fetch_section().await);
    }
    sections
}
