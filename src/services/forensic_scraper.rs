use anyhow::{anyhow, bail, Context};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    configuration::ForensicSettings,
    domain::company_profile::{parse_profile_page, watchlist_notes, WatchlistEntry},
};

pub const FORENSIC_FALLBACK: &str =
    "No recent forensic findings or major alerts found for this company.";

const SEARCH_PATH: &str = "/api/company/search/";

/// Appends a site-relative path to `base_url`, keeping any path prefix the
/// base carries. Absolute and protocol-relative urls are rejected.
fn site_url(base_url: &Url, path: &str) -> anyhow::Result<Url> {
    let path = path.trim();
    if !path.starts_with('/') || path.starts_with("//") {
        bail!("Refusing non site-relative path {}", path);
    }

    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }

    let url = base.join(path.trim_start_matches('/'))?;
    if url.origin() != base_url.origin() {
        bail!("Path {} leaves the configured site", path);
    }
    Ok(url)
}

#[derive(Deserialize, Debug)]
struct SearchResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

pub struct ForensicScraper {
    client: Client,
    base_url: String,
    default_company: String,
    watchlist: Vec<WatchlistEntry>,
}

impl ForensicScraper {
    pub fn new(client: Client, settings: ForensicSettings) -> Self {
        ForensicScraper {
            client,
            base_url: settings.base_url,
            default_company: settings.default_company,
            watchlist: settings.watchlist,
        }
    }

    pub fn default_company(&self) -> &str {
        &self.default_company
    }

    /// Profile lines followed by watchlist notes. `FORENSIC_FALLBACK` is
    /// returned only when the profile is unavailable and no note matches.
    pub async fn lookup(&self, company: &str) -> Vec<String> {
        let company = company.trim();
        let notes = watchlist_notes(company, &self.watchlist);

        let mut lines = match company.is_empty() {
            true => vec![],
            false => match self.try_lookup(company).await {
                Ok(lines) => {
                    log::info!("Found {} forensic lines for {}", lines.len(), company);
                    lines
                }
                Err(e) => {
                    log::error!("Forensic lookup failed for {}: {:?}", company, e);
                    vec![]
                }
            },
        };

        lines.extend(notes);
        if lines.is_empty() {
            lines.push(FORENSIC_FALLBACK.to_string());
        }
        lines
    }

    async fn try_lookup(&self, company: &str) -> anyhow::Result<Vec<String>> {
        let base_url = Url::parse(&self.base_url).context("Invalid forensic base url")?;

        let search_results: Vec<SearchResult> = self
            .client
            .get(site_url(&base_url, SEARCH_PATH)?)
            .query(&SearchQuery { q: company })
            .send()
            .await
            .context("No response from company search")?
            .error_for_status()?
            .json()
            .await
            .context("Company search returned unexpected json")?;

        let chosen = search_results
            .into_iter()
            .find(|r| r.url.as_deref().is_some_and(|u| !u.trim().is_empty()))
            .ok_or_else(|| anyhow!("No search result with a profile url"))?;
        let profile_path = chosen.url.unwrap_or_default();

        log::info!(
            "Resolved {} to {} ({})",
            company,
            chosen.name.as_deref().unwrap_or("unnamed"),
            profile_path
        );

        let html_content = self
            .client
            .get(site_url(&base_url, &profile_path)?)
            .send()
            .await
            .context("No response from company profile page")?
            .error_for_status()?
            .text()
            .await
            .context("Failed to read company profile body")?;

        let profile = parse_profile_page(&html_content)?;

        Ok(profile.summary_lines())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn scraper_for(base_url: String) -> ForensicScraper {
        ForensicScraper::new(
            Client::new(),
            ForensicSettings {
                base_url,
                default_company: "Reliance".to_string(),
                watchlist: vec![WatchlistEntry {
                    pattern: "karvy".to_string(),
                    note: "SEBI and ED actions ongoing.".to_string(),
                }],
            },
        )
    }

    #[tokio::test]
    async fn lookup_scrapes_first_search_hit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("q", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "Search everywhere", "url": null },
                { "id": 2, "name": "ABC Corp", "url": "/company/ABC/" }
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/company/ABC/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<h1>ABC Corp</h1><div class="about"><p>Makes widgets.</p></div>"#,
            ))
            .mount(&mock_server)
            .await;

        let scraper = scraper_for(mock_server.uri());

        assert_eq!(
            scraper.lookup("abc").await,
            vec!["Company: ABC Corp", "About: Makes widgets."]
        );
    }

    #[tokio::test]
    async fn missing_json_fields_yield_fallback() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": 7 }])),
            )
            .mount(&mock_server)
            .await;

        let scraper = scraper_for(mock_server.uri());

        assert_eq!(scraper.lookup("nothing").await, vec![FORENSIC_FALLBACK]);
    }

    #[tokio::test]
    async fn failure_with_watchlist_match_shows_only_notes() {
        let scraper = scraper_for("http://127.0.0.1:1".to_string());

        assert_eq!(
            scraper.lookup("Karvy Stock Broking").await,
            vec!["SEBI and ED actions ongoing."]
        );
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/screener/api/company/search/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 2, "name": "XYZ Ltd", "url": "/company/XYZ/" }
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/screener/company/XYZ/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>XYZ Ltd</h1>"))
            .mount(&mock_server)
            .await;

        let scraper = scraper_for(format!("{}/screener", mock_server.uri()));

        assert_eq!(scraper.lookup("xyz").await, vec!["Company: XYZ Ltd"]);
    }

    #[tokio::test]
    async fn offsite_profile_url_is_not_followed() {
        let mock_server = MockServer::start().await;
        let other_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 3, "name": "Elsewhere", "url": format!("{}/company/X/", other_server.uri()) }
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Offsite Page</h1>"))
            .expect(0)
            .mount(&other_server)
            .await;

        let scraper = scraper_for(mock_server.uri());

        assert_eq!(scraper.lookup("elsewhere").await, vec![FORENSIC_FALLBACK]);
    }

    #[test]
    fn site_url_rejects_foreign_paths() {
        let base = Url::parse("https://www.screener.in/prefix").unwrap();

        assert_eq!(
            site_url(&base, "/company/ABC/").unwrap().as_str(),
            "https://www.screener.in/prefix/company/ABC/"
        );
        assert!(site_url(&base, "https://evil.example/company/").is_err());
        assert!(site_url(&base, "//evil.example/company/").is_err());
        assert!(site_url(&base, "company/ABC/").is_err());
    }

    #[tokio::test]
    async fn blank_query_skips_network() {
        let scraper = scraper_for("not a url".to_string());

        assert_eq!(scraper.lookup("   ").await, vec![FORENSIC_FALLBACK]);
    }
}
