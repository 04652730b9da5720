use anyhow::{anyhow, bail};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WatchlistEntry {
    pub pattern: String,
    pub note: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub ratios: Vec<(String, String)>,
    pub promoter_holding: Option<String>,
}

impl CompanyProfile {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        if let Some(name) = &self.name {
            lines.push(format!("Company: {}", name));
        }
        if let Some(sector) = &self.sector {
            lines.push(format!("Sector: {}", sector));
        }
        if let Some(description) = &self.description {
            lines.push(format!("About: {}", description));
        }
        for (name, value) in self.ratios.iter() {
            lines.push(format!("{}: {}", name, value));
        }
        if let Some(holding) = &self.promoter_holding {
            lines.push(format!("Promoter holding: {}", holding));
        }

        lines
    }
}

fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))
}

fn element_text(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

fn first_text(html_document: &Html, css_candidates: &[&str]) -> anyhow::Result<Option<String>> {
    for css in css_candidates {
        let found = html_document
            .select(&selector(css)?)
            .map(element_text)
            .find(|text| !text.is_empty());
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Scrapes a company profile page. Every field is optional, but a page
/// carrying neither a name nor a description is not a profile.
pub fn parse_profile_page(html_content: &str) -> anyhow::Result<CompanyProfile> {
    let html_document = Html::parse_document(html_content);

    let name = first_text(&html_document, &["h1"])?;
    let description = first_text(&html_document, &[".company-profile .about p", ".about p"])?;
    let sector = first_text(
        &html_document,
        &["#peers a[title=\"Sector\"]", "a[title=\"Broad Sector\"]"],
    )?;

    let name_selector = selector(".name")?;
    let value_selector = selector(".value")?;
    let ratios = html_document
        .select(&selector("#top-ratios li")?)
        .filter_map(|li| {
            let name = li.select(&name_selector).next().map(element_text)?;
            let value = li.select(&value_selector).next().map(element_text)?;
            match name.is_empty() {
                true => None,
                false => Some((name, value)),
            }
        })
        .collect();

    let cell_selector = selector("td")?;
    let promoter_holding = html_document
        .select(&selector("#shareholding table tr")?)
        .find_map(|row| {
            let cells: Vec<String> = row.select(&cell_selector).map(element_text).collect();
            match cells.as_slice() {
                [first, .., last] if first.starts_with("Promoters") && !last.is_empty() => {
                    Some(last.clone())
                }
                _ => None,
            }
        });

    if name.is_none() && description.is_none() {
        bail!("Page has no company name or description");
    }

    Ok(CompanyProfile {
        name,
        description,
        sector,
        ratios,
        promoter_holding,
    })
}

pub fn watchlist_notes(query: &str, watchlist: &[WatchlistEntry]) -> Vec<String> {
    let query = query.to_lowercase();

    watchlist
        .iter()
        .filter(|entry| {
            let pattern = entry.pattern.trim().to_lowercase();
            !pattern.is_empty() && query.contains(&pattern)
        })
        .map(|entry| entry.note.clone())
        .collect()
}
