use itertools::Itertools;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Upper bound on headlines kept per regulator source.
pub const MAX_HEADLINES: usize = 10;

/// Display colour of a dashboard box.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Warning,
    Error,
    Success,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Info => "box-info",
            Tone::Warning => "box-warning",
            Tone::Error => "box-error",
            Tone::Success => "box-success",
        }
    }
}

/// Filtered headlines of one regulator, ready for display.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HeadlineSection {
    pub source: String,
    pub title: String,
    pub tone: Tone,
    pub headlines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        KeywordFilter { keywords }
    }

    /// An empty filter matches nothing.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// Text of every `<li>` in document order, whitespace collapsed.
pub fn extract_list_items(html_content: &str) -> Vec<String> {
    let li_selector = match Selector::parse("li") {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to build li selector: {:?}", e);
            return vec![];
        }
    };
    let html_document = Html::parse_document(html_content);

    html_document
        .select(&li_selector)
        .map(|li| li.text().flat_map(str::split_whitespace).join(" "))
        .filter(|text| !text.is_empty())
        .collect()
}

pub fn filter_headlines(items: Vec<String>, filter: &KeywordFilter) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| filter.matches(item))
        .take(MAX_HEADLINES)
        .collect()
}
