use serde::{Deserialize, Serialize};

/// One organic result as returned by the search provider. Any field may be absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResultItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SearchResultItem {
    pub fn new(title: &str, link: &str, snippet: &str) -> SearchResultItem {
        SearchResultItem {
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            snippet: Some(snippet.to_string()),
        }
    }

    /// Render as a numbered block: `"{rank}. {title}\n   URL: {link}\n   {snippet}\n"`.
    pub fn format(&self, rank: usize) -> String {
        format!(
            "{}. {}\n   URL: {}\n   {}\n",
            rank,
            self.title.as_deref().unwrap_or("No title"),
            self.link.as_deref().unwrap_or("No link"),
            self.snippet.as_deref().unwrap_or("No snippet available"),
        )
    }
}

/// A text blob handed to the summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_content: String,
}

impl Document {
    pub fn new(page_content: String) -> Document {
        Document { page_content }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub rank: i64,
    pub title: String,
    pub url: String,
    pub summary: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub results: Vec<SummaryEntry>,
}
