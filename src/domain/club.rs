use serde::{Deserialize, Serialize};

/// Club whose squad page is scraped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub name: String,
    #[serde(rename = "scrapeSourceUrl")]
    pub scrape_source_url: Option<String>,
}

impl Club {
    /// Source URL, ignoring blank values
    pub fn source_url(&self) -> Option<&str> {
        self.scrape_source_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
