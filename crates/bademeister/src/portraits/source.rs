use async_trait::async_trait;
use serde::Deserialize;

use super::candidates::Locale;

/// Fields of a page summary the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageSummary {
    #[serde(rename = "type", default)]
    pub page_type: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl PageSummary {
    pub fn is_disambiguation(&self) -> bool {
        self.page_type.as_deref() == Some("disambiguation")
    }

    /// `thumbnail.source`, else `thumbnail.url`, skipping empty strings.
    pub fn image_url(&self) -> Option<&str> {
        let thumbnail = self.thumbnail.as_ref()?;
        [thumbnail.source.as_deref(), thumbnail.url.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
    }
}

/// Why a single candidate produced no summary.
#[derive(Debug, thiserror::Error)]
pub enum PortraitSourceError {
    #[error("portrait source answered with status {0}")]
    Status(u16),
    #[error("portrait source unreachable: {0}")]
    Transport(String),
    #[error("portrait source returned an unreadable summary: {0}")]
    Decode(String),
}

/// Port to the encyclopedia summary API.
#[async_trait]
pub trait PortraitSource: Send + Sync {
    async fn summary(&self, locale: Locale, title: &str)
        -> Result<PageSummary, PortraitSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> PageSummary {
        serde_json::from_str(raw).expect("summary parses")
    }

    #[test]
    fn source_wins_over_url() {
        let summary = parse(r#"{"thumbnail":{"source":"https://a/1.jpg","url":"https://a/2.jpg"}}"#);
        assert_eq!(summary.image_url(), Some("https://a/1.jpg"));
    }

    #[test]
    fn empty_source_falls_back_to_url() {
        let summary = parse(r#"{"type":"standard","thumbnail":{"source":"","url":"https://a/2.jpg"}}"#);
        assert_eq!(summary.image_url(), Some("https://a/2.jpg"));
        assert!(!summary.is_disambiguation());
    }

    #[test]
    fn missing_thumbnail_has_no_image() {
        let summary = parse(r#"{"type":"disambiguation","title":"Kai"}"#);
        assert_eq!(summary.image_url(), None);
        assert!(summary.is_disambiguation());
    }
}
