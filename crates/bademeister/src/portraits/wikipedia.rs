use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};

use super::candidates::Locale;
use super::source::{PageSummary, PortraitSource, PortraitSourceError};

const WIKIMEDIA_USER_AGENT: &str = concat!(
    "bademeister/",
    env!("CARGO_PKG_VERSION"),
    " (private football auction; portrait lookup)"
);

/// REST summary client for `https://{locale}.{host}/api/rest_v1/page/summary/{title}`.
#[derive(Debug, Clone)]
pub struct WikipediaSummaryClient {
    http: reqwest::Client,
    /// Site root with a `{locale}` placeholder, e.g. `https://{locale}.wikipedia.org`.
    base_url: String,
}

impl WikipediaSummaryClient {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, PortraitSourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|err| PortraitSourceError::Transport(err.to_string()))?;
        Ok(Self::with_client(http, host))
    }

    pub fn with_client(http: reqwest::Client, host: impl Into<String>) -> Self {
        let base_url = format!("https://{{locale}}.{}", host.into());
        Self::with_base_url(http, base_url)
    }

    /// Uses an explicit site root; `{locale}` is replaced by the language code.
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn summary_url(&self, locale: Locale, title: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url.replace("{locale}", locale.code()),
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl PortraitSource for WikipediaSummaryClient {
    async fn summary(
        &self,
        locale: Locale,
        title: &str,
    ) -> Result<PageSummary, PortraitSourceError> {
        let response = self
            .http
            .get(self.summary_url(locale, title))
            .header(USER_AGENT, WIKIMEDIA_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| PortraitSourceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortraitSourceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| PortraitSourceError::Transport(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| PortraitSourceError::Decode(err.to_string()))
    }
}
