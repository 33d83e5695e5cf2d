use std::time::Duration;

use async_trait::async_trait;

use super::client::AuctionError;
use super::request::{AuctionRequest, RequestMethod};

/// Status and body exactly as the service sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Port to the remote auction endpoint.
#[async_trait]
pub trait AuctionTransport: Send + Sync {
    async fn send(&self, request: &AuctionRequest) -> Result<RawResponse, AuctionError>;
}

/// reqwest adapter talking to the spreadsheet script's web-app URL.
#[derive(Debug, Clone)]
pub struct HttpAuctionTransport {
    http: reqwest::Client,
    api_url: String,
}

impl HttpAuctionTransport {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, AuctionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AuctionError::Transport(err.to_string()))?;
        Ok(Self::with_client(http, api_url))
    }

    pub fn with_client(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl AuctionTransport for HttpAuctionTransport {
    async fn send(&self, request: &AuctionRequest) -> Result<RawResponse, AuctionError> {
        let path = [("path", request.path)];
        let builder = match request.method {
            RequestMethod::Get => self
                .http
                .get(&self.api_url)
                .query(&path)
                .query(&request.fields),
            RequestMethod::PostForm => self
                .http
                .post(&self.api_url)
                .query(&path)
                .form(&request.fields),
        };

        let response = builder
            .send()
            .await
            .map_err(|err| AuctionError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| AuctionError::Transport(err.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
