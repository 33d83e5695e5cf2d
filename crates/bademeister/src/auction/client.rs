use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::domain::{AuctionState, NewPlayer};
use super::request::AuctionOperation;
use super::transport::AuctionTransport;

/// Failure talking to the auction service.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("auction service unreachable: {0}")]
    Transport(String),
    #[error("auction service answered with invalid JSON (status {status}): {raw}")]
    InvalidJson { status: u16, raw: String },
    #[error("{operation} rejected: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },
    #[error("auction state could not be read: {0}")]
    InvalidState(String),
}

/// Typed calls on top of a transport. Success is decided by the envelope's
/// `ok` flag alone, never by the HTTP status: login needs a literal `true`,
/// every other operation accepts any truthy value.
#[derive(Clone)]
pub struct AuctionClient {
    transport: Arc<dyn AuctionTransport>,
}

impl AuctionClient {
    pub fn new(transport: Arc<dyn AuctionTransport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, password: &str) -> Result<(), AuctionError> {
        self.call(AuctionOperation::Login, password).await.map(drop)
    }

    pub async fn state(&self, password: &str) -> Result<AuctionState, AuctionError> {
        let body = self.call(AuctionOperation::GetState, password).await?;
        serde_json::from_value(body).map_err(|err| AuctionError::InvalidState(err.to_string()))
    }

    pub async fn add_player(
        &self,
        password: &str,
        player: NewPlayer,
        owner: &str,
    ) -> Result<(), AuctionError> {
        let operation = AuctionOperation::AddPlayer {
            player,
            owner: owner.to_string(),
        };
        self.call(operation, password).await.map(drop)
    }

    pub async fn place_bid(
        &self,
        password: &str,
        player_id: &str,
        bid_value: &str,
        bidder_name: &str,
    ) -> Result<(), AuctionError> {
        let operation = AuctionOperation::PlaceBid {
            player_id: player_id.to_string(),
            bid_value: bid_value.to_string(),
            bidder_name: bidder_name.to_string(),
        };
        self.call(operation, password).await.map(drop)
    }

    pub async fn withdraw_bid(&self, password: &str, bid_id: &str) -> Result<(), AuctionError> {
        let operation = AuctionOperation::WithdrawBid {
            bid_id: bid_id.to_string(),
        };
        self.call(operation, password).await.map(drop)
    }

    pub async fn set_keeper(
        &self,
        password: &str,
        player_id: &str,
        keeper: &str,
    ) -> Result<(), AuctionError> {
        let operation = AuctionOperation::SetKeeper {
            player_id: player_id.to_string(),
            keeper: keeper.to_string(),
        };
        self.call(operation, password).await.map(drop)
    }

    pub async fn reset(&self, password: &str) -> Result<(), AuctionError> {
        self.call(AuctionOperation::ResetNow, password).await.map(drop)
    }

    async fn call(&self, operation: AuctionOperation, password: &str) -> Result<Value, AuctionError> {
        let strict = matches!(operation, AuctionOperation::Login);
        let request = operation.into_request(password);
        let raw = self.transport.send(&request).await?;
        debug!(path = request.path, status = raw.status, body = %raw.body, "auction service replied");

        let body: Value = serde_json::from_str(&raw.body).map_err(|_| AuctionError::InvalidJson {
            status: raw.status,
            raw: raw.body.clone(),
        })?;

        let accepted = match body.get("ok") {
            Some(Value::Bool(true)) => true,
            Some(flag) if !strict => is_truthy(flag),
            _ => false,
        };
        if accepted {
            return Ok(body);
        }

        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("no error message")
            .to_string();
        Err(AuctionError::Rejected {
            operation: request.path,
            message,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl std::fmt::Debug for AuctionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuctionClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_envelope_rules() {
        for flag in [json!(true), json!(1), json!("yes"), json!([]), json!({})] {
            assert!(is_truthy(&flag), "{flag} should count as ok");
        }
        for flag in [json!(false), json!(0), json!(""), json!(null)] {
            assert!(!is_truthy(&flag), "{flag} should not count as ok");
        }
    }
}
