use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A player offered for auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "flexible_string")]
    pub id: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub player_name: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub team: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub market_value: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub owner: String,
}

/// A single bid as recorded by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(deserialize_with = "flexible_string")]
    pub id: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub player_id: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub bid_value: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub bidder_name: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestBid {
    #[serde(default, deserialize_with = "flexible_string")]
    pub bid_value: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub bidder_name: String,
}

/// Snapshot returned by `getState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bids: Vec<Bid>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highest: BTreeMap<String, HighestBid>,
}

impl AuctionState {
    pub fn highest_for(&self, player_id: &str) -> Option<&HighestBid> {
        self.highest.get(player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }
}

/// Input for offering a new player; the owner is filled in by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlayer {
    pub player_name: String,
    pub team: Option<String>,
    pub market_value: String,
}

/// Spreadsheet cells arrive as strings or numbers; both are carried as text.
fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(other) => other.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
