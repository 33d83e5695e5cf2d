use std::sync::Arc;

use tracing::{info, warn};

use crate::store::{KeyValueStore, StoreError};

use super::client::{AuctionClient, AuctionError};
use super::domain::{AuctionState, NewPlayer};

/// Error raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("save your display name before bidding")]
    MissingName,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Auction(#[from] AuctionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The logged-in user's view of the auction: credentials and display name
/// live in the key-value store, every call goes through the client.
#[derive(Clone)]
pub struct AuctionSession {
    client: AuctionClient,
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    default_password: String,
}

impl AuctionSession {
    pub fn new(
        client: AuctionClient,
        store: Arc<dyn KeyValueStore>,
        prefix: impl Into<String>,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            prefix: prefix.into(),
            default_password: default_password.into(),
        }
    }

    fn password_key(&self) -> String {
        format!("{}_pw", self.prefix)
    }

    fn name_key(&self) -> String {
        format!("{}_name", self.prefix)
    }

    /// The remembered password, or the configured default.
    pub fn password(&self) -> String {
        match self.store.get(&self.password_key()) {
            Ok(Some(password)) if !password.is_empty() => password,
            Ok(_) => self.default_password.clone(),
            Err(err) => {
                warn!(error = %err, "could not read stored password; using default");
                self.default_password.clone()
            }
        }
    }

    pub async fn login(&self) -> Result<(), SessionError> {
        self.login_with(&self.password()).await
    }

    /// Logs in with `password` and remembers it once the service accepts it.
    pub async fn login_with(&self, password: &str) -> Result<(), SessionError> {
        self.client.login(password).await?;
        self.store.set(&self.password_key(), password)?;
        info!("logged in to auction service");
        Ok(())
    }

    pub fn display_name(&self) -> Result<Option<String>, SessionError> {
        let name = self.store.get(&self.name_key())?;
        Ok(name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()))
    }

    pub fn save_name(&self, name: &str) -> Result<String, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName);
        }
        self.store.set(&self.name_key(), name)?;
        Ok(name.to_string())
    }

    pub async fn refresh(&self) -> Result<AuctionState, SessionError> {
        Ok(self.client.state(&self.password()).await?)
    }

    /// Offers a player; the saved display name (or nobody) becomes the owner.
    pub async fn add_player(&self, player: NewPlayer) -> Result<AuctionState, SessionError> {
        let player = NewPlayer {
            player_name: required(&player.player_name, "player name")?,
            team: player
                .team
                .map(|team| team.trim().to_string())
                .filter(|team| !team.is_empty()),
            market_value: required(&player.market_value, "market value")?,
        };
        let owner = self.display_name()?.unwrap_or_default();

        self.client
            .add_player(&self.password(), player, &owner)
            .await?;
        self.refresh().await
    }

    pub async fn place_bid(
        &self,
        player_id: &str,
        bid_value: &str,
    ) -> Result<AuctionState, SessionError> {
        let bidder = self.display_name()?.ok_or(SessionError::MissingName)?;
        let player_id = required(player_id, "player id")?;
        let bid_value = required(bid_value, "bid value")?;

        self.client
            .place_bid(&self.password(), &player_id, &bid_value, &bidder)
            .await?;
        self.refresh().await
    }

    pub async fn withdraw_bid(&self, bid_id: &str) -> Result<AuctionState, SessionError> {
        let bid_id = required(bid_id, "bid id")?;
        self.client.withdraw_bid(&self.password(), &bid_id).await?;
        self.refresh().await
    }

    pub async fn set_keeper(
        &self,
        player_id: &str,
        keeper: &str,
    ) -> Result<AuctionState, SessionError> {
        let player_id = required(player_id, "player id")?;
        let keeper = required(keeper, "keeper")?;
        self.client
            .set_keeper(&self.password(), &player_id, &keeper)
            .await?;
        self.refresh().await
    }

    pub async fn reset(&self) -> Result<AuctionState, SessionError> {
        self.client.reset(&self.password()).await?;
        info!("auction reset");
        self.refresh().await
    }
}

fn required(value: &str, field: &'static str) -> Result<String, SessionError> {
    let value = value.trim();
    if value.is_empty() {
        Err(SessionError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

impl std::fmt::Debug for AuctionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuctionSession")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
