use super::domain::NewPlayer;

/// Operations exposed by the remote auction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionOperation {
    Login,
    GetState,
    AddPlayer { player: NewPlayer, owner: String },
    PlaceBid {
        player_id: String,
        bid_value: String,
        bidder_name: String,
    },
    WithdrawBid { bid_id: String },
    SetKeeper { player_id: String, keeper: String },
    ResetNow,
}

impl AuctionOperation {
    /// Value of the `path` query parameter selecting the operation.
    pub fn path(&self) -> &'static str {
        match self {
            AuctionOperation::Login => "login",
            AuctionOperation::GetState => "getState",
            AuctionOperation::AddPlayer { .. } => "addPlayer",
            AuctionOperation::PlaceBid { .. } => "placeBid",
            AuctionOperation::WithdrawBid { .. } => "withdrawBid",
            AuctionOperation::SetKeeper { .. } => "setKeeper",
            AuctionOperation::ResetNow => "resetNow",
        }
    }

    /// Login goes out as a query string; everything else is a form post.
    pub fn into_request(self, password: &str) -> AuctionRequest {
        let path = self.path();
        let mut fields = vec![("password", password.to_string())];

        let method = match self {
            AuctionOperation::Login => RequestMethod::Get,
            AuctionOperation::GetState | AuctionOperation::ResetNow => RequestMethod::PostForm,
            AuctionOperation::AddPlayer { player, owner } => {
                fields.push(("playerName", player.player_name));
                fields.push(("team", player.team.unwrap_or_default()));
                fields.push(("marketValue", player.market_value));
                fields.push(("owner", owner));
                RequestMethod::PostForm
            }
            AuctionOperation::PlaceBid {
                player_id,
                bid_value,
                bidder_name,
            } => {
                fields.push(("playerId", player_id));
                fields.push(("bidValue", bid_value));
                fields.push(("bidderName", bidder_name));
                RequestMethod::PostForm
            }
            AuctionOperation::WithdrawBid { bid_id } => {
                fields.push(("bidId", bid_id));
                RequestMethod::PostForm
            }
            AuctionOperation::SetKeeper { player_id, keeper } => {
                fields.push(("playerId", player_id));
                fields.push(("keeper", keeper));
                RequestMethod::PostForm
            }
        };

        AuctionRequest {
            path,
            method,
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    PostForm,
}

/// Wire-level request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionRequest {
    pub path: &'static str,
    pub method: RequestMethod,
    pub fields: Vec<(&'static str, String)>,
}
