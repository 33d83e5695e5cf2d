use crate::infra::Services;
use crate::render;
use bademeister::auction::NewPlayer;
use bademeister::error::AppError;
use bademeister::portraits::Avatar;
use chrono::Local;
use clap::Args;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

#[derive(Args, Debug, Default)]
pub(crate) struct StateArgs {
    /// Skip portrait lookups for the player list
    #[arg(long)]
    pub(crate) no_portraits: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AddPlayerArgs {
    /// Player name
    #[arg(long)]
    pub(crate) name: String,
    /// Club the player currently plays for
    #[arg(long)]
    pub(crate) team: Option<String>,
    /// Market value, used as the opening bid
    #[arg(long)]
    pub(crate) market_value: String,
}

#[derive(Args, Debug)]
pub(crate) struct BidArgs {
    /// Player identifier as shown by `state`
    #[arg(long)]
    pub(crate) player: String,
    /// Bid, e.g. 5.000.000 or free text
    #[arg(long)]
    pub(crate) value: String,
}

#[derive(Args, Debug)]
pub(crate) struct KeeperArgs {
    /// Player identifier as shown by `state`
    #[arg(long)]
    pub(crate) player: String,
    /// Member keeping the player
    #[arg(long)]
    pub(crate) keeper: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct WatchArgs {
    /// Seconds between polls (defaults to the configured interval)
    #[arg(long)]
    pub(crate) interval: Option<u64>,
}

pub(crate) async fn login(services: &Services, password: Option<String>) -> Result<(), AppError> {
    match password {
        Some(password) => services.session.login_with(&password).await?,
        None => services.session.login().await?,
    }
    println!("Logged in.");
    Ok(())
}

pub(crate) fn save_name(services: &Services, name: &str) -> Result<(), AppError> {
    let saved = services.session.save_name(name)?;
    println!("Name saved: {saved}");
    Ok(())
}

pub(crate) async fn show_state(services: &Services, args: StateArgs) -> Result<(), AppError> {
    let state = services.session.refresh().await?;

    let mut avatars = Vec::with_capacity(state.players.len());
    for player in &state.players {
        let image_url = if args.no_portraits {
            None
        } else {
            services.portraits.resolve(&player.player_name).await
        };
        avatars.push(Avatar::for_player(&player.player_name, image_url));
    }

    render::auction_state(&state, &avatars);
    Ok(())
}

pub(crate) async fn add_player(services: &Services, args: AddPlayerArgs) -> Result<(), AppError> {
    let state = services
        .session
        .add_player(NewPlayer {
            player_name: args.name,
            team: args.team,
            market_value: args.market_value,
        })
        .await?;
    println!("Player added. {} players on offer.", state.players.len());
    Ok(())
}

pub(crate) async fn place_bid(services: &Services, args: BidArgs) -> Result<(), AppError> {
    let state = services.session.place_bid(&args.player, &args.value).await?;
    match state.highest_for(&args.player) {
        Some(highest) => println!(
            "Bid placed. Highest now: {} by {}",
            highest.bid_value,
            render::or_dash(&highest.bidder_name)
        ),
        None => println!("Bid placed."),
    }
    Ok(())
}

pub(crate) async fn withdraw_bid(
    services: &Services,
    bid_id: &str,
    confirmed: bool,
) -> Result<(), AppError> {
    require_confirmation(confirmed, "withdrawing a bid")?;
    services.session.withdraw_bid(bid_id).await?;
    println!("Bid {bid_id} withdrawn.");
    Ok(())
}

pub(crate) async fn set_keeper(services: &Services, args: KeeperArgs) -> Result<(), AppError> {
    services
        .session
        .set_keeper(&args.player, &args.keeper)
        .await?;
    println!("{} keeps player {}.", args.keeper.trim(), args.player.trim());
    Ok(())
}

pub(crate) async fn reset(services: &Services, confirmed: bool) -> Result<(), AppError> {
    require_confirmation(confirmed, "resetting the whole auction")?;
    services.session.reset().await?;
    println!("Auction reset.");
    Ok(())
}

pub(crate) async fn portrait(services: &Services, name: &str) -> Result<(), AppError> {
    let image_url = services.portraits.resolve(name).await;
    render::avatar(&Avatar::for_player(name, image_url));
    Ok(())
}

pub(crate) fn forget_portrait(services: &Services, name: &str) -> Result<(), AppError> {
    services.portraits.forget(name)?;
    println!("Forgot cached portrait for {}.", name.trim());
    Ok(())
}

pub(crate) fn schedule(services: &Services) {
    render::schedule(&services.calendar.status(Local::now().naive_local()));
}

/// Logs in once, then polls the auction until Ctrl-C.
pub(crate) async fn watch(services: &Services, args: WatchArgs) -> Result<(), AppError> {
    let interval = args
        .interval
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(services.poll_interval);

    services.session.login().await?;
    poll_until(services, interval, tokio::signal::ctrl_c()).await;
    Ok(())
}

/// Refreshes on every tick until `shutdown` completes. The shutdown future
/// lives across iterations so a signal raised during a poll is not missed.
async fn poll_until<F>(services: &Services, interval: Duration, shutdown: F)
where
    F: Future,
{
    info!(interval_secs = interval.as_secs(), "watching auction");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let status = services.calendar.status(Local::now().naive_local());
                match services.session.refresh().await {
                    Ok(state) => render::watch_line(&status, &state),
                    Err(err) => warn!(error = %err, "poll failed; retrying on next tick"),
                }
            }
            _ = &mut shutdown => {
                info!("stopped watching");
                return;
            }
        }
    }
}

fn require_confirmation(confirmed: bool, action: &str) -> Result<(), AppError> {
    if confirmed {
        Ok(())
    } else {
        Err(AppError::Usage(format!(
            "{action} cannot be undone; pass --yes to confirm"
        )))
    }
}
