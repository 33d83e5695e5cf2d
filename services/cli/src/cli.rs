use crate::commands::{self, AddPlayerArgs, BidArgs, KeeperArgs, StateArgs, WatchArgs};
use crate::infra::Services;
use crate::server;
use bademeister::config::AppConfig;
use bademeister::error::AppError;
use bademeister::telemetry;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bademeister",
    about = "Titanic Bademeister: bid on players, watch the auction, look up portraits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the local portrait/schedule HTTP service (default command)
    Serve(ServeArgs),
    /// Log in to the auction service and remember the password
    Login {
        /// Password to try instead of the remembered/default one
        #[arg(long)]
        password: Option<String>,
    },
    /// Save the display name used for bids and offered players
    Name {
        /// Display name
        name: String,
    },
    /// Show offered players, highest bids, and all bids
    State(StateArgs),
    /// Offer a new player for auction
    AddPlayer(AddPlayerArgs),
    /// Place a bid on a player
    Bid(BidArgs),
    /// Withdraw a bid
    Withdraw {
        /// Bid identifier
        bid_id: String,
        /// Confirm the withdrawal
        #[arg(long)]
        yes: bool,
    },
    /// Mark a player as kept by a member
    Keeper(KeeperArgs),
    /// Reset the whole auction
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Look up the portrait for a player name
    Portrait {
        /// Player name as displayed
        name: String,
    },
    /// Drop the cached portrait (or missing-portrait marker) for a player name
    ForgetPortrait {
        /// Player name as displayed
        name: String,
    },
    /// Show where the weekly bidding round stands
    Schedule,
    /// Poll the auction and print the countdown until interrupted
    Watch(WatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        other => {
            let services = Services::from_config(&config)?;
            dispatch(&services, other).await
        }
    }
}

async fn dispatch(services: &Services, command: Command) -> Result<(), AppError> {
    match command {
        Command::Serve(_) => Ok(()),
        Command::Login { password } => commands::login(services, password).await,
        Command::Name { name } => commands::save_name(services, &name),
        Command::State(args) => commands::show_state(services, args).await,
        Command::AddPlayer(args) => commands::add_player(services, args).await,
        Command::Bid(args) => commands::place_bid(services, args).await,
        Command::Withdraw { bid_id, yes } => commands::withdraw_bid(services, &bid_id, yes).await,
        Command::Keeper(args) => commands::set_keeper(services, args).await,
        Command::Reset { yes } => commands::reset(services, yes).await,
        Command::Portrait { name } => commands::portrait(services, &name).await,
        Command::ForgetPortrait { name } => commands::forget_portrait(services, &name),
        Command::Schedule => {
            commands::schedule(services);
            Ok(())
        }
        Command::Watch(args) => commands::watch(services, args).await,
    }
}
