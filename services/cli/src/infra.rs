use bademeister::auction::{AuctionCalendar, AuctionClient, AuctionSession, HttpAuctionTransport};
use bademeister::config::AppConfig;
use bademeister::error::AppError;
use bademeister::portraits::{PortraitCache, PortraitResolver, WikipediaSummaryClient};
use bademeister::store::{JsonFileStore, KeyValueStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) portraits: PortraitResolver,
    pub(crate) calendar: AuctionCalendar,
}

/// Everything a command needs, wired from configuration.
pub(crate) struct Services {
    pub(crate) session: AuctionSession,
    pub(crate) portraits: PortraitResolver,
    pub(crate) calendar: AuctionCalendar,
    pub(crate) poll_interval: Duration,
}

impl Services {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.store.path)?);
        debug!(path = %config.store.path.display(), "using persistent store");

        let transport =
            HttpAuctionTransport::new(&config.auction.api_url, config.auction.timeout)?;
        let session = AuctionSession::new(
            AuctionClient::new(Arc::new(transport)),
            store.clone(),
            &config.store.key_prefix,
            &config.auction.default_password,
        );

        Ok(Self {
            session,
            portraits: portrait_resolver(config, store)?,
            calendar: config.calendar,
            poll_interval: config.auction.poll_interval,
        })
    }
}

pub(crate) fn portrait_resolver(
    config: &AppConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<PortraitResolver, AppError> {
    let source = WikipediaSummaryClient::new(&config.portraits.host, config.portraits.timeout)?;
    let cache = PortraitCache::new(store, &config.store.key_prefix);
    Ok(PortraitResolver::new(Arc::new(source), cache))
}
