//! Dependency Injection Container
//!
//! Wires adapters into use cases once at startup. The set of adapters is
//! described by an [`AdapterSet`] so the HTTP layer and jobs stay generic over
//! a single type parameter.

use std::sync::Arc;

use crate::application::ports::{
    AlertRepository, MailerPort, MarketDataPort, SessionPort, UserDirectoryPort,
    WatchlistRepository,
};
use crate::application::use_cases::{
    AlertDeliveryUseCase, AlertService, BatchSettings, MarketDataAggregator, NewsDigestUseCase,
    NewsSelector, NewsSettings, SearchSettings, SnapshotReader, StockSearch, WatchlistService,
};
use crate::infrastructure::finnhub::FinnhubMarketDataAdapter;
use crate::infrastructure::mailer::LogMailer;
use crate::infrastructure::persistence::{
    InMemoryAlertRepository, InMemoryUserDirectory, InMemoryWatchlistRepository,
};
use crate::infrastructure::session::InMemorySessionStore;

/// The concrete adapter behind each port.
pub trait AdapterSet: Send + Sync + 'static {
    /// Market data provider.
    type MarketData: MarketDataPort + 'static;
    /// Watchlist storage.
    type Watchlist: WatchlistRepository + 'static;
    /// Alert storage.
    type Alerts: AlertRepository + 'static;
    /// User directory.
    type Users: UserDirectoryPort + 'static;
    /// Session lookup.
    type Sessions: SessionPort + 'static;
    /// Email transport.
    type Mailer: MailerPort + 'static;
}

/// Adapters used by the shipped binary.
#[derive(Debug, Clone, Copy)]
pub struct DefaultAdapters;

impl AdapterSet for DefaultAdapters {
    type MarketData = FinnhubMarketDataAdapter;
    type Watchlist = InMemoryWatchlistRepository;
    type Alerts = InMemoryAlertRepository;
    type Users = InMemoryUserDirectory;
    type Sessions = InMemorySessionStore;
    type Mailer = LogMailer;
}

/// Adapter instances.
pub struct Adapters<P: AdapterSet> {
    /// Market data provider.
    pub market_data: Arc<P::MarketData>,
    /// Watchlist storage.
    pub watchlist: Arc<P::Watchlist>,
    /// Alert storage.
    pub alerts: Arc<P::Alerts>,
    /// User directory.
    pub users: Arc<P::Users>,
    /// Session lookup.
    pub sessions: Arc<P::Sessions>,
    /// Email transport.
    pub mailer: Arc<P::Mailer>,
}

/// Tunables for the use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Watchlist aggregation batching.
    pub watchlist_batch: BatchSettings,
    /// Alert snapshot batching.
    pub snapshot_batch: BatchSettings,
    /// News selection limits.
    pub news: NewsSettings,
    /// Search limits.
    pub search: SearchSettings,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            watchlist_batch: BatchSettings::WATCHLIST,
            snapshot_batch: BatchSettings::SNAPSHOTS,
            news: NewsSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

/// Wired use cases.
pub struct Container<P: AdapterSet> {
    /// Session lookup.
    pub sessions: Arc<P::Sessions>,
    /// Watchlist aggregation.
    pub aggregator: Arc<MarketDataAggregator<P::MarketData>>,
    /// Quote snapshots.
    pub snapshots: Arc<SnapshotReader<P::MarketData>>,
    /// News selection.
    pub news: Arc<NewsSelector<P::MarketData>>,
    /// Symbol search.
    pub search: Arc<StockSearch<P::MarketData, P::Watchlist>>,
    /// Watchlist actions.
    pub watchlist: Arc<WatchlistService<P::Watchlist>>,
    /// Alert actions.
    pub alerts: Arc<AlertService<P::Alerts>>,
    /// Hourly alert emails.
    pub alert_delivery: Arc<AlertDeliveryUseCase<P::Alerts, P::Users, P::MarketData, P::Mailer>>,
    /// Daily news emails.
    pub news_digest: Arc<NewsDigestUseCase<P::Users, P::Watchlist, P::MarketData, P::Mailer>>,
}

impl<P: AdapterSet> Clone for Container<P> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            aggregator: Arc::clone(&self.aggregator),
            snapshots: Arc::clone(&self.snapshots),
            news: Arc::clone(&self.news),
            search: Arc::clone(&self.search),
            watchlist: Arc::clone(&self.watchlist),
            alerts: Arc::clone(&self.alerts),
            alert_delivery: Arc::clone(&self.alert_delivery),
            news_digest: Arc::clone(&self.news_digest),
        }
    }
}

impl<P: AdapterSet> Container<P> {
    /// Wire all use cases.
    #[must_use]
    pub fn new(adapters: Adapters<P>, settings: ServiceSettings) -> Self {
        let snapshots = Arc::new(SnapshotReader::new(
            Arc::clone(&adapters.market_data),
            settings.snapshot_batch,
        ));
        let news = Arc::new(NewsSelector::new(
            Arc::clone(&adapters.market_data),
            settings.news,
        ));

        Self {
            aggregator: Arc::new(MarketDataAggregator::new(
                Arc::clone(&adapters.market_data),
                settings.watchlist_batch,
            )),
            search: Arc::new(StockSearch::new(
                Arc::clone(&adapters.market_data),
                Arc::clone(&adapters.watchlist),
                settings.search,
            )),
            watchlist: Arc::new(WatchlistService::new(Arc::clone(&adapters.watchlist))),
            alerts: Arc::new(AlertService::new(Arc::clone(&adapters.alerts))),
            alert_delivery: Arc::new(AlertDeliveryUseCase::new(
                Arc::clone(&adapters.alerts),
                Arc::clone(&adapters.users),
                Arc::clone(&snapshots),
                Arc::clone(&adapters.mailer),
            )),
            news_digest: Arc::new(NewsDigestUseCase::new(
                Arc::clone(&adapters.users),
                Arc::clone(&adapters.watchlist),
                Arc::clone(&news),
                Arc::clone(&adapters.mailer),
                settings.news.max_articles,
            )),
            sessions: adapters.sessions,
            snapshots,
            news,
        }
    }
}
