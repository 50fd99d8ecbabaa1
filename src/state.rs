use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::countries::CountriesClient;
use crate::clients::google_trends::GoogleTrendsClient;
use crate::clients::twitter::TwitterClient;
use crate::clients::youtube::YouTubeClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CountryService, Providers, RefreshCoordinator, SeaOrmTrendService, TrendService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused by every provider client for connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("TopTrends/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub twitter: Arc<TwitterClient>,

    pub google: Arc<GoogleTrendsClient>,

    pub youtube: Arc<YouTubeClient>,

    pub coordinator: Arc<RefreshCoordinator>,

    pub country_service: Arc<CountryService>,

    pub trend_service: Arc<dyn TrendService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_providers(config, None).await
    }

    /// Builds the state, fetching trends through `providers` when given and
    /// through the configured HTTP clients otherwise. The country catalogue is
    /// always loaded through the HTTP clients.
    pub async fn with_providers(
        config: Config,
        providers: Option<Providers>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;
        store.initialize_trend_types().await?;

        let http_client = build_shared_http_client(config.general.request_timeout_seconds)?;

        let twitter = Arc::new(TwitterClient::with_shared_client(
            http_client.clone(),
            &config.twitter,
        ));
        let google = Arc::new(GoogleTrendsClient::with_shared_client(
            http_client.clone(),
            &config.google,
        ));
        let youtube = Arc::new(YouTubeClient::with_shared_client(
            http_client.clone(),
            &config.youtube,
        ));
        let countries_client = Arc::new(CountriesClient::with_shared_client(
            http_client,
            &config.countries,
        ));

        if !twitter.is_configured() {
            tracing::warn!("No microblog bearer token configured; microblog trends stay empty");
        }
        if !youtube.is_configured() {
            tracing::warn!("No video API key configured; video trends stay empty");
        }

        let providers = providers.unwrap_or_else(|| {
            Providers::from_clients(twitter.clone(), google.clone(), youtube.clone())
        });

        let coordinator = Arc::new(RefreshCoordinator::from_config(&config.cache));

        let country_service = Arc::new(CountryService::new(
            store.clone(),
            countries_client,
            twitter.clone(),
            google.clone(),
        ));

        let trend_service = Arc::new(SeaOrmTrendService::new(
            store.clone(),
            coordinator.clone(),
            providers,
            country_service.clone(),
        )) as Arc<dyn TrendService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            twitter,
            google,
            youtube,
            coordinator,
            country_service,
            trend_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
