use crate::constants;
use crate::models::{Country, NewCountry, YouTubeTrendType};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::country::CountryRepository;
pub use repositories::google::{GoogleTrendRepository, GoogleWordTrendRepository};
pub use repositories::twitter::TwitterTrendRepository;
pub use repositories::youtube::YouTubeTrendRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn countries(&self) -> CountryRepository {
        CountryRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn twitter_trends(&self) -> TwitterTrendRepository {
        TwitterTrendRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn google_trends(&self) -> GoogleTrendRepository {
        GoogleTrendRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn google_word_trends(&self) -> GoogleWordTrendRepository {
        GoogleWordTrendRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn youtube_trends(&self) -> YouTubeTrendRepository {
        YouTubeTrendRepository::new(self.conn.clone())
    }

    pub async fn initialize_trend_types(&self) -> Result<()> {
        self.countries()
            .initialize_trend_types(constants::youtube::TREND_TYPES)
            .await?;
        Ok(())
    }

    pub async fn list_countries(&self) -> Result<Vec<Country>, DbErr> {
        self.countries().list().await
    }

    pub async fn count_countries(&self) -> Result<u64, DbErr> {
        self.countries().count().await
    }

    pub async fn find_country(&self, name: &str) -> Result<Option<Country>, DbErr> {
        self.countries().find_by_name(name).await
    }

    pub async fn insert_countries(&self, countries: &[NewCountry]) -> Result<u64, DbErr> {
        self.countries().insert_many(countries).await
    }

    pub async fn delete_country(&self, id: i32) -> Result<bool, DbErr> {
        self.countries().delete(id).await
    }

    pub async fn list_trend_types(&self) -> Result<Vec<YouTubeTrendType>, DbErr> {
        self.countries().list_trend_types().await
    }

    pub async fn find_trend_type(&self, name: &str) -> Result<Option<YouTubeTrendType>, DbErr> {
        self.countries().find_trend_type(name).await
    }
}
