pub mod staleness;
pub use staleness::{Freshness, StaleReason, StalenessPolicy};

pub mod refresh;
pub use refresh::{Aggregate, KeyLocks, RefreshCoordinator, TrendKind, TrendProvider, TrendStore};

pub mod trend_kinds;

pub mod providers;
pub use providers::Providers;

pub mod countries;
pub use countries::CountryService;

pub mod trend_service;
pub mod trend_service_impl;
pub use trend_service::{TrendError, TrendService, WordQuery};
pub use trend_service_impl::SeaOrmTrendService;
