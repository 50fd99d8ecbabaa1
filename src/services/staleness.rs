//! Freshness policy for cached trend aggregates.
//!
//! An aggregate is stale when `inserted_at + offset < now - offset`. With the
//! default offset of one hour this refreshes data older than two hours. The
//! offset is the only knob; switching to a plain one-hour threshold means
//! halving `cache.staleness_offset_minutes`.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::CacheConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// Older than the policy allows.
    Expired,
    /// Stored for different request parameters than the ones asked for.
    ParametersChanged,
}

impl StaleReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ParametersChanged => "parameters_changed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale(StaleReason),
}

impl Freshness {
    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    offset: TimeDelta,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl StalenessPolicy {
    #[must_use]
    pub const fn new(offset: TimeDelta) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            TimeDelta::try_minutes(config.staleness_offset_minutes).unwrap_or(TimeDelta::MAX),
        )
    }

    #[must_use]
    pub const fn offset(&self) -> TimeDelta {
        self.offset
    }

    /// Age after which an aggregate stops being served without a refresh.
    #[must_use]
    pub fn effective_threshold(&self) -> TimeDelta {
        self.offset.checked_mul(2).unwrap_or(TimeDelta::MAX)
    }

    /// Timestamps outside chrono's range count as stale.
    #[must_use]
    pub fn is_stale(&self, inserted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (
            inserted_at.checked_add_signed(self.offset),
            now.checked_sub_signed(self.offset),
        ) {
            (Some(expires), Some(cutoff)) => expires < cutoff,
            _ => true,
        }
    }

    /// Parameter mismatch wins over age: data stored for another request is
    /// never served, however recent.
    #[must_use]
    pub fn evaluate<P: PartialEq>(
        &self,
        inserted_at: DateTime<Utc>,
        stored: &P,
        requested: &P,
        now: DateTime<Utc>,
    ) -> Freshness {
        if stored != requested {
            Freshness::Stale(StaleReason::ParametersChanged)
        } else if self.is_stale(inserted_at, now) {
            Freshness::Stale(StaleReason::Expired)
        } else {
            Freshness::Fresh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> StalenessPolicy {
        StalenessPolicy::new(TimeDelta::hours(1))
    }

    #[test]
    fn recent_aggregate_is_fresh() {
        let now = Utc::now();
        assert!(!policy().is_stale(now - TimeDelta::minutes(30), now));
        assert!(!policy().is_stale(now, now));
    }

    #[test]
    fn offset_is_applied_twice() {
        let now = Utc::now();
        // 90 minutes is past a one-hour threshold but not past the doubled one.
        assert!(!policy().is_stale(now - TimeDelta::minutes(90), now));
        assert!(!policy().is_stale(now - TimeDelta::hours(2), now));
        assert!(policy().is_stale(now - TimeDelta::hours(2) - TimeDelta::seconds(1), now));
        assert!(policy().is_stale(now - TimeDelta::hours(3), now));
        assert_eq!(policy().effective_threshold(), TimeDelta::hours(2));
    }

    #[test]
    fn parameter_mismatch_is_stale_regardless_of_age() {
        let now = Utc::now();
        assert_eq!(
            policy().evaluate(now, &10_u32, &25_u32, now),
            Freshness::Stale(StaleReason::ParametersChanged)
        );
    }

    #[test]
    fn matching_parameters_fall_back_to_age() {
        let now = Utc::now();
        assert!(
            policy()
                .evaluate(now - TimeDelta::minutes(30), &10_u32, &10_u32, now)
                .is_fresh()
        );
        assert_eq!(
            policy().evaluate(now - TimeDelta::hours(3), &10_u32, &10_u32, now),
            Freshness::Stale(StaleReason::Expired)
        );
    }

    #[test]
    fn oversized_offset_does_not_overflow() {
        let now = Utc::now();
        let config = CacheConfig {
            staleness_offset_minutes: 1_000_000_000_000,
            ..CacheConfig::default()
        };
        let policy = StalenessPolicy::from_config(&config);

        assert!(policy.is_stale(now - TimeDelta::minutes(30), now));
        assert_eq!(
            StalenessPolicy::new(TimeDelta::MAX).effective_threshold(),
            TimeDelta::MAX
        );

        let config = CacheConfig {
            staleness_offset_minutes: i64::MAX,
            ..CacheConfig::default()
        };
        assert_eq!(StalenessPolicy::from_config(&config).offset(), TimeDelta::MAX);
    }

    #[test]
    fn policy_follows_cache_config() {
        let config = CacheConfig {
            staleness_offset_minutes: 30,
            ..CacheConfig::default()
        };
        let policy = StalenessPolicy::from_config(&config);
        assert_eq!(policy.offset(), TimeDelta::minutes(30));
        assert_eq!(StalenessPolicy::default().offset(), TimeDelta::hours(1));
    }
}
