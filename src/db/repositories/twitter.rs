use crate::entities::{prelude::*, twitter_country_trends, twitter_trends};
use crate::models::TwitterTrend;
use crate::services::refresh::{Aggregate, TrendStore};
use crate::services::trend_kinds::{TwitterKey, TwitterKind};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// Microblog trend aggregates, one per country.
pub struct TwitterTrendRepository {
    conn: DatabaseConnection,
}

impl TwitterTrendRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_trend(m: twitter_trends::Model) -> TwitterTrend {
        TwitterTrend {
            name: m.name,
            url: m.url,
            tweet_volume: m.tweet_volume,
        }
    }

    async fn find_aggregate<C: ConnectionTrait>(
        conn: &C,
        country_id: i32,
    ) -> Result<Option<twitter_country_trends::Model>, DbErr> {
        TwitterCountryTrends::find()
            .filter(twitter_country_trends::Column::CountryId.eq(country_id))
            .one(conn)
            .await
    }

    async fn delete_for_country<C: ConnectionTrait>(
        conn: &C,
        country_id: i32,
    ) -> Result<bool, DbErr> {
        let Some(aggregate) = Self::find_aggregate(conn, country_id).await? else {
            return Ok(false);
        };

        TwitterTrends::delete_many()
            .filter(twitter_trends::Column::CountryTrendId.eq(aggregate.id))
            .exec(conn)
            .await?;
        TwitterCountryTrends::delete_by_id(aggregate.id)
            .exec(conn)
            .await?;

        Ok(true)
    }

    pub async fn insert_aggregate<C: ConnectionTrait>(
        conn: &C,
        country_id: i32,
        trends_number: u32,
        inserted_at: DateTime<Utc>,
    ) -> Result<i32, DbErr> {
        let model = twitter_country_trends::ActiveModel {
            country_id: Set(country_id),
            trends_number: Set(i32::try_from(trends_number).unwrap_or(i32::MAX)),
            inserted_at: Set(inserted_at),
            ..Default::default()
        };

        let res = TwitterCountryTrends::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_children<C: ConnectionTrait>(
        conn: &C,
        aggregate_id: i32,
        trends: &[TwitterTrend],
    ) -> Result<(), DbErr> {
        if trends.is_empty() {
            return Ok(());
        }

        let models = trends.iter().map(|t| twitter_trends::ActiveModel {
            country_trend_id: Set(aggregate_id),
            name: Set(t.name.clone()),
            url: Set(t.url.clone()),
            tweet_volume: Set(t.tweet_volume),
            ..Default::default()
        });

        TwitterTrends::insert_many(models)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrendStore<TwitterKind> for TwitterTrendRepository {
    async fn get_aggregate(&self, key: &TwitterKey) -> Result<Option<Aggregate<u32>>, DbErr> {
        let row = Self::find_aggregate(&self.conn, key.country_id).await?;

        Ok(row.map(|m| Aggregate {
            id: m.id,
            inserted_at: m.inserted_at,
            params: u32::try_from(m.trends_number).unwrap_or_default(),
        }))
    }

    async fn delete_aggregate(&self, key: &TwitterKey) -> Result<bool, DbErr> {
        let txn = self.conn.begin().await?;
        let deleted = Self::delete_for_country(&txn, key.country_id).await?;
        txn.commit().await?;
        Ok(deleted)
    }

    async fn replace_aggregate(
        &self,
        key: &TwitterKey,
        trends_number: &u32,
        inserted_at: DateTime<Utc>,
        items: &[TwitterTrend],
    ) -> Result<i32, DbErr> {
        let txn = self.conn.begin().await?;

        Self::delete_for_country(&txn, key.country_id).await?;
        let id = Self::insert_aggregate(&txn, key.country_id, *trends_number, inserted_at).await?;
        Self::insert_children(&txn, id, items).await?;

        txn.commit().await?;
        Ok(id)
    }

    async fn list_children(
        &self,
        key: &TwitterKey,
        limit: Option<u64>,
    ) -> Result<Vec<TwitterTrend>, DbErr> {
        let rows = TwitterTrends::find()
            .join(
                JoinType::InnerJoin,
                twitter_trends::Relation::TwitterCountryTrends.def(),
            )
            .filter(twitter_country_trends::Column::CountryId.eq(key.country_id))
            .order_by_asc(twitter_trends::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_trend).collect())
    }
}
