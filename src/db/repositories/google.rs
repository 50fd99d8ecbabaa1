use crate::entities::{
    google_country_trends, google_trends, google_word_trend_points, google_word_trends,
    prelude::*,
};
use crate::models::{GoogleTrend, InterestPoint, PeriodType};
use crate::services::refresh::{Aggregate, TrendStore};
use crate::services::trend_kinds::{GoogleDailyKey, GoogleDailyKind, GoogleWordKey, GoogleWordKind};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// Daily search trend aggregates, one per country.
pub struct GoogleTrendRepository {
    conn: DatabaseConnection,
}

impl GoogleTrendRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_aggregate<C: ConnectionTrait>(
        conn: &C,
        country_id: i32,
    ) -> Result<Option<google_country_trends::Model>, DbErr> {
        GoogleCountryTrends::find()
            .filter(google_country_trends::Column::CountryId.eq(country_id))
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

        GoogleTrends::delete_many()
            .filter(google_trends::Column::CountryTrendId.eq(aggregate.id))
            .exec(conn)
            .await?;
        GoogleCountryTrends::delete_by_id(aggregate.id)
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
        let model = google_country_trends::ActiveModel {
            country_id: Set(country_id),
            trends_number: Set(i32::try_from(trends_number).unwrap_or(i32::MAX)),
            inserted_at: Set(inserted_at),
            ..Default::default()
        };

        let res = GoogleCountryTrends::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_children<C: ConnectionTrait>(
        conn: &C,
        aggregate_id: i32,
        trends: &[GoogleTrend],
    ) -> Result<(), DbErr> {
        if trends.is_empty() {
            return Ok(());
        }

        let models = trends.iter().map(|t| google_trends::ActiveModel {
            country_trend_id: Set(aggregate_id),
            name: Set(t.name.clone()),
            ..Default::default()
        });

        GoogleTrends::insert_many(models)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrendStore<GoogleDailyKind> for GoogleTrendRepository {
    async fn get_aggregate(&self, key: &GoogleDailyKey) -> Result<Option<Aggregate<u32>>, DbErr> {
        let row = Self::find_aggregate(&self.conn, key.country_id).await?;

        Ok(row.map(|m| Aggregate {
            id: m.id,
            inserted_at: m.inserted_at,
            params: u32::try_from(m.trends_number).unwrap_or_default(),
        }))
    }

    async fn delete_aggregate(&self, key: &GoogleDailyKey) -> Result<bool, DbErr> {
        let txn = self.conn.begin().await?;
        let deleted = Self::delete_for_country(&txn, key.country_id).await?;
        txn.commit().await?;
        Ok(deleted)
    }

    async fn replace_aggregate(
        &self,
        key: &GoogleDailyKey,
        trends_number: &u32,
        inserted_at: DateTime<Utc>,
        items: &[GoogleTrend],
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
        key: &GoogleDailyKey,
        limit: Option<u64>,
    ) -> Result<Vec<GoogleTrend>, DbErr> {
        let rows = GoogleTrends::find()
            .join(
                JoinType::InnerJoin,
                google_trends::Relation::GoogleCountryTrends.def(),
            )
            .filter(google_country_trends::Column::CountryId.eq(key.country_id))
            .order_by_asc(google_trends::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| GoogleTrend { name: m.name })
            .collect())
    }
}

/// Word interest aggregates, one per country and word.
pub struct GoogleWordTrendRepository {
    conn: DatabaseConnection,
}

impl GoogleWordTrendRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_aggregate<C: ConnectionTrait>(
        conn: &C,
        key: &GoogleWordKey,
    ) -> Result<Option<google_word_trends::Model>, DbErr> {
        GoogleWordTrends::find()
            .filter(google_word_trends::Column::CountryId.eq(key.country_id))
            .filter(google_word_trends::Column::Word.eq(key.word.as_str()))
            .one(conn)
            .await
    }

    async fn delete_for_key<C: ConnectionTrait>(conn: &C, key: &GoogleWordKey) -> Result<bool, DbErr> {
        let Some(aggregate) = Self::find_aggregate(conn, key).await? else {
            return Ok(false);
        };

        GoogleWordTrendPoints::delete_many()
            .filter(google_word_trend_points::Column::WordTrendId.eq(aggregate.id))
            .exec(conn)
            .await?;
        GoogleWordTrends::delete_by_id(aggregate.id).exec(conn).await?;

        Ok(true)
    }

    pub async fn insert_aggregate<C: ConnectionTrait>(
        conn: &C,
        key: &GoogleWordKey,
        period: PeriodType,
        inserted_at: DateTime<Utc>,
    ) -> Result<i32, DbErr> {
        let model = google_word_trends::ActiveModel {
            country_id: Set(key.country_id),
            word: Set(key.word.clone()),
            period_type: Set(period.as_str().to_string()),
            inserted_at: Set(inserted_at),
            ..Default::default()
        };

        let res = GoogleWordTrends::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_children<C: ConnectionTrait>(
        conn: &C,
        aggregate_id: i32,
        points: &[InterestPoint],
    ) -> Result<(), DbErr> {
        if points.is_empty() {
            return Ok(());
        }

        // SQLite caps bound parameters per statement; long five-year series get split.
        for chunk in points.chunks(250) {
            let models = chunk.iter().map(|p| google_word_trend_points::ActiveModel {
                word_trend_id: Set(aggregate_id),
                timestamp: Set(p.timestamp),
                value: Set(p.value),
                ..Default::default()
            });

            GoogleWordTrendPoints::insert_many(models)
                .exec_without_returning(conn)
                .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrendStore<GoogleWordKind> for GoogleWordTrendRepository {
    async fn get_aggregate(
        &self,
        key: &GoogleWordKey,
    ) -> Result<Option<Aggregate<PeriodType>>, DbErr> {
        let Some(m) = Self::find_aggregate(&self.conn, key).await? else {
            return Ok(None);
        };

        let period = m
            .period_type
            .parse::<PeriodType>()
            .map_err(DbErr::Custom)?;

        Ok(Some(Aggregate {
            id: m.id,
            inserted_at: m.inserted_at,
            params: period,
        }))
    }

    async fn delete_aggregate(&self, key: &GoogleWordKey) -> Result<bool, DbErr> {
        let txn = self.conn.begin().await?;
        let deleted = Self::delete_for_key(&txn, key).await?;
        txn.commit().await?;
        Ok(deleted)
    }

    async fn replace_aggregate(
        &self,
        key: &GoogleWordKey,
        period: &PeriodType,
        inserted_at: DateTime<Utc>,
        items: &[InterestPoint],
    ) -> Result<i32, DbErr> {
        let txn = self.conn.begin().await?;

        Self::delete_for_key(&txn, key).await?;
        let id = Self::insert_aggregate(&txn, key, *period, inserted_at).await?;
        Self::insert_children(&txn, id, items).await?;

        txn.commit().await?;
        Ok(id)
    }

    async fn list_children(
        &self,
        key: &GoogleWordKey,
        limit: Option<u64>,
    ) -> Result<Vec<InterestPoint>, DbErr> {
        let rows = GoogleWordTrendPoints::find()
            .join(
                JoinType::InnerJoin,
                google_word_trend_points::Relation::GoogleWordTrends.def(),
            )
            .filter(google_word_trends::Column::CountryId.eq(key.country_id))
            .filter(google_word_trends::Column::Word.eq(key.word.as_str()))
            .order_by_asc(google_word_trend_points::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| InterestPoint {
                timestamp: m.timestamp,
                value: m.value,
            })
            .collect())
    }
}
