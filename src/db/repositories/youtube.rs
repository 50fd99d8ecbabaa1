use crate::entities::{prelude::*, youtube_country_trends, youtube_trends};
use crate::models::YouTubeVideo;
use crate::services::refresh::{Aggregate, TrendStore};
use crate::services::trend_kinds::{YouTubeKey, YouTubeKind};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// Popular video aggregates, one per country and trend type.
pub struct YouTubeTrendRepository {
    conn: DatabaseConnection,
}

impl YouTubeTrendRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_video(m: youtube_trends::Model) -> YouTubeVideo {
        YouTubeVideo {
            title: m.title,
            published_at: m.published_at,
            thumbnail: m.thumbnail,
            channel_title: m.channel_title,
            view_count: m.view_count,
            like_count: m.like_count,
            comment_count: m.comment_count,
        }
    }

    async fn find_aggregate<C: ConnectionTrait>(
        conn: &C,
        key: &YouTubeKey,
    ) -> Result<Option<youtube_country_trends::Model>, DbErr> {
        YoutubeCountryTrends::find()
            .filter(youtube_country_trends::Column::CountryId.eq(key.country_id))
            .filter(youtube_country_trends::Column::TrendTypeId.eq(key.trend_type.id))
            .one(conn)
            .await
    }

    async fn delete_for_key<C: ConnectionTrait>(conn: &C, key: &YouTubeKey) -> Result<bool, DbErr> {
        let Some(aggregate) = Self::find_aggregate(conn, key).await? else {
            return Ok(false);
        };

        YoutubeTrends::delete_many()
            .filter(youtube_trends::Column::CountryTrendId.eq(aggregate.id))
            .exec(conn)
            .await?;
        YoutubeCountryTrends::delete_by_id(aggregate.id)
            .exec(conn)
            .await?;

        Ok(true)
    }

    pub async fn insert_aggregate<C: ConnectionTrait>(
        conn: &C,
        key: &YouTubeKey,
        inserted_at: DateTime<Utc>,
    ) -> Result<i32, DbErr> {
        let model = youtube_country_trends::ActiveModel {
            country_id: Set(key.country_id),
            trend_type_id: Set(key.trend_type.id),
            inserted_at: Set(inserted_at),
            ..Default::default()
        };

        let res = YoutubeCountryTrends::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_children<C: ConnectionTrait>(
        conn: &C,
        aggregate_id: i32,
        videos: &[YouTubeVideo],
    ) -> Result<(), DbErr> {
        if videos.is_empty() {
            return Ok(());
        }

        for chunk in videos.chunks(100) {
            let models = chunk.iter().map(|v| youtube_trends::ActiveModel {
                country_trend_id: Set(aggregate_id),
                title: Set(v.title.clone()),
                published_at: Set(v.published_at),
                thumbnail: Set(v.thumbnail.clone()),
                channel_title: Set(v.channel_title.clone()),
                view_count: Set(v.view_count),
                like_count: Set(v.like_count),
                comment_count: Set(v.comment_count),
                ..Default::default()
            });

            YoutubeTrends::insert_many(models)
                .exec_without_returning(conn)
                .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrendStore<YouTubeKind> for YouTubeTrendRepository {
    async fn get_aggregate(&self, key: &YouTubeKey) -> Result<Option<Aggregate<()>>, DbErr> {
        let row = Self::find_aggregate(&self.conn, key).await?;

        Ok(row.map(|m| Aggregate {
            id: m.id,
            inserted_at: m.inserted_at,
            params: (),
        }))
    }

    async fn delete_aggregate(&self, key: &YouTubeKey) -> Result<bool, DbErr> {
        let txn = self.conn.begin().await?;
        let deleted = Self::delete_for_key(&txn, key).await?;
        txn.commit().await?;
        Ok(deleted)
    }

    async fn replace_aggregate(
        &self,
        key: &YouTubeKey,
        _params: &(),
        inserted_at: DateTime<Utc>,
        items: &[YouTubeVideo],
    ) -> Result<i32, DbErr> {
        let txn = self.conn.begin().await?;

        Self::delete_for_key(&txn, key).await?;
        let id = Self::insert_aggregate(&txn, key, inserted_at).await?;
        Self::insert_children(&txn, id, items).await?;

        txn.commit().await?;
        Ok(id)
    }

    async fn list_children(
        &self,
        key: &YouTubeKey,
        limit: Option<u64>,
    ) -> Result<Vec<YouTubeVideo>, DbErr> {
        let rows = YoutubeTrends::find()
            .join(
                JoinType::InnerJoin,
                youtube_trends::Relation::YoutubeCountryTrends.def(),
            )
            .filter(youtube_country_trends::Column::CountryId.eq(key.country_id))
            .filter(youtube_country_trends::Column::TrendTypeId.eq(key.trend_type.id))
            .order_by_asc(youtube_trends::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_video).collect())
    }
}
