use crate::entities::{countries, prelude::*, youtube_trend_types};
use crate::models::{Country, NewCountry, YouTubeTrendType};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::info;

/// Repository for the country catalogue and the video trend types.
pub struct CountryRepository {
    conn: DatabaseConnection,
}

impl CountryRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_country(m: countries::Model) -> Country {
        Country {
            id: m.id,
            name: m.name,
            native_name: m.native_name,
            acronym: m.acronym,
            flag: m.flag,
            woeid: m.woeid,
            pn: m.pn,
            lat: m.lat,
            lng: m.lng,
        }
    }

    fn map_trend_type(m: youtube_trend_types::Model) -> YouTubeTrendType {
        YouTubeTrendType {
            id: m.id,
            name: m.name,
            category_id: m.category_id,
        }
    }

    pub async fn list(&self) -> Result<Vec<Country>, DbErr> {
        let rows = Countries::find()
            .order_by_asc(countries::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_country).collect())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Countries::find().count(&self.conn).await
    }

    /// Exact, case-sensitive lookup.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Country>, DbErr> {
        let row = Countries::find()
            .filter(countries::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_country))
    }

    /// Inserts the catalogue in one transaction. Names already present are
    /// left untouched. Returns the number of new rows.
    pub async fn insert_many(&self, new_countries: &[NewCountry]) -> Result<u64, DbErr> {
        if new_countries.is_empty() {
            return Ok(0);
        }

        let txn = self.conn.begin().await?;
        let mut inserted = 0;

        for chunk in new_countries.chunks(200) {
            let models = chunk.iter().map(|c| countries::ActiveModel {
                name: Set(c.name.clone()),
                native_name: Set(c.native_name.clone()),
                acronym: Set(c.acronym.clone()),
                flag: Set(c.flag.clone()),
                woeid: Set(c.woeid),
                pn: Set(c.pn.clone()),
                lat: Set(c.lat),
                lng: Set(c.lng),
                ..Default::default()
            });

            inserted += Countries::insert_many(models)
                .on_conflict(
                    OnConflict::column(countries::Column::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        info!("Inserted {} countries", inserted);
        Ok(inserted)
    }

    /// Seeds the fixed video trend types; existing names get their category refreshed.
    pub async fn initialize_trend_types(&self, types: &[(&str, i32)]) -> Result<(), DbErr> {
        for (name, category_id) in types {
            let model = youtube_trend_types::ActiveModel {
                name: Set((*name).to_string()),
                category_id: Set(*category_id),
                ..Default::default()
            };

            YoutubeTrendTypes::insert(model)
                .on_conflict(
                    OnConflict::column(youtube_trend_types::Column::Name)
                        .update_column(youtube_trend_types::Column::CategoryId)
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;
        }

        Ok(())
    }

    pub async fn list_trend_types(&self) -> Result<Vec<YouTubeTrendType>, DbErr> {
        let rows = YoutubeTrendTypes::find()
            .order_by_asc(youtube_trend_types::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_trend_type).collect())
    }

    pub async fn find_trend_type(&self, name: &str) -> Result<Option<YouTubeTrendType>, DbErr> {
        let row = YoutubeTrendTypes::find()
            .filter(youtube_trend_types::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_trend_type))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Countries::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
