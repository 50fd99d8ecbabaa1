use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "youtube_trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_trend_id: i32,
    pub title: String,
    pub published_at: DateTimeUtc,
    pub thumbnail: String,
    pub channel_title: String,
    pub view_count: Option<i64>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::youtube_country_trends::Entity",
        from = "Column::CountryTrendId",
        to = "super::youtube_country_trends::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    YoutubeCountryTrends,
}

impl Related<super::youtube_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YoutubeCountryTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
