use sea_orm::entity::prelude::*;

/// Unique on (`country_id`, `trend_type_id`); see the aggregate keys migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "youtube_country_trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    pub trend_type_id: i32,
    pub inserted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Countries,
    #[sea_orm(
        belongs_to = "super::youtube_trend_types::Entity",
        from = "Column::TrendTypeId",
        to = "super::youtube_trend_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    YoutubeTrendTypes,
    #[sea_orm(has_many = "super::youtube_trends::Entity")]
    YoutubeTrends,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::youtube_trend_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YoutubeTrendTypes.def()
    }
}

impl Related<super::youtube_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YoutubeTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
