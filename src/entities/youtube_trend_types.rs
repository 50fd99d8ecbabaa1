use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "youtube_trend_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::youtube_country_trends::Entity")]
    YoutubeCountryTrends,
}

impl Related<super::youtube_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YoutubeCountryTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
