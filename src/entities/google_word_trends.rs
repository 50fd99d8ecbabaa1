use sea_orm::entity::prelude::*;

/// Unique on (`country_id`, `word`); see the aggregate keys migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "google_word_trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    pub word: String,
    pub period_type: String,
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
    #[sea_orm(has_many = "super::google_word_trend_points::Entity")]
    GoogleWordTrendPoints,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::google_word_trend_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoogleWordTrendPoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
