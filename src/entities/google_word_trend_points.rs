use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "google_word_trend_points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub word_trend_id: i32,
    pub timestamp: DateTimeUtc,
    pub value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::google_word_trends::Entity",
        from = "Column::WordTrendId",
        to = "super::google_word_trends::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    GoogleWordTrends,
}

impl Related<super::google_word_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoogleWordTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
