use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "google_trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_trend_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::google_country_trends::Entity",
        from = "Column::CountryTrendId",
        to = "super::google_country_trends::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    GoogleCountryTrends,
}

impl Related<super::google_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoogleCountryTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
