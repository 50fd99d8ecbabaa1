use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub native_name: String,
    pub acronym: String,
    pub flag: Option<String>,
    pub woeid: Option<i32>,
    pub pn: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::twitter_country_trends::Entity")]
    TwitterCountryTrends,
    #[sea_orm(has_one = "super::google_country_trends::Entity")]
    GoogleCountryTrends,
    #[sea_orm(has_many = "super::google_word_trends::Entity")]
    GoogleWordTrends,
    #[sea_orm(has_many = "super::youtube_country_trends::Entity")]
    YoutubeCountryTrends,
}

impl Related<super::twitter_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TwitterCountryTrends.def()
    }
}

impl Related<super::google_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoogleCountryTrends.def()
    }
}

impl Related<super::google_word_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoogleWordTrends.def()
    }
}

impl Related<super::youtube_country_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YoutubeCountryTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
