use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Countries)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(YoutubeTrendTypes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TwitterCountryTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TwitterTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GoogleCountryTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GoogleTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GoogleWordTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GoogleWordTrendPoints)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(YoutubeCountryTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(YoutubeTrends)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(YoutubeTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YoutubeCountryTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoogleWordTrendPoints).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoogleWordTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoogleTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoogleCountryTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TwitterTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TwitterCountryTrends).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YoutubeTrendTypes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries).to_owned())
            .await
    }
}
