use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_google_word_trends_country_word")
                    .table(GoogleWordTrends::Table)
                    .col(GoogleWordTrends::CountryId)
                    .col(GoogleWordTrends::Word)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_youtube_country_trends_country_type")
                    .table(YoutubeCountryTrends::Table)
                    .col(YoutubeCountryTrends::CountryId)
                    .col(YoutubeCountryTrends::TrendTypeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(child_index(
                "idx_twitter_trends_country_trend",
                TwitterTrends::Table,
                TwitterTrends::CountryTrendId,
            ))
            .await?;

        manager
            .create_index(child_index(
                "idx_google_trends_country_trend",
                GoogleTrends::Table,
                GoogleTrends::CountryTrendId,
            ))
            .await?;

        manager
            .create_index(child_index(
                "idx_google_word_trend_points_word_trend",
                GoogleWordTrendPoints::Table,
                GoogleWordTrendPoints::WordTrendId,
            ))
            .await?;

        manager
            .create_index(child_index(
                "idx_youtube_trends_country_trend",
                YoutubeTrends::Table,
                YoutubeTrends::CountryTrendId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_youtube_trends_country_trend",
            "idx_google_word_trend_points_word_trend",
            "idx_google_trends_country_trend",
            "idx_twitter_trends_country_trend",
            "idx_youtube_country_trends_country_type",
            "idx_google_word_trends_country_word",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

fn child_index(
    name: &str,
    table: impl IntoIden + 'static,
    column: impl IntoIden + 'static,
) -> IndexCreateStatement {
    Index::create()
        .name(name)
        .table(table)
        .col(column)
        .if_not_exists()
        .to_owned()
}

#[derive(DeriveIden)]
enum GoogleWordTrends {
    Table,
    CountryId,
    Word,
}

#[derive(DeriveIden)]
enum YoutubeCountryTrends {
    Table,
    CountryId,
    TrendTypeId,
}

#[derive(DeriveIden)]
enum TwitterTrends {
    Table,
    CountryTrendId,
}

#[derive(DeriveIden)]
enum GoogleTrends {
    Table,
    CountryTrendId,
}

#[derive(DeriveIden)]
enum GoogleWordTrendPoints {
    Table,
    WordTrendId,
}

#[derive(DeriveIden)]
enum YoutubeTrends {
    Table,
    CountryTrendId,
}
