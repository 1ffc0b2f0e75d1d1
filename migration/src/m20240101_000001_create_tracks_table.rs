use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tracks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tracks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tracks::Title).text().not_null())
                    .col(ColumnDef::new(Tracks::Artist).text())
                    .col(
                        ColumnDef::new(Tracks::Duration)
                            .text()
                            .not_null()
                            .default("0:00"),
                    )
                    .col(ColumnDef::new(Tracks::FileUrl).text().not_null())
                    .col(ColumnDef::new(Tracks::FileName).text().not_null())
                    .col(ColumnDef::new(Tracks::FileSize).integer().not_null())
                    .col(
                        ColumnDef::new(Tracks::CreatedAt)
                            .timestamp()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracks_created_at")
                    .table(Tracks::Table)
                    .col(Tracks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tracks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tracks {
    Table,
    Id,
    Title,
    Artist,
    Duration,
    FileUrl,
    FileName,
    FileSize,
    CreatedAt,
}
