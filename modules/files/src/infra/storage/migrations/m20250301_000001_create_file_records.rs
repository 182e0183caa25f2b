//! Initial migration for the file_records table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FileRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FileRecords::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileRecords::ContentType)
                            .string_len(127)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileRecords::SizeBytes)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileRecords::StorageKey)
                            .string_len(512)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FileRecords::Url).text().not_null())
                    .col(
                        ColumnDef::new(FileRecords::UploadedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_file_records_uploader")
                    .table(FileRecords::Table)
                    .col(FileRecords::UploadedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FileRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FileRecords {
    Table,
    Id,
    FileName,
    ContentType,
    SizeBytes,
    StorageKey,
    Url,
    UploadedBy,
    CreatedAt,
}
