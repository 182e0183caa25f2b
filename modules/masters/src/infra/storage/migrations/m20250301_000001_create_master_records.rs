//! Initial migration for the shared master_records table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MasterRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::Kind)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MasterRecords::Description).text())
                    .col(ColumnDef::new(MasterRecords::Code).string_len(50))
                    .col(
                        ColumnDef::new(MasterRecords::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::IsPopular)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(MasterRecords::Metadata).json())
                    .col(ColumnDef::new(MasterRecords::State).string_len(100))
                    .col(ColumnDef::new(MasterRecords::Country).string_len(100))
                    .col(ColumnDef::new(MasterRecords::Longitude).double())
                    .col(ColumnDef::new(MasterRecords::Latitude).double())
                    .col(ColumnDef::new(MasterRecords::Timezone).string_len(64))
                    .col(ColumnDef::new(MasterRecords::PinCodes).text())
                    .col(ColumnDef::new(MasterRecords::ParentId).uuid())
                    .col(ColumnDef::new(MasterRecords::ParentKind).string_len(20))
                    .col(ColumnDef::new(MasterRecords::Category).string_len(50))
                    .col(ColumnDef::new(MasterRecords::Icon).string_len(100))
                    .col(ColumnDef::new(MasterRecords::Color).string_len(20))
                    .col(ColumnDef::new(MasterRecords::NumericValue).integer())
                    .col(ColumnDef::new(MasterRecords::DisplayName).string_len(100))
                    .col(ColumnDef::new(MasterRecords::Unit).string_len(20))
                    .col(ColumnDef::new(MasterRecords::MinValue).integer())
                    .col(ColumnDef::new(MasterRecords::MaxValue).integer())
                    .col(
                        ColumnDef::new(MasterRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MasterRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_master_records_kind_status")
                    .table(MasterRecords::Table)
                    .col(MasterRecords::Kind)
                    .col(MasterRecords::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_master_records_parent")
                    .table(MasterRecords::Table)
                    .col(MasterRecords::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_master_records_kind_value")
                    .table(MasterRecords::Table)
                    .col(MasterRecords::Kind)
                    .col(MasterRecords::NumericValue)
                    .to_owned(),
            )
            .await?;

        // Uniqueness is scoped to non-archived rows, so archiving a record
        // frees its name and code. Partial indexes are not expressible
        // through the schema builder; same SQL works on sqlite and postgres.
        let conn = manager.get_connection();
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_master_records_kind_name \
             ON master_records (kind, name) WHERE status <> 'archived'",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_master_records_kind_code \
             ON master_records (kind, code) \
             WHERE status <> 'archived' AND code IS NOT NULL",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MasterRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MasterRecords {
    Table,
    Id,
    Kind,
    Name,
    Description,
    Code,
    Status,
    SortOrder,
    IsDefault,
    IsPopular,
    Metadata,
    State,
    Country,
    Longitude,
    Latitude,
    Timezone,
    PinCodes,
    ParentId,
    ParentKind,
    Category,
    Icon,
    Color,
    NumericValue,
    DisplayName,
    Unit,
    MinValue,
    MaxValue,
    CreatedAt,
    UpdatedAt,
}
