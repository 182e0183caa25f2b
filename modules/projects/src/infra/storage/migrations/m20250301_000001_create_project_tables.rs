//! Initial migration for builders, agents and projects.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Builders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Builders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Builders::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Builders::Description).text())
                    .col(ColumnDef::new(Builders::ContactEmail).string_len(255))
                    .col(ColumnDef::new(Builders::ContactPhone).string_len(30))
                    .col(ColumnDef::new(Builders::Website).string_len(255))
                    .col(ColumnDef::new(Builders::EstablishedYear).integer())
                    .col(
                        ColumnDef::new(Builders::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Builders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Builders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Agents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Agents::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Agents::Email).string_len(255))
                    .col(ColumnDef::new(Agents::Phone).string_len(30))
                    .col(ColumnDef::new(Agents::LicenseNumber).string_len(100))
                    .col(ColumnDef::new(Agents::Agency).string_len(150))
                    .col(
                        ColumnDef::new(Agents::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Agents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::BuilderId).uuid().not_null())
                    .col(ColumnDef::new(Projects::AgentId).uuid())
                    .col(ColumnDef::new(Projects::CityId).uuid().not_null())
                    .col(ColumnDef::new(Projects::LocationId).uuid())
                    .col(ColumnDef::new(Projects::PropertyTypeId).uuid())
                    .col(
                        ColumnDef::new(Projects::ProjectStatus)
                            .string_len(30)
                            .not_null()
                            .default("planning"),
                    )
                    .col(
                        ColumnDef::new(Projects::Status)
                            .string_len(10)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Projects::MinPrice).big_integer())
                    .col(ColumnDef::new(Projects::MaxPrice).big_integer())
                    .col(ColumnDef::new(Projects::PossessionDate).date())
                    .col(ColumnDef::new(Projects::AmenityIds).json())
                    .col(ColumnDef::new(Projects::UnitConfigurations).json())
                    .col(ColumnDef::new(Projects::Media).json())
                    .col(ColumnDef::new(Projects::Documents).json())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::BuilderId)
                            .to(Builders::Table, Builders::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_builder")
                    .table(Projects::Table)
                    .col(Projects::BuilderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_city")
                    .table(Projects::Table)
                    .col(Projects::CityId)
                    .to_owned(),
            )
            .await?;

        // Name uniqueness scoped to non-archived rows, like the masters.
        let conn = manager.get_connection();
        for sql in [
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_builders_name \
             ON builders (name) WHERE status <> 'archived'",
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_agents_name \
             ON agents (name) WHERE status <> 'archived'",
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_projects_name \
             ON projects (name) WHERE status <> 'archived'",
        ] {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Agents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Builders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Builders {
    Table,
    Id,
    Name,
    Description,
    ContactEmail,
    ContactPhone,
    Website,
    EstablishedYear,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Agents {
    Table,
    Id,
    Name,
    Email,
    Phone,
    LicenseNumber,
    Agency,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Name,
    Description,
    BuilderId,
    AgentId,
    CityId,
    LocationId,
    PropertyTypeId,
    ProjectStatus,
    Status,
    MinPrice,
    MaxPrice,
    PossessionDate,
    AmenityIds,
    UnitConfigurations,
    Media,
    Documents,
    CreatedAt,
    UpdatedAt,
}
