//! SeaORM entities for the projects module.

pub use agent::Entity as AgentEntity;
pub use builder::Entity as BuilderEntity;
pub use project::Entity as ProjectEntity;

/// Builder entity for the `builders` table.
pub mod builder {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "builders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub contact_email: Option<String>,
        pub contact_phone: Option<String>,
        pub website: Option<String>,
        pub established_year: Option<i32>,
        pub status: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::project::Entity")]
        Projects,
    }

    impl Related<super::project::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Projects.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Agent entity for the `agents` table.
pub mod agent {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "agents")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub license_number: Option<String>,
        pub agency: Option<String>,
        pub status: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Project entity for the `projects` table. Unit configurations, media,
/// documents and amenity references live in JSON document columns.
pub mod project {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "projects")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub builder_id: Uuid,
        pub agent_id: Option<Uuid>,
        pub city_id: Uuid,
        pub location_id: Option<Uuid>,
        pub property_type_id: Option<Uuid>,
        pub project_status: String,
        pub status: String,
        pub min_price: Option<i64>,
        pub max_price: Option<i64>,
        pub possession_date: Option<Date>,
        pub amenity_ids: Option<Json>,
        pub unit_configurations: Option<Json>,
        pub media: Option<Json>,
        pub documents: Option<Json>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::builder::Entity",
            from = "Column::BuilderId",
            to = "super::builder::Column::Id"
        )]
        Builder,
    }

    impl Related<super::builder::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Builder.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
