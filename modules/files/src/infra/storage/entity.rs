//! SeaORM entity for the `file_records` table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::domain::model::FileRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "file_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    pub url: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FileRecord {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            content_type: m.content_type,
            size_bytes: m.size_bytes,
            storage_key: m.storage_key,
            url: m.url,
            uploaded_by: m.uploaded_by,
            created_at: m.created_at,
        }
    }
}

impl From<&FileRecord> for ActiveModel {
    fn from(r: &FileRecord) -> Self {
        use sea_orm::ActiveValue::Set;
        Self {
            id: Set(r.id),
            file_name: Set(r.file_name.clone()),
            content_type: Set(r.content_type.clone()),
            size_bytes: Set(r.size_bytes),
            storage_key: Set(r.storage_key.clone()),
            url: Set(r.url.clone()),
            uploaded_by: Set(r.uploaded_by.clone()),
            created_at: Set(r.created_at),
        }
    }
}
