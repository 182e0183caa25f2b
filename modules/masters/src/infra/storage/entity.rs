//! SeaORM entity for the `master_records` table.
//!
//! All eight master kinds share this table; nullable columns carry the
//! kind-specific payloads and the mapper reassembles them into the typed
//! domain payload. `pin_codes` is kept as serialized JSON text so the
//! pin-code filter can match with LIKE on both sqlite and postgres.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "master_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: String,
    pub sort_order: i32,
    pub is_default: bool,
    pub is_popular: bool,
    pub metadata: Option<Json>,
    // geo payload (cities)
    pub state: Option<String>,
    pub country: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub timezone: Option<String>,
    pub pin_codes: Option<String>,
    // parent payload (locations)
    pub parent_id: Option<Uuid>,
    pub parent_kind: Option<String>,
    // category payload (amenities, property types)
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    // numeric payload (floors, towers, rooms, washrooms)
    pub numeric_value: Option<i32>,
    pub display_name: Option<String>,
    pub unit: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
