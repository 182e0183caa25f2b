//! Domain models for the master record store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propdesk_http::PageParams;

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 100;

/// Inclusive upper bound for `sort_order`.
pub const MAX_SORT_ORDER: i32 = 9999;

/// Discriminator for the logical master table a record belongs to.
/// Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterKind {
    City,
    Location,
    Amenity,
    Floor,
    Tower,
    PropertyType,
    Room,
    Washroom,
}

impl MasterKind {
    pub const ALL: [MasterKind; 8] = [
        MasterKind::City,
        MasterKind::Location,
        MasterKind::Amenity,
        MasterKind::Floor,
        MasterKind::Tower,
        MasterKind::PropertyType,
        MasterKind::Room,
        MasterKind::Washroom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Location => "location",
            Self::Amenity => "amenity",
            Self::Floor => "floor",
            Self::Tower => "tower",
            Self::PropertyType => "property_type",
            Self::Room => "room",
            Self::Washroom => "washroom",
        }
    }

    /// Human label used in messages ("City", "Property type", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Location => "Location",
            Self::Amenity => "Amenity",
            Self::Floor => "Floor",
            Self::Tower => "Tower",
            Self::PropertyType => "Property type",
            Self::Room => "Room",
            Self::Washroom => "Washroom",
        }
    }

    /// Which payload family this kind carries.
    pub fn detail_family(&self) -> DetailFamily {
        match self {
            Self::City => DetailFamily::Geo,
            Self::Location => DetailFamily::Parent,
            Self::Amenity | Self::PropertyType => DetailFamily::Category,
            Self::Floor | Self::Tower | Self::Room | Self::Washroom => DetailFamily::Numeric,
        }
    }
}

impl fmt::Display for MasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasterKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "city" => Ok(Self::City),
            "location" => Ok(Self::Location),
            "amenity" => Ok(Self::Amenity),
            "floor" => Ok(Self::Floor),
            "tower" => Ok(Self::Tower),
            "property_type" => Ok(Self::PropertyType),
            "room" => Ok(Self::Room),
            "washroom" => Ok(Self::Washroom),
            _ => Err(()),
        }
    }
}

/// Record lifecycle: `active ⇄ inactive`, either → `archived` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Inactive,
    Archived,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "archived" => Ok(Self::Archived),
            _ => Err(()),
        }
    }
}

/// A (longitude, latitude) pair. Serialized on the wire as a two-element
/// array, matching the stored `[lng, lat]` convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<[f64; 2]> for GeoPoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.longitude, p.latitude]
    }
}

/// The payload family a kind stores alongside the common fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFamily {
    Geo,
    Parent,
    Category,
    Numeric,
}

/// City payload: geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDetails {
    pub state: String,
    pub country: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub timezone: Option<String>,
    pub pin_codes: Vec<String>,
}

/// Location payload: link to its parent city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub parent_id: Uuid,
    /// Always [`MasterKind::City`]; stored explicitly so the reference is
    /// self-describing.
    pub parent_kind: MasterKind,
}

/// Amenity / property-type payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetails {
    pub category: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Floor / tower / room / washroom payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericDetails {
    /// Floor number, tower number, bedroom count or bathroom count.
    pub value: i32,
    pub display_name: Option<String>,
    pub unit: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
}

/// Type-specific payload, one variant per detail family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDetails {
    Geo(GeoDetails),
    Parent(ParentLink),
    Category(CategoryDetails),
    Numeric(NumericDetails),
}

impl TypeDetails {
    pub fn family(&self) -> DetailFamily {
        match self {
            Self::Geo(_) => DetailFamily::Geo,
            Self::Parent(_) => DetailFamily::Parent,
            Self::Category(_) => DetailFamily::Category,
            Self::Numeric(_) => DetailFamily::Numeric,
        }
    }

    /// True when this payload is the right family for `kind`.
    pub fn matches(&self, kind: MasterKind) -> bool {
        self.family() == kind.detail_family()
    }

    pub fn as_geo(&self) -> Option<&GeoDetails> {
        match self {
            Self::Geo(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_parent(&self) -> Option<&ParentLink> {
        match self {
            Self::Parent(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&CategoryDetails> {
        match self {
            Self::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericDetails> {
        match self {
            Self::Numeric(n) => Some(n),
            _ => None,
        }
    }
}

/// A master record: the common fields plus one kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub id: Uuid,
    pub kind: MasterKind,
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: RecordStatus,
    pub sort_order: i32,
    pub is_default: bool,
    pub is_popular: bool,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub details: TypeDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw kind-specific fields as they arrive from the API, before the
/// adapter for the target kind has validated them into a [`TypeDetails`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsInput {
    // geo
    pub state: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub timezone: Option<String>,
    pub pin_codes: Option<Vec<String>>,
    // parent link
    pub parent_id: Option<Uuid>,
    // category
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    // numeric
    pub value: Option<i32>,
    pub display_name: Option<String>,
    pub unit: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
}

/// Input for `create`. The kind comes from the adapter, never the caller.
#[derive(Debug, Clone, Default)]
pub struct NewMasterRecord {
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub details: DetailsInput,
}

/// Partial update. Absent fields are left untouched; the kind and the
/// system timestamps are never patchable.
#[derive(Debug, Clone, Default)]
pub struct MasterPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub details: DetailsInput,
}

impl MasterPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.status.is_none()
            && self.sort_order.is_none()
            && self.is_default.is_none()
            && self.is_popular.is_none()
            && self.metadata.is_none()
            && self.details == DetailsInput::default()
    }
}

/// Sortable fields for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    SortOrder,
    Name,
    CreatedAt,
    UpdatedAt,
    Value,
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sortOrder" | "sort_order" => Ok(Self::SortOrder),
            "name" => Ok(Self::Name),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "value" | "numericValue" | "numeric_value" => Ok(Self::Value),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDir {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ASC" => Ok(Self::Asc),
            "desc" | "DESC" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Listing filter set. Generic filters apply to every kind; the
/// type-specific ones are ignored by kinds they do not apply to.
#[derive(Debug, Clone, Default)]
pub struct MasterQuery {
    pub page: PageParams,
    /// Case-insensitive match against name, description, code and (for
    /// numeric kinds) display name.
    pub search: Option<String>,
    /// Explicit status filter. Archived records only show up when this is
    /// `Some(Archived)`.
    pub status: Option<RecordStatus>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub sort_by: SortField,
    pub sort_dir: SortDir,
    // type-specific filters
    pub parent_id: Option<Uuid>,
    pub category: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub unit: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pin_code: Option<String>,
}

/// A `(key, count)` bucket in a statistics breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub key: String,
    pub count: u64,
}

/// Min/max of the numeric value across non-archived records of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueBounds {
    pub min: i32,
    pub max: i32,
}

/// Statistics over the non-archived records of one kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterStatistics {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub popular: u64,
    pub defaults: u64,
    pub by_status: Vec<CountBucket>,
    /// Only populated for categorized kinds.
    pub by_category: Vec<CountBucket>,
    /// Only populated for numeric kinds with at least one record.
    pub value_bounds: Option<ValueBounds>,
}

/// City statistics: the generic set plus geographic breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct CityStatistics {
    #[serde(flatten)]
    pub base: MasterStatistics,
    pub by_state: Vec<CountBucket>,
    pub by_country: Vec<CountBucket>,
}

/// A record at a known distance from a query point.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyRecord {
    pub record: MasterRecord,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in MasterKind::ALL {
            assert_eq!(kind.as_str().parse::<MasterKind>(), Ok(kind));
        }
    }

    #[test]
    fn detail_families_line_up() {
        assert_eq!(MasterKind::City.detail_family(), DetailFamily::Geo);
        assert_eq!(MasterKind::Location.detail_family(), DetailFamily::Parent);
        assert_eq!(MasterKind::Amenity.detail_family(), DetailFamily::Category);
        assert_eq!(
            MasterKind::PropertyType.detail_family(),
            DetailFamily::Category
        );
        for kind in [
            MasterKind::Floor,
            MasterKind::Tower,
            MasterKind::Room,
            MasterKind::Washroom,
        ] {
            assert_eq!(kind.detail_family(), DetailFamily::Numeric);
        }
    }

    #[test]
    fn geo_point_serializes_as_pair() {
        let p = GeoPoint {
            longitude: 73.85,
            latitude: 18.52,
        };
        let json = serde_json::to_value(p).expect("serialize");
        assert_eq!(json, serde_json::json!([73.85, 18.52]));

        let back: GeoPoint = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, p);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(MasterPatch::default().is_empty());
        let patch = MasterPatch {
            name: Some("Pune".to_owned()),
            ..MasterPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
