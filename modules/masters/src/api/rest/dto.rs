//! REST DTOs for the master resources.
//!
//! One request/response shape serves all eight kinds; fields that do not
//! apply to a kind are rejected or ignored by that kind's adapter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propdesk_http::{ApiError, PageParams};

use crate::domain::model::{
    CityStatistics, DetailsInput, GeoPoint, MasterKind, MasterPatch, MasterQuery, MasterRecord,
    MasterStatistics, NearbyRecord, NewMasterRecord, RecordStatus, SortDir, SortField,
    TypeDetails, ValueBounds,
};

/// Response DTO for a master record, kind-specific fields flattened in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterRecordDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MasterKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub status: RecordStatus,
    pub sort_order: i32,
    pub is_default: bool,
    pub is_popular: bool,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    // geo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_codes: Option<Vec<String>>,
    // parent link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<MasterKind>,
    // category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    // numeric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MasterRecord> for MasterRecordDto {
    fn from(record: MasterRecord) -> Self {
        let mut dto = Self {
            id: record.id,
            kind: record.kind,
            name: record.name,
            description: record.description,
            code: record.code,
            status: record.status,
            sort_order: record.sort_order,
            is_default: record.is_default,
            is_popular: record.is_popular,
            metadata: record.metadata,
            state: None,
            country: None,
            coordinates: None,
            timezone: None,
            pin_codes: None,
            parent_id: None,
            parent_type: None,
            category: None,
            icon: None,
            color: None,
            numeric_value: None,
            display_name: None,
            unit: None,
            min_value: None,
            max_value: None,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        match record.details {
            TypeDetails::Geo(geo) => {
                dto.state = Some(geo.state);
                dto.country = geo.country;
                dto.coordinates = geo.coordinates;
                dto.timezone = geo.timezone;
                dto.pin_codes = (!geo.pin_codes.is_empty()).then_some(geo.pin_codes);
            }
            TypeDetails::Parent(link) => {
                dto.parent_id = Some(link.parent_id);
                dto.parent_type = Some(link.parent_kind);
            }
            TypeDetails::Category(cat) => {
                dto.category = Some(cat.category);
                dto.icon = cat.icon;
                dto.color = cat.color;
            }
            TypeDetails::Numeric(num) => {
                dto.numeric_value = Some(num.value);
                dto.display_name = num.display_name;
                dto.unit = num.unit;
                dto.min_value = num.min_value;
                dto.max_value = num.max_value;
            }
        }
        dto
    }
}

/// Request DTO for creating a record of any kind. The kind itself comes
/// from the resource path, never from the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMasterRequest {
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub timezone: Option<String>,
    pub pin_codes: Option<Vec<String>>,
    pub parent_id: Option<Uuid>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub numeric_value: Option<i32>,
    pub display_name: Option<String>,
    pub unit: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
}

impl CreateMasterRequest {
    pub fn into_new_record(self) -> NewMasterRecord {
        NewMasterRecord {
            name: self.name,
            description: self.description,
            code: self.code,
            status: self.status,
            sort_order: self.sort_order,
            is_default: self.is_default,
            is_popular: self.is_popular,
            metadata: self.metadata,
            details: DetailsInput {
                state: self.state,
                country: self.country,
                coordinates: self.coordinates,
                timezone: self.timezone,
                pin_codes: self.pin_codes,
                parent_id: self.parent_id,
                category: self.category,
                icon: self.icon,
                color: self.color,
                value: self.numeric_value,
                display_name: self.display_name,
                unit: self.unit,
                min_value: self.min_value,
                max_value: self.max_value,
            },
        }
    }
}

/// Request DTO for PATCH. Every field optional; absent fields stay put.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateMasterRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub timezone: Option<String>,
    pub pin_codes: Option<Vec<String>>,
    pub parent_id: Option<Uuid>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub numeric_value: Option<i32>,
    pub display_name: Option<String>,
    pub unit: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
}

impl From<UpdateMasterRequest> for MasterPatch {
    fn from(req: UpdateMasterRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            code: req.code,
            status: req.status,
            sort_order: req.sort_order,
            is_default: req.is_default,
            is_popular: req.is_popular,
            metadata: req.metadata,
            details: DetailsInput {
                state: req.state,
                country: req.country,
                coordinates: req.coordinates,
                timezone: req.timezone,
                pin_codes: req.pin_codes,
                parent_id: req.parent_id,
                category: req.category,
                icon: req.icon,
                color: req.color,
                value: req.numeric_value,
                display_name: req.display_name,
                unit: req.unit,
                min_value: req.min_value,
                max_value: req.max_value,
            },
        }
    }
}

/// Query-string filters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMastersQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub is_default: Option<bool>,
    pub is_popular: Option<bool>,
    pub sort_by: Option<String>,
    /// Sort direction: `asc` (default) or `desc`.
    pub sort_order: Option<String>,
    pub parent_id: Option<Uuid>,
    pub category: Option<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub unit: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pin_code: Option<String>,
}

impl ListMastersQuery {
    pub fn into_query(self) -> Result<MasterQuery, ApiError> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<RecordStatus>()
                    .map_err(|()| ApiError::invalid_input(format!("unknown status '{s}'")))
            })
            .transpose()?;
        let sort_by = self
            .sort_by
            .as_deref()
            .map(|s| {
                s.parse::<SortField>()
                    .map_err(|()| ApiError::invalid_input(format!("cannot sort by '{s}'")))
            })
            .transpose()?
            .unwrap_or_default();
        let sort_dir = self
            .sort_order
            .as_deref()
            .map(|s| {
                s.parse::<SortDir>()
                    .map_err(|()| ApiError::invalid_input(format!("unknown sort order '{s}'")))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(MasterQuery {
            page: PageParams::new(self.page, self.limit),
            search: self.search,
            status,
            is_default: self.is_default,
            is_popular: self.is_popular,
            sort_by,
            sort_dir,
            parent_id: self.parent_id,
            category: self.category,
            min_value: self.min_value,
            max_value: self.max_value,
            unit: self.unit,
            state: self.state,
            country: self.country,
            pin_code: self.pin_code,
        })
    }
}

/// Plain page/limit query for the named-query endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn params(&self) -> PageParams {
        PageParams::new(self.page, self.limit)
    }
}

/// Query for `GET .../near`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearQuery {
    pub lng: f64,
    pub lat: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    25.0
}

/// Query for `GET .../range`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RangeQuery {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// A record with its distance from the query point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDto {
    #[serde(flatten)]
    pub record: MasterRecordDto,
    pub distance_km: f64,
}

impl From<NearbyRecord> for NearbyDto {
    fn from(nearby: NearbyRecord) -> Self {
        Self {
            record: MasterRecordDto::from(nearby.record),
            distance_km: nearby.distance_km,
        }
    }
}

/// Statistics payload shared by all kinds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub popular: u64,
    #[serde(rename = "default")]
    pub defaults: u64,
    pub by_status: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_bounds: Option<ValueBoundsDto>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValueBoundsDto {
    pub min: i32,
    pub max: i32,
}

impl From<ValueBounds> for ValueBoundsDto {
    fn from(b: ValueBounds) -> Self {
        Self {
            min: b.min,
            max: b.max,
        }
    }
}

impl From<MasterStatistics> for StatisticsDto {
    fn from(stats: MasterStatistics) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            inactive: stats.inactive,
            popular: stats.popular,
            defaults: stats.defaults,
            by_status: stats
                .by_status
                .into_iter()
                .map(|b| (b.key, b.count))
                .collect(),
            by_category: stats
                .by_category
                .into_iter()
                .map(|b| (b.key, b.count))
                .collect(),
            value_bounds: stats.value_bounds.map(ValueBoundsDto::from),
        }
    }
}

/// City statistics: the shared payload plus geographic breakdowns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStatisticsDto {
    #[serde(flatten)]
    pub base: StatisticsDto,
    pub by_state: BTreeMap<String, u64>,
    pub by_country: BTreeMap<String, u64>,
}

impl From<CityStatistics> for CityStatisticsDto {
    fn from(stats: CityStatistics) -> Self {
        Self {
            base: StatisticsDto::from(stats.base),
            by_state: stats
                .by_state
                .into_iter()
                .map(|b| (b.key, b.count))
                .collect(),
            by_country: stats
                .by_country
                .into_iter()
                .map(|b| (b.key, b.count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn create_request_accepts_camel_case() {
        let req: CreateMasterRequest = serde_json::from_str(
            r#"{
                "name": "Pune",
                "state": "Maharashtra",
                "coordinates": [73.8567, 18.5204],
                "pinCodes": ["411001"],
                "isPopular": true,
                "sortOrder": 5
            }"#,
        )
        .expect("parse");
        assert_eq!(req.name, "Pune");
        assert_eq!(req.sort_order, Some(5));
        assert_eq!(req.is_popular, Some(true));
        let input = req.into_new_record();
        assert_eq!(input.details.state.as_deref(), Some("Maharashtra"));
        assert!(input.details.coordinates.is_some());
    }

    #[test]
    fn unknown_status_rejected_at_query_parse() {
        let q = ListMastersQuery {
            status: Some("paused".to_owned()),
            ..ListMastersQuery::default()
        };
        assert!(q.into_query().is_err());
    }

    #[test]
    fn archived_status_is_queryable_explicitly() {
        let q = ListMastersQuery {
            status: Some("archived".to_owned()),
            ..ListMastersQuery::default()
        };
        let query = q.into_query().expect("valid");
        assert_eq!(query.status, Some(RecordStatus::Archived));
    }
}
