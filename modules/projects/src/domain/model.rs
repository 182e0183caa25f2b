//! Domain models for builders, agents and projects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propdesk_http::PageParams;
use propdesk_masters::RecordStatus;

/// Project delivery stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    UnderConstruction,
    ReadyToMove,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::UnderConstruction => "under_construction",
            Self::ReadyToMove => "ready_to_move",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(Self::Planning),
            "under_construction" => Ok(Self::UnderConstruction),
            "ready_to_move" => Ok(Self::ReadyToMove),
            "completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

/// A developer / construction company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<i32>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBuilder {
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct BuilderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<i32>,
    pub status: Option<RecordStatus>,
}

/// A sales agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub agency: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewAgent {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub agency: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub agency: Option<String>,
    pub status: Option<RecordStatus>,
}

/// One sellable unit layout within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConfiguration {
    pub label: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    FloorPlan,
    Brochure,
    Other,
}

/// A media entry attached to a project after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: Uuid,
    pub url: String,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A document entry (RERA certificate, price list, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

/// A real-estate project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub builder_id: Uuid,
    pub agent_id: Option<Uuid>,
    pub city_id: Uuid,
    pub location_id: Option<Uuid>,
    pub property_type_id: Option<Uuid>,
    pub project_status: ProjectStatus,
    pub status: RecordStatus,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Vec<Uuid>,
    pub unit_configurations: Vec<UnitConfiguration>,
    pub media: Vec<MediaItem>,
    pub documents: Vec<DocumentItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub builder_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub property_type_id: Option<Uuid>,
    pub project_status: Option<ProjectStatus>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Vec<Uuid>,
    pub unit_configurations: Vec<UnitConfiguration>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub agent_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub property_type_id: Option<Uuid>,
    pub project_status: Option<ProjectStatus>,
    pub status: Option<RecordStatus>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Option<Vec<Uuid>>,
    pub unit_configurations: Option<Vec<UnitConfiguration>>,
}

/// Listing filters shared by builders and agents.
#[derive(Debug, Clone, Default)]
pub struct PartyQuery {
    pub page: PageParams,
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
}

/// Listing filters for projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub page: PageParams,
    pub search: Option<String>,
    pub project_status: Option<ProjectStatus>,
    pub builder_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    /// Price window: projects whose range overlaps [min, max].
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Counters over non-archived projects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectStatistics {
    pub total: u64,
    pub by_status: Vec<(String, u64)>,
    pub avg_min_price: Option<f64>,
    pub avg_max_price: Option<f64>,
}
