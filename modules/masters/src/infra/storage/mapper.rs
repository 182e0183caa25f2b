//! Row ↔ domain mapping, including kind-aware payload assembly.

use sea_orm::ActiveValue;

use crate::domain::error::DomainError;
use crate::domain::model::{
    CategoryDetails, DetailFamily, GeoDetails, GeoPoint, MasterKind, MasterRecord, NumericDetails,
    ParentLink, RecordStatus, TypeDetails,
};

use super::entity;

/// Rebuild a domain record from a row. A row whose payload columns do not
/// fit its kind is treated as storage corruption, not caller error.
pub fn to_domain(model: entity::Model) -> Result<MasterRecord, DomainError> {
    let kind: MasterKind = model
        .kind
        .parse()
        .map_err(|()| DomainError::database(format!("unknown master kind '{}'", model.kind)))?;
    let status: RecordStatus = model
        .status
        .parse()
        .map_err(|()| DomainError::database(format!("unknown record status '{}'", model.status)))?;

    let details = match kind.detail_family() {
        DetailFamily::Geo => {
            let state = model
                .state
                .ok_or_else(|| DomainError::database("city row without state"))?;
            let coordinates = match (model.longitude, model.latitude) {
                (Some(longitude), Some(latitude)) => Some(GeoPoint {
                    longitude,
                    latitude,
                }),
                _ => None,
            };
            let pin_codes = match model.pin_codes.as_deref() {
                None | Some("") => Vec::new(),
                Some(raw) => serde_json::from_str(raw)
                    .map_err(|e| DomainError::database(format!("bad pin_codes payload: {e}")))?,
            };
            TypeDetails::Geo(GeoDetails {
                state,
                country: model.country,
                coordinates,
                timezone: model.timezone,
                pin_codes,
            })
        }
        DetailFamily::Parent => {
            let parent_id = model
                .parent_id
                .ok_or_else(|| DomainError::database("location row without parent_id"))?;
            TypeDetails::Parent(ParentLink {
                parent_id,
                parent_kind: MasterKind::City,
            })
        }
        DetailFamily::Category => {
            let category = model
                .category
                .ok_or_else(|| DomainError::database("categorized row without category"))?;
            TypeDetails::Category(CategoryDetails {
                category,
                icon: model.icon,
                color: model.color,
            })
        }
        DetailFamily::Numeric => {
            let value = model
                .numeric_value
                .ok_or_else(|| DomainError::database("numeric row without value"))?;
            TypeDetails::Numeric(NumericDetails {
                value,
                display_name: model.display_name,
                unit: model.unit,
                min_value: model.min_value,
                max_value: model.max_value,
            })
        }
    };

    let metadata = match model.metadata {
        Some(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };

    Ok(MasterRecord {
        id: model.id,
        kind,
        name: model.name,
        description: model.description,
        code: model.code,
        status,
        sort_order: model.sort_order,
        is_default: model.is_default,
        is_popular: model.is_popular,
        metadata,
        details,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Flatten a domain record into an active model with every column set.
pub fn to_active_model(record: &MasterRecord) -> entity::ActiveModel {
    let mut am = entity::ActiveModel {
        id: ActiveValue::Set(record.id),
        kind: ActiveValue::Set(record.kind.as_str().to_owned()),
        name: ActiveValue::Set(record.name.clone()),
        description: ActiveValue::Set(record.description.clone()),
        code: ActiveValue::Set(record.code.clone()),
        status: ActiveValue::Set(record.status.as_str().to_owned()),
        sort_order: ActiveValue::Set(record.sort_order),
        is_default: ActiveValue::Set(record.is_default),
        is_popular: ActiveValue::Set(record.is_popular),
        metadata: ActiveValue::Set(if record.metadata.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(record.metadata.clone()))
        }),
        state: ActiveValue::Set(None),
        country: ActiveValue::Set(None),
        longitude: ActiveValue::Set(None),
        latitude: ActiveValue::Set(None),
        timezone: ActiveValue::Set(None),
        pin_codes: ActiveValue::Set(None),
        parent_id: ActiveValue::Set(None),
        parent_kind: ActiveValue::Set(None),
        category: ActiveValue::Set(None),
        icon: ActiveValue::Set(None),
        color: ActiveValue::Set(None),
        numeric_value: ActiveValue::Set(None),
        display_name: ActiveValue::Set(None),
        unit: ActiveValue::Set(None),
        min_value: ActiveValue::Set(None),
        max_value: ActiveValue::Set(None),
        created_at: ActiveValue::Set(record.created_at),
        updated_at: ActiveValue::Set(record.updated_at),
    };

    match &record.details {
        TypeDetails::Geo(geo) => {
            am.state = ActiveValue::Set(Some(geo.state.clone()));
            am.country = ActiveValue::Set(geo.country.clone());
            am.longitude = ActiveValue::Set(geo.coordinates.map(|p| p.longitude));
            am.latitude = ActiveValue::Set(geo.coordinates.map(|p| p.latitude));
            am.timezone = ActiveValue::Set(geo.timezone.clone());
            am.pin_codes = ActiveValue::Set(if geo.pin_codes.is_empty() {
                None
            } else {
                serde_json::to_string(&geo.pin_codes).ok()
            });
        }
        TypeDetails::Parent(link) => {
            am.parent_id = ActiveValue::Set(Some(link.parent_id));
            am.parent_kind = ActiveValue::Set(Some(link.parent_kind.as_str().to_owned()));
        }
        TypeDetails::Category(cat) => {
            am.category = ActiveValue::Set(Some(cat.category.clone()));
            am.icon = ActiveValue::Set(cat.icon.clone());
            am.color = ActiveValue::Set(cat.color.clone());
        }
        TypeDetails::Numeric(num) => {
            am.numeric_value = ActiveValue::Set(Some(num.value));
            am.display_name = ActiveValue::Set(num.display_name.clone());
            am.unit = ActiveValue::Set(num.unit.clone());
            am.min_value = ActiveValue::Set(num.min_value);
            am.max_value = ActiveValue::Set(num.max_value);
        }
    }

    am
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;
    use uuid::Uuid;

    fn city_record() -> MasterRecord {
        let now = Utc::now();
        MasterRecord {
            id: Uuid::now_v7(),
            kind: MasterKind::City,
            name: "Pune".to_owned(),
            description: None,
            code: Some("PNQ".to_owned()),
            status: RecordStatus::Active,
            sort_order: 1,
            is_default: false,
            is_popular: true,
            metadata: serde_json::Map::new(),
            details: TypeDetails::Geo(GeoDetails {
                state: "Maharashtra".to_owned(),
                country: Some("India".to_owned()),
                coordinates: Some(GeoPoint {
                    longitude: 73.8567,
                    latitude: 18.5204,
                }),
                timezone: Some("Asia/Kolkata".to_owned()),
                pin_codes: vec!["411001".to_owned()],
            }),
            created_at: now,
            updated_at: now,
        }
    }

    fn unwrap_set<T: Clone>(v: &ActiveValue<T>) -> T
    where
        T: Into<sea_orm::Value>,
    {
        match v {
            ActiveValue::Set(inner) => inner.clone(),
            _ => panic!("expected Set"),
        }
    }

    #[test]
    fn city_round_trips_through_the_row() {
        let record = city_record();
        let am = to_active_model(&record);

        let model = entity::Model {
            id: unwrap_set(&am.id),
            kind: unwrap_set(&am.kind),
            name: unwrap_set(&am.name),
            description: unwrap_set(&am.description),
            code: unwrap_set(&am.code),
            status: unwrap_set(&am.status),
            sort_order: unwrap_set(&am.sort_order),
            is_default: unwrap_set(&am.is_default),
            is_popular: unwrap_set(&am.is_popular),
            metadata: unwrap_set(&am.metadata),
            state: unwrap_set(&am.state),
            country: unwrap_set(&am.country),
            longitude: unwrap_set(&am.longitude),
            latitude: unwrap_set(&am.latitude),
            timezone: unwrap_set(&am.timezone),
            pin_codes: unwrap_set(&am.pin_codes),
            parent_id: unwrap_set(&am.parent_id),
            parent_kind: unwrap_set(&am.parent_kind),
            category: unwrap_set(&am.category),
            icon: unwrap_set(&am.icon),
            color: unwrap_set(&am.color),
            numeric_value: unwrap_set(&am.numeric_value),
            display_name: unwrap_set(&am.display_name),
            unit: unwrap_set(&am.unit),
            min_value: unwrap_set(&am.min_value),
            max_value: unwrap_set(&am.max_value),
            created_at: unwrap_set(&am.created_at),
            updated_at: unwrap_set(&am.updated_at),
        };

        let back = to_domain(model).expect("map back");
        assert_eq!(back, record);
    }

    #[test]
    fn corrupt_kind_is_a_database_error() {
        let record = city_record();
        let am = to_active_model(&record);
        let mut model = entity::Model {
            id: record.id,
            kind: "district".to_owned(),
            name: record.name.clone(),
            description: None,
            code: None,
            status: "active".to_owned(),
            sort_order: 0,
            is_default: false,
            is_popular: false,
            metadata: None,
            state: None,
            country: None,
            longitude: None,
            latitude: None,
            timezone: None,
            pin_codes: None,
            parent_id: None,
            parent_kind: None,
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
        model.state = unwrap_set(&am.state);
        let err = to_domain(model).expect_err("unknown kind");
        assert!(matches!(err, DomainError::Database(_)));
    }
}
