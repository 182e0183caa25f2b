//! Builders and mergers for the kind-specific payloads.

use crate::domain::error::DomainError;
use crate::domain::model::{CategoryDetails, DetailsInput, GeoDetails, GeoPoint, NumericDetails};

pub(super) fn validate_point(point: GeoPoint) -> Result<GeoPoint, DomainError> {
    if !(-180.0..=180.0).contains(&point.longitude) {
        return Err(DomainError::validation(
            "coordinates",
            "longitude must be within [-180, 180]",
        ));
    }
    if !(-90.0..=90.0).contains(&point.latitude) {
        return Err(DomainError::validation(
            "coordinates",
            "latitude must be within [-90, 90]",
        ));
    }
    Ok(point)
}

fn clean_pin_codes(codes: Vec<String>) -> Vec<String> {
    codes
        .into_iter()
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
        .collect()
}

pub(super) fn build_geo(input: &DetailsInput) -> Result<GeoDetails, DomainError> {
    let state = input
        .state
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::validation("state", "is required for cities"))?;
    let coordinates = input.coordinates.map(validate_point).transpose()?;
    Ok(GeoDetails {
        state: state.to_owned(),
        country: input.country.clone(),
        coordinates,
        timezone: input.timezone.clone(),
        pin_codes: clean_pin_codes(input.pin_codes.clone().unwrap_or_default()),
    })
}

pub(super) fn merge_geo(
    current: &GeoDetails,
    input: &DetailsInput,
) -> Result<GeoDetails, DomainError> {
    let state = match input.state.as_deref().map(str::trim) {
        Some("") => {
            return Err(DomainError::validation("state", "must not be empty"));
        }
        Some(s) => s.to_owned(),
        None => current.state.clone(),
    };
    let coordinates = match input.coordinates {
        Some(p) => Some(validate_point(p)?),
        None => current.coordinates,
    };
    Ok(GeoDetails {
        state,
        country: input.country.clone().or_else(|| current.country.clone()),
        coordinates,
        timezone: input.timezone.clone().or_else(|| current.timezone.clone()),
        pin_codes: match input.pin_codes.clone() {
            Some(codes) => clean_pin_codes(codes),
            None => current.pin_codes.clone(),
        },
    })
}

pub(super) fn build_category(input: &DetailsInput) -> Result<CategoryDetails, DomainError> {
    let category = input
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| DomainError::validation("category", "is required"))?;
    Ok(CategoryDetails {
        category: category.to_owned(),
        icon: input.icon.clone(),
        color: input.color.clone(),
    })
}

pub(super) fn merge_category(
    current: &CategoryDetails,
    input: &DetailsInput,
) -> Result<CategoryDetails, DomainError> {
    let category = match input.category.as_deref().map(str::trim) {
        Some("") => {
            return Err(DomainError::validation("category", "must not be empty"));
        }
        Some(c) => c.to_owned(),
        None => current.category.clone(),
    };
    Ok(CategoryDetails {
        category,
        icon: input.icon.clone().or_else(|| current.icon.clone()),
        color: input.color.clone().or_else(|| current.color.clone()),
    })
}

fn check_bounds(min: Option<i32>, max: Option<i32>) -> Result<(), DomainError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(DomainError::validation(
                "minValue",
                "must not exceed maxValue",
            ));
        }
    }
    Ok(())
}

pub(super) fn build_numeric(input: &DetailsInput) -> Result<NumericDetails, DomainError> {
    let value = input
        .value
        .ok_or_else(|| DomainError::validation("value", "numeric value is required"))?;
    check_bounds(input.min_value, input.max_value)?;
    Ok(NumericDetails {
        value,
        display_name: input.display_name.clone(),
        unit: input.unit.clone(),
        min_value: input.min_value,
        max_value: input.max_value,
    })
}

pub(super) fn merge_numeric(
    current: &NumericDetails,
    input: &DetailsInput,
) -> Result<NumericDetails, DomainError> {
    let min_value = input.min_value.or(current.min_value);
    let max_value = input.max_value.or(current.max_value);
    check_bounds(min_value, max_value)?;
    Ok(NumericDetails {
        value: input.value.unwrap_or(current.value),
        display_name: input
            .display_name
            .clone()
            .or_else(|| current.display_name.clone()),
        unit: input.unit.clone().or_else(|| current.unit.clone()),
        min_value,
        max_value,
    })
}

/// Validate a range-query pair.
pub(super) fn validate_range(min: Option<i32>, max: Option<i32>) -> Result<(), DomainError> {
    check_bounds(min, max)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn geo_requires_state() {
        let err = build_geo(&DetailsInput::default()).expect_err("state missing");
        assert!(matches!(err, DomainError::Validation { .. }));

        let input = DetailsInput {
            state: Some("Maharashtra".to_owned()),
            ..DetailsInput::default()
        };
        let geo = build_geo(&input).expect("valid");
        assert_eq!(geo.state, "Maharashtra");
        assert!(geo.pin_codes.is_empty());
    }

    #[test]
    fn geo_rejects_out_of_range_coordinates() {
        let input = DetailsInput {
            state: Some("Maharashtra".to_owned()),
            coordinates: Some(GeoPoint {
                longitude: 200.0,
                latitude: 18.5,
            }),
            ..DetailsInput::default()
        };
        assert!(build_geo(&input).is_err());
    }

    #[test]
    fn pin_codes_are_cleaned() {
        let input = DetailsInput {
            state: Some("Maharashtra".to_owned()),
            pin_codes: Some(vec![" 411001 ".to_owned(), String::new()]),
            ..DetailsInput::default()
        };
        let geo = build_geo(&input).expect("valid");
        assert_eq!(geo.pin_codes, vec!["411001"]);
    }

    #[test]
    fn numeric_requires_value_and_sane_bounds() {
        assert!(build_numeric(&DetailsInput::default()).is_err());

        let input = DetailsInput {
            value: Some(3),
            min_value: Some(5),
            max_value: Some(1),
            ..DetailsInput::default()
        };
        assert!(build_numeric(&input).is_err());
    }

    #[test]
    fn merge_keeps_unpatched_fields() {
        let current = NumericDetails {
            value: 2,
            display_name: Some("2nd Floor".to_owned()),
            unit: Some("floor".to_owned()),
            min_value: None,
            max_value: None,
        };
        let merged = merge_numeric(
            &current,
            &DetailsInput {
                value: Some(5),
                ..DetailsInput::default()
            },
        )
        .expect("valid");
        assert_eq!(merged.value, 5);
        assert_eq!(merged.unit.as_deref(), Some("floor"));
    }
}
