//! Great-circle distance helpers for the proximity queries.
//!
//! Distances are haversine over a spherical earth, in kilometres. Candidate
//! rows are prefiltered with a bounding box in SQL; the exact distance check
//! happens here.

use super::model::GeoPoint;

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude window around a point, for SQL prefiltering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl BoundingBox {
    /// Box that fully contains the circle of `radius_km` around `center`.
    ///
    /// Longitude spread widens with latitude; near the poles the box
    /// degenerates to the full longitude range rather than dividing by ~0.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = (radius_km / EARTH_RADIUS_KM).to_degrees();
        let cos_lat = center.latitude.to_radians().cos();
        let lng_delta = if cos_lat.abs() < 1e-6 {
            180.0
        } else {
            lat_delta / cos_lat
        };
        Self {
            min_longitude: (center.longitude - lng_delta).max(-180.0),
            max_longitude: (center.longitude + lng_delta).min(180.0),
            min_latitude: (center.latitude - lat_delta).max(-90.0),
            max_latitude: (center.latitude + lat_delta).min(90.0),
        }
    }
}

/// Haversine great-circle distance between two points, in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUNE: GeoPoint = GeoPoint {
        longitude: 73.8567,
        latitude: 18.5204,
    };
    const MUMBAI: GeoPoint = GeoPoint {
        longitude: 72.8777,
        latitude: 19.0760,
    };

    #[test]
    fn zero_distance_to_self() {
        assert!(haversine_km(PUNE, PUNE) < 1e-9);
    }

    #[test]
    fn pune_to_mumbai_is_about_120_km() {
        let d = haversine_km(PUNE, MUMBAI);
        assert!((100.0..140.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(PUNE, MUMBAI);
        let ba = haversine_km(MUMBAI, PUNE);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_contains_radius() {
        let bbox = BoundingBox::around(PUNE, 50.0);
        assert!(bbox.min_latitude < PUNE.latitude);
        assert!(bbox.max_latitude > PUNE.latitude);
        assert!(bbox.min_longitude < PUNE.longitude);
        assert!(bbox.max_longitude > PUNE.longitude);
        // Mumbai is ~120 km away and must fall outside a 50 km box's circle
        // but the box itself is only a prefilter; the exact check is the
        // haversine distance.
        assert!(haversine_km(PUNE, MUMBAI) > 50.0);
    }

    #[test]
    fn polar_box_spans_all_longitudes() {
        let pole = GeoPoint {
            longitude: 0.0,
            latitude: 90.0,
        };
        let bbox = BoundingBox::around(pole, 10.0);
        assert_eq!(bbox.min_longitude, -180.0);
        assert_eq!(bbox.max_longitude, 180.0);
    }
}
