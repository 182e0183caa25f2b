#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the master record store and its adapters,
//! running against an in-memory sqlite database with migrations applied.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use propdesk_http::PageParams;
use propdesk_masters::domain::adapters::{
    AmenityService, CityService, FloorService, LocationService, MasterCrud, RoomService,
};
use propdesk_masters::domain::model::{
    DetailsInput, GeoPoint, MasterKind, MasterPatch, MasterQuery, NewMasterRecord, RecordStatus,
};
use propdesk_masters::{DomainError, Migrator, SeaOrmMasterRepository};

async fn repo() -> Arc<SeaOrmMasterRepository> {
    // One connection: every pooled connection to sqlite::memory: would
    // otherwise see its own empty database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    Arc::new(SeaOrmMasterRepository::new(db))
}

fn city(name: &str, state: &str) -> NewMasterRecord {
    NewMasterRecord {
        name: name.to_owned(),
        details: DetailsInput {
            state: Some(state.to_owned()),
            ..DetailsInput::default()
        },
        ..NewMasterRecord::default()
    }
}

fn city_at(name: &str, state: &str, lng: f64, lat: f64) -> NewMasterRecord {
    let mut input = city(name, state);
    input.details.coordinates = Some(GeoPoint {
        longitude: lng,
        latitude: lat,
    });
    input
}

fn floor(name: Option<&str>, value: i32) -> NewMasterRecord {
    NewMasterRecord {
        name: name.map_or_else(|| format!("Floor {value}"), ToOwned::to_owned),
        details: DetailsInput {
            value: Some(value),
            ..DetailsInput::default()
        },
        ..NewMasterRecord::default()
    }
}

#[tokio::test]
async fn duplicate_name_conflicts_until_archived() {
    let repo = repo().await;
    let cities = CityService::new(repo);

    let first = cities.create(city("Pune", "Maharashtra")).await.expect("first create");
    let err = cities
        .create(city("Pune", "Maharashtra"))
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");

    // Archiving frees the name.
    MasterCrud::remove(&cities, first.id).await.expect("archive");
    cities
        .create(city("Pune", "Maharashtra"))
        .await
        .expect("name free after archive");
}

#[tokio::test]
async fn code_uniqueness_is_scoped_per_kind() {
    let repo = repo().await;
    let cities = CityService::new(repo.clone());
    let amenities = AmenityService::new(repo);

    let mut input = city("Pune", "Maharashtra");
    input.code = Some("A1".to_owned());
    cities.create(input).await.expect("city with code");

    // Same code in another kind is fine.
    let amenity = NewMasterRecord {
        name: "Gym".to_owned(),
        code: Some("A1".to_owned()),
        details: DetailsInput {
            category: Some("fitness".to_owned()),
            ..DetailsInput::default()
        },
        ..NewMasterRecord::default()
    };
    amenities.create(amenity).await.expect("cross-kind code reuse");

    // Same code in the same kind conflicts.
    let mut second = city("Mumbai", "Maharashtra");
    second.code = Some("A1".to_owned());
    let err = cities.create(second).await.expect_err("duplicate code");
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn remove_is_terminal_and_idempotent_in_error_class() {
    let repo = repo().await;
    let cities = CityService::new(repo);

    let pune = cities.create(city("Pune", "Maharashtra")).await.expect("create");
    MasterCrud::remove(&cities, pune.id).await.expect("first remove");

    // The archived record is invisible to default reads.
    let err = cities.get(pune.id).await.expect_err("archived is gone");
    assert!(matches!(err, DomainError::NotFound { .. }));

    // Second remove reports NotFound, not some other class.
    let err = MasterCrud::remove(&cities, pune.id)
        .await
        .expect_err("second remove");
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn archived_records_are_listable_only_on_request() {
    let repo = repo().await;
    let cities = CityService::new(repo);

    let pune = cities.create(city("Pune", "Maharashtra")).await.expect("create");
    MasterCrud::remove(&cities, pune.id).await.expect("archive");

    let default_page = cities.list(MasterQuery::default()).await.expect("list");
    assert_eq!(default_page.pagination.total, 0);

    let archived_page = cities
        .list(MasterQuery {
            status: Some(RecordStatus::Archived),
            ..MasterQuery::default()
        })
        .await
        .expect("list archived");
    assert_eq!(archived_page.pagination.total, 1);
}

#[tokio::test]
async fn pagination_law_holds() {
    let repo = repo().await;
    let floors = FloorService::new(repo);

    for value in 0..7 {
        floors.create(floor(None, value)).await.expect("create floor");
    }

    let limit = 3u64;
    let first = floors
        .list(MasterQuery {
            page: PageParams::new(Some(1), Some(limit)),
            ..MasterQuery::default()
        })
        .await
        .expect("page 1");
    assert_eq!(first.pagination.total, 7);
    assert_eq!(first.pagination.total_pages, 3);

    let mut seen = Vec::new();
    for page_no in 1..=first.pagination.total_pages {
        let page = floors
            .list(MasterQuery {
                page: PageParams::new(Some(page_no), Some(limit)),
                ..MasterQuery::default()
            })
            .await
            .expect("page");
        seen.extend(page.records.into_iter().map(|r| r.id));
    }
    assert_eq!(seen.len(), 7);
    let mut deduped = seen.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 7, "concatenated pages repeat a record");
}

#[tokio::test]
async fn location_requires_live_parent_city() {
    let repo = repo().await;
    let cities = CityService::new(repo.clone());
    let locations = LocationService::new(repo);

    // Unknown parent is rejected before any write.
    let orphan = NewMasterRecord {
        name: "Kothrud".to_owned(),
        details: DetailsInput {
            parent_id: Some(Uuid::now_v7()),
            ..DetailsInput::default()
        },
        ..NewMasterRecord::default()
    };
    let err = locations.create(orphan.clone()).await.expect_err("no parent");
    assert!(matches!(err, DomainError::Validation { .. }));
    let total = locations
        .list(MasterQuery::default())
        .await
        .expect("list")
        .pagination
        .total;
    assert_eq!(total, 0, "failed create must not write");

    // An archived parent is as bad as a missing one.
    let pune = cities.create(city("Pune", "Maharashtra")).await.expect("create");
    MasterCrud::remove(&cities, pune.id).await.expect("archive");
    let mut child = orphan;
    child.details.parent_id = Some(pune.id);
    let err = child_create_err(&locations, child).await;
    assert!(matches!(err, DomainError::Validation { .. }));
}

async fn child_create_err(
    locations: &LocationService<SeaOrmMasterRepository>,
    input: NewMasterRecord,
) -> DomainError {
    locations.create(input).await.expect_err("archived parent")
}

#[tokio::test]
async fn archiving_a_city_does_not_cascade_to_locations() {
    let repo = repo().await;
    let cities = CityService::new(repo.clone());
    let locations = LocationService::new(repo);

    let pune = cities.create(city("Pune", "Maharashtra")).await.expect("create city");
    let kothrud = locations
        .create(NewMasterRecord {
            name: "Kothrud".to_owned(),
            details: DetailsInput {
                parent_id: Some(pune.id),
                ..DetailsInput::default()
            },
            ..NewMasterRecord::default()
        })
        .await
        .expect("create location");
    assert_eq!(
        kothrud.details.as_parent().map(|p| p.parent_kind),
        Some(MasterKind::City)
    );

    MasterCrud::remove(&cities, pune.id).await.expect("archive city");
    assert!(cities.get(pune.id).await.is_err());

    // The location survives and stays retrievable.
    let still_there = locations.get(kothrud.id).await.expect("location remains");
    assert_eq!(still_there.name, "Kothrud");
}

#[tokio::test]
async fn floor_display_names_are_derived() {
    let repo = repo().await;
    let floors = FloorService::new(repo);

    let ground = floors
        .create(floor(Some("Ground Floor"), 0))
        .await
        .expect("ground");
    assert_eq!(
        ground.details.as_numeric().and_then(|n| n.display_name.as_deref()),
        Some("Ground Floor")
    );

    let basement = floors.create(floor(None, -2)).await.expect("basement");
    assert_eq!(
        basement
            .details
            .as_numeric()
            .and_then(|n| n.display_name.as_deref()),
        Some("Basement 2")
    );

    let third = floors.create(floor(None, 3)).await.expect("third");
    assert_eq!(
        third.details.as_numeric().and_then(|n| n.display_name.as_deref()),
        Some("3rd Floor")
    );
}

#[tokio::test]
async fn numeric_range_query_filters_by_value() {
    let repo = repo().await;
    let rooms = RoomService::new(repo);

    for value in 1..=5 {
        rooms
            .create(NewMasterRecord {
                name: format!("{value} BHK"),
                details: DetailsInput {
                    value: Some(value),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await
            .expect("create room");
    }

    let page = rooms
        .find_by_range(Some(2), Some(4), PageParams::default())
        .await
        .expect("range");
    assert_eq!(page.pagination.total, 3);
    assert!(page
        .records
        .iter()
        .all(|r| (2..=4).contains(&r.details.as_numeric().map_or(0, |n| n.value))));

    // Inverted bounds are rejected.
    assert!(rooms
        .find_by_range(Some(4), Some(2), PageParams::default())
        .await
        .is_err());
}

#[tokio::test]
async fn proximity_query_orders_by_distance() {
    let repo = repo().await;
    let cities = CityService::new(repo);

    cities
        .create(city_at("Pune", "Maharashtra", 73.8567, 18.5204))
        .await
        .expect("pune");
    cities
        .create(city_at("Mumbai", "Maharashtra", 72.8777, 19.0760))
        .await
        .expect("mumbai");
    cities
        .create(city_at("Delhi", "Delhi", 77.1025, 28.7041))
        .await
        .expect("delhi");
    // A city without coordinates never matches.
    cities
        .create(city("Nagpur", "Maharashtra"))
        .await
        .expect("nagpur");

    let center = GeoPoint {
        longitude: 73.8567,
        latitude: 18.5204,
    };
    let nearby = cities.find_near(center, 200.0).await.expect("near");
    let names: Vec<&str> = nearby.iter().map(|n| n.record.name.as_str()).collect();
    assert_eq!(names, vec!["Pune", "Mumbai"]);
    assert!(nearby[0].distance_km < 1.0);
    assert!((100.0..200.0).contains(&nearby[1].distance_km));

    assert!(cities.find_near(center, 0.0).await.is_err());
}

#[tokio::test]
async fn update_revalidates_against_other_records() {
    let repo = repo().await;
    let cities = CityService::new(repo);

    cities.create(city("Pune", "Maharashtra")).await.expect("pune");
    let mumbai = cities.create(city("Mumbai", "Maharashtra")).await.expect("mumbai");

    // Renaming Mumbai to Pune collides with the other record.
    let err = cities
        .update(
            mumbai.id,
            MasterPatch {
                name: Some("Pune".to_owned()),
                ..MasterPatch::default()
            },
        )
        .await
        .expect_err("rename collision");
    assert!(matches!(err, DomainError::Conflict(_)));

    // A no-collision update goes through and flips status.
    let updated = cities
        .update(
            mumbai.id,
            MasterPatch {
                status: Some(RecordStatus::Inactive),
                ..MasterPatch::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.status, RecordStatus::Inactive);

    // Archival is not reachable through update.
    let err = cities
        .update(
            mumbai.id,
            MasterPatch {
                status: Some(RecordStatus::Archived),
                ..MasterPatch::default()
            },
        )
        .await
        .expect_err("archive via update");
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn search_and_flags_filter_listings() {
    let repo = repo().await;
    let amenities = AmenityService::new(repo);

    for (name, category, popular) in [
        ("Swimming Pool", "leisure", true),
        ("Gymnasium", "fitness", true),
        ("CCTV", "security", false),
    ] {
        amenities
            .create(NewMasterRecord {
                name: name.to_owned(),
                is_popular: Some(popular),
                details: DetailsInput {
                    category: Some(category.to_owned()),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await
            .expect("create amenity");
    }

    let hits = amenities
        .list(MasterQuery {
            search: Some("gym".to_owned()),
            ..MasterQuery::default()
        })
        .await
        .expect("search");
    assert_eq!(hits.pagination.total, 1);
    assert_eq!(hits.records[0].name, "Gymnasium");

    let popular = amenities.popular().await.expect("popular");
    assert_eq!(popular.len(), 2);

    let by_cat = amenities
        .find_by_category("security", PageParams::default())
        .await
        .expect("by category");
    assert_eq!(by_cat.pagination.total, 1);
    assert_eq!(by_cat.records[0].name, "CCTV");
}

#[tokio::test]
async fn statistics_reflect_status_and_values() {
    let repo = repo().await;
    let floors = FloorService::new(repo.clone());
    let cities = CityService::new(repo);

    for value in [-1, 0, 5] {
        floors.create(floor(None, value)).await.expect("floor");
    }
    let extra = floors.create(floor(None, 12)).await.expect("floor");
    floors
        .update(
            extra.id,
            MasterPatch {
                status: Some(RecordStatus::Inactive),
                ..MasterPatch::default()
            },
        )
        .await
        .expect("deactivate");

    let stats = MasterCrud::statistics(&floors).await.expect("stats");
    assert_eq!(stats.total, 4);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.inactive, 1);
    let bounds = stats.value_bounds.expect("bounds");
    assert_eq!((bounds.min, bounds.max), (-1, 12));

    cities.create(city("Pune", "Maharashtra")).await.expect("pune");
    cities.create(city("Nashik", "Maharashtra")).await.expect("nashik");
    cities.create(city("Jaipur", "Rajasthan")).await.expect("jaipur");
    let city_stats = cities.city_statistics().await.expect("city stats");
    let maharashtra = city_stats
        .by_state
        .iter()
        .find(|b| b.key == "Maharashtra")
        .expect("bucket");
    assert_eq!(maharashtra.count, 2);
}
