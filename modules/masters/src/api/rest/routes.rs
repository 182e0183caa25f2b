//! Router assembly: one resource path per master kind.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::domain::adapters::{
    AmenityService, CategoryQueries, CityService, FloorService, LocationService, MasterCrud,
    PropertyTypeService, RangeQueries, RoomService, TowerService, WashroomService,
};
use crate::domain::repo::MasterRepository;

/// All eight adapter services over one repository.
pub struct MasterServices<R: MasterRepository> {
    pub cities: Arc<CityService<R>>,
    pub locations: Arc<LocationService<R>>,
    pub amenities: Arc<AmenityService<R>>,
    pub floors: Arc<FloorService<R>>,
    pub towers: Arc<TowerService<R>>,
    pub property_types: Arc<PropertyTypeService<R>>,
    pub rooms: Arc<RoomService<R>>,
    pub washrooms: Arc<WashroomService<R>>,
}

impl<R: MasterRepository + 'static> MasterServices<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            cities: Arc::new(CityService::new(repo.clone())),
            locations: Arc::new(LocationService::new(repo.clone())),
            amenities: Arc::new(AmenityService::new(repo.clone())),
            floors: Arc::new(FloorService::new(repo.clone())),
            towers: Arc::new(TowerService::new(repo.clone())),
            property_types: Arc::new(PropertyTypeService::new(repo.clone())),
            rooms: Arc::new(RoomService::new(repo.clone())),
            washrooms: Arc::new(WashroomService::new(repo)),
        }
    }
}

/// Shared CRUD routes; statistics is added per kind so cities can serve
/// their augmented payload on the same path.
fn base_routes<S: MasterCrud + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route(
            "/",
            post(handlers::create_record::<S>).get(handlers::list_records::<S>),
        )
        .route("/popular", get(handlers::popular_records::<S>))
        .route(
            "/{id}",
            get(handlers::get_record::<S>)
                .patch(handlers::update_record::<S>)
                .delete(handlers::delete_record::<S>),
        )
}

fn cities_routes<R: MasterRepository + 'static>(svc: Arc<CityService<R>>) -> Router {
    base_routes::<CityService<R>>()
        .route("/statistics", get(handlers::city_statistics::<R>))
        .route("/near", get(handlers::cities_near::<R>))
        .route("/by-state/{state}", get(handlers::cities_by_state::<R>))
        .with_state(svc)
}

fn locations_routes<R: MasterRepository + 'static>(svc: Arc<LocationService<R>>) -> Router {
    base_routes::<LocationService<R>>()
        .route("/statistics", get(handlers::statistics::<LocationService<R>>))
        .route(
            "/by-city/{cityId}",
            get(handlers::locations_by_city::<R>),
        )
        .with_state(svc)
}

fn categorized_routes<S: CategoryQueries + 'static>(svc: Arc<S>) -> Router {
    base_routes::<S>()
        .route("/statistics", get(handlers::statistics::<S>))
        .route("/by-category/{category}", get(handlers::by_category::<S>))
        .with_state(svc)
}

fn ranged_routes<S: RangeQueries + 'static>(svc: Arc<S>) -> Router {
    base_routes::<S>()
        .route("/statistics", get(handlers::statistics::<S>))
        .route("/range", get(handlers::by_range::<S>))
        .with_state(svc)
}

/// The `/masters` subtree.
pub fn master_routes<R: MasterRepository + 'static>(services: &MasterServices<R>) -> Router {
    Router::new()
        .nest("/cities", cities_routes(services.cities.clone()))
        .nest("/locations", locations_routes(services.locations.clone()))
        .nest("/amenities", categorized_routes(services.amenities.clone()))
        .nest("/floors", ranged_routes(services.floors.clone()))
        .nest("/towers", ranged_routes(services.towers.clone()))
        .nest(
            "/property-types",
            categorized_routes(services.property_types.clone()),
        )
        .nest("/rooms", ranged_routes(services.rooms.clone()))
        .nest("/washrooms", ranged_routes(services.washrooms.clone()))
}
