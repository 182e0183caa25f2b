//! REST handlers, generic over the adapter seam.
//!
//! Handlers stay thin: parse input, call the adapter, map to the envelope.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use propdesk_http::{ApiEnvelope, ApiError, ListEnvelope};

use super::dto::{
    CityStatisticsDto, CreateMasterRequest, ListMastersQuery, MasterRecordDto, NearQuery,
    NearbyDto, PageQuery, RangeQuery, StatisticsDto, UpdateMasterRequest,
};
use crate::domain::adapters::{CategoryQueries, CityService, LocationService, MasterCrud, RangeQueries};
use crate::domain::model::GeoPoint;
use crate::domain::repo::MasterRepository;

pub async fn create_record<S: MasterCrud>(
    State(svc): State<Arc<S>>,
    Json(body): Json<CreateMasterRequest>,
) -> Result<Response, ApiError> {
    let label = svc.kind().label();
    let record = svc.create(body.into_new_record()).await?;
    Ok(ApiEnvelope::created(
        MasterRecordDto::from(record),
        format!("{label} created"),
    ))
}

pub async fn list_records<S: MasterCrud>(
    State(svc): State<Arc<S>>,
    Query(query): Query<ListMastersQuery>,
) -> Result<ListEnvelope<MasterRecordDto>, ApiError> {
    let page = svc.list(query.into_query()?).await?;
    Ok(ListEnvelope::ok(
        page.map(MasterRecordDto::from),
        format!("{} records fetched", svc.kind().label()),
    ))
}

pub async fn get_record<S: MasterCrud>(
    State(svc): State<Arc<S>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<MasterRecordDto>, ApiError> {
    let record = svc.get(id).await?;
    Ok(ApiEnvelope::ok(
        MasterRecordDto::from(record),
        format!("{} fetched", svc.kind().label()),
    ))
}

pub async fn update_record<S: MasterCrud>(
    State(svc): State<Arc<S>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMasterRequest>,
) -> Result<ApiEnvelope<MasterRecordDto>, ApiError> {
    let record = svc.update(id, body.into()).await?;
    Ok(ApiEnvelope::ok(
        MasterRecordDto::from(record),
        format!("{} updated", svc.kind().label()),
    ))
}

pub async fn delete_record<S: MasterCrud>(
    State(svc): State<Arc<S>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError> {
    svc.remove(id).await?;
    Ok(ApiEnvelope::message(format!(
        "{} archived",
        svc.kind().label()
    )))
}

pub async fn statistics<S: MasterCrud>(
    State(svc): State<Arc<S>>,
) -> Result<ApiEnvelope<StatisticsDto>, ApiError> {
    let stats = svc.statistics().await?;
    Ok(ApiEnvelope::ok(
        StatisticsDto::from(stats),
        format!("{} statistics fetched", svc.kind().label()),
    ))
}

pub async fn popular_records<S: MasterCrud>(
    State(svc): State<Arc<S>>,
) -> Result<ApiEnvelope<Vec<MasterRecordDto>>, ApiError> {
    let records = svc.popular().await?;
    Ok(ApiEnvelope::ok(
        records.into_iter().map(MasterRecordDto::from).collect(),
        format!("popular {} records fetched", svc.kind()),
    ))
}

pub async fn by_category<S: CategoryQueries>(
    State(svc): State<Arc<S>>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<ListEnvelope<MasterRecordDto>, ApiError> {
    let page = svc.find_by_category(&category, query.params()).await?;
    Ok(ListEnvelope::ok(
        page.map(MasterRecordDto::from),
        format!("{} records in category '{category}' fetched", svc.kind()),
    ))
}

pub async fn by_range<S: RangeQueries>(
    State(svc): State<Arc<S>>,
    Query(query): Query<RangeQuery>,
) -> Result<ListEnvelope<MasterRecordDto>, ApiError> {
    let params = propdesk_http::PageParams::new(query.page, query.limit);
    let page = svc.find_by_range(query.min, query.max, params).await?;
    Ok(ListEnvelope::ok(
        page.map(MasterRecordDto::from),
        format!("{} records in range fetched", svc.kind()),
    ))
}

// === City-specific handlers ===

pub async fn cities_near<R: MasterRepository>(
    State(svc): State<Arc<CityService<R>>>,
    Query(query): Query<NearQuery>,
) -> Result<ApiEnvelope<Vec<NearbyDto>>, ApiError> {
    let center = GeoPoint {
        longitude: query.lng,
        latitude: query.lat,
    };
    let nearby = svc.find_near(center, query.radius_km).await?;
    Ok(ApiEnvelope::ok(
        nearby.into_iter().map(NearbyDto::from).collect(),
        "nearby cities fetched",
    ))
}

pub async fn cities_by_state<R: MasterRepository>(
    State(svc): State<Arc<CityService<R>>>,
    Path(state): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<ListEnvelope<MasterRecordDto>, ApiError> {
    let page = svc.find_by_state(&state, query.params()).await?;
    Ok(ListEnvelope::ok(
        page.map(MasterRecordDto::from),
        format!("cities in {state} fetched"),
    ))
}

pub async fn city_statistics<R: MasterRepository>(
    State(svc): State<Arc<CityService<R>>>,
) -> Result<ApiEnvelope<CityStatisticsDto>, ApiError> {
    let stats = svc.city_statistics().await?;
    Ok(ApiEnvelope::ok(
        CityStatisticsDto::from(stats),
        "city statistics fetched",
    ))
}

// === Location-specific handlers ===

pub async fn locations_by_city<R: MasterRepository>(
    State(svc): State<Arc<LocationService<R>>>,
    Path(city_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<ListEnvelope<MasterRecordDto>, ApiError> {
    let page = svc.find_by_city(city_id, query.params()).await?;
    Ok(ListEnvelope::ok(
        page.map(MasterRecordDto::from),
        "locations fetched",
    ))
}
