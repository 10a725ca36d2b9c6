use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use serde::Deserialize;
use uuid::Uuid;

use crate::availability;
use crate::engine::dispatch;
use crate::error::DispatchError;
use crate::models::courier::{Courier, CourierStatus};
use crate::models::order::{DeliveryStatus, Order};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/couriers", post(register_courier).get(list_couriers))
        .route("/couriers/available", get(list_available_couriers))
        .route("/couriers/:id/status", patch(update_courier_status))
        .route("/couriers/:id/location", patch(update_courier_location))
        .route("/couriers/:id/orders", get(list_courier_orders))
}

#[derive(Deserialize)]
pub struct RegisterCourierRequest {
    pub name: String,
    pub vehicle_type: String,
    pub vehicle_number: String,
    pub phone_number: String,
    pub working_area: String,
}

#[derive(Deserialize)]
pub struct AvailableQuery {
    pub area: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
pub struct CourierOrdersQuery {
    pub status: Option<String>,
}

async fn register_courier(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterCourierRequest>,
) -> Result<Json<Courier>, DispatchError> {
    if payload.name.trim().is_empty() {
        return Err(DispatchError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.vehicle_number.trim().is_empty() {
        return Err(DispatchError::BadRequest(
            "vehicle number cannot be empty".to_string(),
        ));
    }

    // Couriers come online by toggling their status after onboarding.
    let courier = Courier {
        id: Uuid::new_v4(),
        name: payload.name,
        vehicle_type: payload.vehicle_type,
        vehicle_number: payload.vehicle_number,
        phone_number: payload.phone_number,
        working_area: payload.working_area,
        status: CourierStatus::Inactive,
        is_online: false,
        current_latitude: None,
        current_longitude: None,
        last_location_update: None,
        last_online_time: None,
        total_deliveries: 0,
    };

    state.directory.register(courier.clone());
    Ok(Json(courier))
}

async fn list_couriers(State(state): State<Arc<AppState>>) -> Json<Vec<Courier>> {
    Json(state.directory.all())
}

async fn list_available_couriers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableQuery>,
) -> Json<Vec<Courier>> {
    Json(availability::list_available(
        &state.directory,
        query.area.as_deref(),
    ))
}

async fn update_courier_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Courier>, DispatchError> {
    let courier = availability::set_status(&state.directory, id, &payload.status)?;
    Ok(Json(courier))
}

async fn update_courier_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Courier>, DispatchError> {
    let courier = availability::update_location(&state.directory, id, payload.lat, payload.lng)?;
    Ok(Json(courier))
}

async fn list_courier_orders(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<CourierOrdersQuery>,
) -> Result<Json<Vec<Order>>, DispatchError> {
    let status_filter = match query.status.as_deref() {
        Some(raw) => Some(DeliveryStatus::parse(raw).ok_or_else(|| {
            DispatchError::InvalidStatus(format!("unknown delivery status: {raw}"))
        })?),
        None => None,
    };

    Ok(Json(dispatch::courier_orders(&state, id, status_filter)))
}
