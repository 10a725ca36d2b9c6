use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::dispatch;
use crate::error::DispatchError;
use crate::models::event::ShipperIdentity;
use crate::models::order::{DeliveryStatus, Order};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/assign", post(assign_order))
        .route("/orders/:id/auto-assign", post(auto_assign_order))
        .route("/orders/:id/unassign", post(unassign_order))
        .route("/orders/:id/accept", post(accept_order))
        .route("/orders/:id/reject", post(reject_order))
        .route("/orders/:id/status", post(update_order_status))
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub delivery_address: String,
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub courier_id: Uuid,
}

#[derive(Deserialize)]
pub struct AcceptRequest {
    pub courier_id: Uuid,
}

#[derive(Deserialize)]
pub struct RejectRequest {
    pub courier_id: Uuid,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub courier_id: Uuid,
    pub status: String,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, DispatchError> {
    if payload.delivery_address.trim().is_empty() {
        return Err(DispatchError::BadRequest(
            "delivery address cannot be empty".to_string(),
        ));
    }

    let order = Order::preparing(payload.delivery_address);
    state.orders.insert(order.clone());
    Ok(Json(order))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, DispatchError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| DispatchError::NotFound(format!("order {id} not found")))?;

    Ok(Json(order))
}

async fn assign_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<Order>, DispatchError> {
    let order = dispatch::assign_order(&state, id, payload.courier_id)?;
    Ok(Json(order))
}

async fn auto_assign_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, DispatchError> {
    let order = dispatch::auto_assign_order(&state, id)?;
    Ok(Json(order))
}

async fn unassign_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, DispatchError> {
    let order = dispatch::unassign_order(&state, id)?;
    Ok(Json(order))
}

async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcceptRequest>,
) -> Result<Json<Order>, DispatchError> {
    let identity = ShipperIdentity::new(payload.courier_id);
    let order = dispatch::accept_order(&state, id, identity)?;
    Ok(Json(order))
}

async fn reject_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<Order>, DispatchError> {
    let identity = ShipperIdentity::new(payload.courier_id);
    let order = dispatch::reject_order(&state, id, identity, payload.reason)?;
    Ok(Json(order))
}

async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, DispatchError> {
    let new_status = DeliveryStatus::parse(&payload.status).ok_or_else(|| {
        DispatchError::InvalidStatus(format!("unknown delivery status: {}", payload.status))
    })?;

    let identity = ShipperIdentity::new(payload.courier_id);
    let order = dispatch::update_order_status(&state, id, identity, new_status)?;
    Ok(Json(order))
}
