use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::availability;
use crate::engine::selection::least_loaded;
use crate::error::DispatchError;
use crate::models::event::{DispatchEvent, ShipperIdentity};
use crate::models::order::{DeliveryStatus, Order};
use crate::state::AppState;

fn instrumented<T>(
    state: &AppState,
    op: &'static str,
    run: impl FnOnce() -> Result<T, DispatchError>,
) -> Result<T, DispatchError> {
    let result = run();
    let outcome = if result.is_ok() { "success" } else { "error" };
    state
        .metrics
        .dispatch_ops_total
        .with_label_values(&[op, outcome])
        .inc();
    result
}

/// Manual assignment. No eligibility check: an admin override may hand an
/// order to any known courier, and re-assignment silently replaces the
/// previous one.
pub fn assign_order(
    state: &AppState,
    order_id: Uuid,
    courier_id: Uuid,
) -> Result<Order, DispatchError> {
    instrumented(state, "assign", || assign(state, order_id, courier_id))
}

/// Least-loaded assignment over the unfiltered eligible pool. The workload
/// counts are read without a global lock; under contention two orders may
/// land on the same least-loaded courier, which degrades fairness only.
pub fn auto_assign_order(state: &AppState, order_id: Uuid) -> Result<Order, DispatchError> {
    instrumented(state, "auto_assign", || {
        let start = Instant::now();
        let result = auto_assign(state, order_id);

        let outcome = if result.is_ok() { "success" } else { "error" };
        state
            .metrics
            .auto_assign_latency_seconds
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        result
    })
}

fn auto_assign(state: &AppState, order_id: Uuid) -> Result<Order, DispatchError> {
    if state.orders.get(&order_id).is_none() {
        return Err(DispatchError::NotFound(format!("order {order_id} not found")));
    }

    let pool = availability::list_available(&state.directory, None);
    state.metrics.assignable_couriers.set(pool.len() as i64);

    let chosen = least_loaded(&pool, |courier| state.orders.count_active(courier.id))
        .ok_or(DispatchError::NoCourierAvailable)?;
    let chosen_id = chosen.id;

    info!(order_id = %order_id, courier_id = %chosen_id, "least-loaded courier selected");
    assign(state, order_id, chosen_id)
}

fn assign(state: &AppState, order_id: Uuid, courier_id: Uuid) -> Result<Order, DispatchError> {
    if !state.directory.contains(&courier_id) {
        return Err(DispatchError::NotFound(format!("courier {courier_id} not found")));
    }

    let updated = state.orders.update(order_id, |order| {
        order.assigned_courier = Some(courier_id);
        order.assigned_at = Some(Utc::now());
        order.delivery_status = DeliveryStatus::WaitingForShipper;
        Ok(order.clone())
    })?;

    let _ = state.dispatch_events_tx.send(DispatchEvent::now(
        order_id,
        Some(courier_id),
        updated.delivery_status,
    ));

    info!(order_id = %order_id, courier_id = %courier_id, "order assigned");
    Ok(updated)
}

/// Clears the assignment and returns the order to PREPARING. Succeeds from
/// any state, so repeated calls are harmless.
pub fn unassign_order(state: &AppState, order_id: Uuid) -> Result<Order, DispatchError> {
    instrumented(state, "unassign", || {
        let updated = state.orders.update(order_id, |order| {
            order.assigned_courier = None;
            order.assigned_at = None;
            order.delivery_status = DeliveryStatus::Preparing;
            Ok(order.clone())
        })?;

        let _ = state
            .dispatch_events_tx
            .send(DispatchEvent::now(order_id, None, updated.delivery_status));

        info!(order_id = %order_id, "order unassigned");
        Ok(updated)
    })
}

/// Courier-side claim. No ownership precondition: a courier may claim an
/// unassigned or differently-assigned order, matching the legacy contract.
pub fn accept_order(
    state: &AppState,
    order_id: Uuid,
    identity: ShipperIdentity,
) -> Result<Order, DispatchError> {
    instrumented(state, "accept", || {
        let courier_id = identity.courier_id;
        if !state.directory.contains(&courier_id) {
            return Err(DispatchError::NotFound(format!("courier {courier_id} not found")));
        }

        let updated = state.orders.update(order_id, |order| {
            order.assigned_courier = Some(courier_id);
            order.assigned_at = Some(Utc::now());
            order.delivery_status = DeliveryStatus::Accepted;
            Ok(order.clone())
        })?;

        let _ = state.dispatch_events_tx.send(DispatchEvent::now(
            order_id,
            Some(courier_id),
            updated.delivery_status,
        ));

        info!(order_id = %order_id, courier_id = %courier_id, "order accepted");
        Ok(updated)
    })
}

/// Writes the new status verbatim after the ownership check; the check and
/// the write happen under the same entry guard. No transition table is
/// enforced here, the boundary already restricted the value to the closed
/// status set.
pub fn update_order_status(
    state: &AppState,
    order_id: Uuid,
    identity: ShipperIdentity,
    new_status: DeliveryStatus,
) -> Result<Order, DispatchError> {
    instrumented(state, "update_status", || {
        let courier_id = identity.courier_id;

        let updated = state.orders.update(order_id, |order| {
            if order.assigned_courier != Some(courier_id) {
                return Err(DispatchError::Unauthorized(format!(
                    "order {order_id} is not assigned to courier {courier_id}"
                )));
            }

            order.delivery_status = new_status;
            Ok(order.clone())
        })?;

        if new_status == DeliveryStatus::Delivered {
            match state.directory.record_delivery(courier_id) {
                Ok(()) => state.metrics.deliveries_completed_total.inc(),
                Err(err) => {
                    warn!(courier_id = %courier_id, error = %err, "failed to record delivery")
                }
            }
        }

        let _ = state.dispatch_events_tx.send(DispatchEvent::now(
            order_id,
            Some(courier_id),
            updated.delivery_status,
        ));

        info!(order_id = %order_id, courier_id = %courier_id, status = ?new_status, "delivery status updated");
        Ok(updated)
    })
}

/// Rejection by the current assignee. Clears the assignment together with
/// the status write; the reason is carried on the event and the audit log,
/// never validated.
pub fn reject_order(
    state: &AppState,
    order_id: Uuid,
    identity: ShipperIdentity,
    reason: String,
) -> Result<Order, DispatchError> {
    instrumented(state, "reject", || {
        let courier_id = identity.courier_id;

        let updated = state.orders.update(order_id, |order| {
            if order.assigned_courier != Some(courier_id) {
                return Err(DispatchError::Unauthorized(format!(
                    "order {order_id} is not assigned to courier {courier_id}"
                )));
            }

            order.assigned_courier = None;
            order.assigned_at = None;
            order.delivery_status = DeliveryStatus::Rejected;
            Ok(order.clone())
        })?;

        warn!(order_id = %order_id, courier_id = %courier_id, reason = %reason, "order rejected by courier");

        let _ = state.dispatch_events_tx.send(
            DispatchEvent::now(order_id, Some(courier_id), updated.delivery_status)
                .with_reason(reason),
        );

        Ok(updated)
    })
}

/// Orders assigned to the courier in the given status; defaults to the
/// "currently delivering" view rather than full history.
pub fn courier_orders(
    state: &AppState,
    courier_id: Uuid,
    status_filter: Option<DeliveryStatus>,
) -> Vec<Order> {
    let status = status_filter.unwrap_or(DeliveryStatus::Delivering);
    state.orders.find_by_courier(courier_id, status)
}
