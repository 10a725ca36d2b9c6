use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::DispatchError;
use crate::models::courier::{Courier, CourierStatus};
use crate::store::couriers::CourierDirectory;

/// Couriers currently eligible for dispatch: online and ACTIVE, optionally
/// restricted to those whose working area contains `area_filter`
/// (case-sensitive substring, matching legacy behavior). Sorted by courier
/// id so the same pool always comes back in the same order.
pub fn list_available(directory: &CourierDirectory, area_filter: Option<&str>) -> Vec<Courier> {
    let mut pool: Vec<Courier> = directory
        .all()
        .into_iter()
        .filter(|courier| courier.is_assignable())
        .filter(|courier| {
            area_filter.is_none_or(|area| courier.working_area.contains(area))
        })
        .collect();

    pool.sort_by_key(|courier| courier.id);
    pool
}

pub fn update_location(
    directory: &CourierDirectory,
    id: Uuid,
    lat: f64,
    lng: f64,
) -> Result<Courier, DispatchError> {
    directory.update(id, |courier| {
        courier.current_latitude = Some(lat);
        courier.current_longitude = Some(lng);
        courier.last_location_update = Some(Utc::now());
        courier.clone()
    })
}

/// Applies a status change with its online/offline side effects in a single
/// guarded write: OFFLINE forces the courier offline and stamps
/// `last_online_time`, ACTIVE forces it online, BUSY and INACTIVE leave the
/// online flag as it was.
pub fn set_status(
    directory: &CourierDirectory,
    id: Uuid,
    raw_status: &str,
) -> Result<Courier, DispatchError> {
    if !directory.contains(&id) {
        return Err(DispatchError::NotFound(format!("courier {id} not found")));
    }

    let status = CourierStatus::parse(raw_status).ok_or_else(|| {
        DispatchError::InvalidStatus(format!("unknown courier status: {raw_status}"))
    })?;

    let updated = directory.update(id, |courier| {
        courier.status = status;
        match status {
            CourierStatus::Offline => {
                courier.is_online = false;
                courier.last_online_time = Some(Utc::now());
            }
            CourierStatus::Active => {
                courier.is_online = true;
            }
            CourierStatus::Busy | CourierStatus::Inactive => {}
        }
        courier.clone()
    })?;

    info!(courier_id = %id, status = raw_status, online = updated.is_online, "courier status changed");
    Ok(updated)
}
