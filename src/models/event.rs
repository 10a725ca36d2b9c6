use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::DeliveryStatus;

/// Resolved caller identity for courier-side operations. Upstream auth maps
/// the authenticated user to a courier id; dispatch only checks ownership.
#[derive(Debug, Clone, Copy)]
pub struct ShipperIdentity {
    pub courier_id: Uuid,
}

impl ShipperIdentity {
    pub fn new(courier_id: Uuid) -> Self {
        Self { courier_id }
    }
}

/// Published on the broadcast channel after every successful dispatch
/// mutation; websocket clients receive the serialized stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub order_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status: DeliveryStatus,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl DispatchEvent {
    pub fn now(order_id: Uuid, courier_id: Option<Uuid>, status: DeliveryStatus) -> Self {
        Self {
            order_id,
            courier_id,
            status,
            reason: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_reason(mut self, reason: String) -> Self {
        self.reason = Some(reason);
        self
    }
}
