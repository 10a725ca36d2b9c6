use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Preparing,
    WaitingForShipper,
    Accepted,
    Delivering,
    Delivered,
    Rejected,
    Cancelled,
}

impl DeliveryStatus {
    /// Parses the legacy wire constants (`PREPARING`, `WAITING_FOR_SHIPPER`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PREPARING" => Some(DeliveryStatus::Preparing),
            "WAITING_FOR_SHIPPER" => Some(DeliveryStatus::WaitingForShipper),
            "ACCEPTED" => Some(DeliveryStatus::Accepted),
            "DELIVERING" => Some(DeliveryStatus::Delivering),
            "DELIVERED" => Some(DeliveryStatus::Delivered),
            "REJECTED" => Some(DeliveryStatus::Rejected),
            "CANCELLED" => Some(DeliveryStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub delivery_address: String,
    pub delivery_status: DeliveryStatus,
    pub assigned_courier: Option<Uuid>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// A fresh order as it enters dispatch scope.
    pub fn preparing(delivery_address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            delivery_address,
            delivery_status: DeliveryStatus::Preparing,
            assigned_courier: None,
            assigned_at: None,
            created_at: Utc::now(),
        }
    }
}
