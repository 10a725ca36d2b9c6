use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourierStatus {
    Active,
    Inactive,
    Busy,
    Offline,
}

impl CourierStatus {
    /// Parses the legacy wire constants (`ACTIVE`, `INACTIVE`, `BUSY`, `OFFLINE`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ACTIVE" => Some(CourierStatus::Active),
            "INACTIVE" => Some(CourierStatus::Inactive),
            "BUSY" => Some(CourierStatus::Busy),
            "OFFLINE" => Some(CourierStatus::Offline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Courier {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: String,
    pub vehicle_number: String,
    pub phone_number: String,
    pub working_area: String,
    pub status: CourierStatus,
    pub is_online: bool,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub last_location_update: Option<DateTime<Utc>>,
    pub last_online_time: Option<DateTime<Utc>>,
    pub total_deliveries: u64,
}

impl Courier {
    /// Eligible for dispatch: online and in ACTIVE status.
    pub fn is_assignable(&self) -> bool {
        self.is_online && self.status == CourierStatus::Active
    }
}
