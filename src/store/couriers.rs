use dashmap::DashMap;
use uuid::Uuid;

use crate::error::DispatchError;
use crate::models::courier::Courier;

/// Registry of every known courier, keyed by courier id. Couriers are added
/// at onboarding and never removed; status, location and delivery counters
/// are mutated in place under the entry guard.
#[derive(Default)]
pub struct CourierDirectory {
    couriers: DashMap<Uuid, Courier>,
}

impl CourierDirectory {
    pub fn new() -> Self {
        Self {
            couriers: DashMap::new(),
        }
    }

    pub fn register(&self, courier: Courier) {
        self.couriers.insert(courier.id, courier);
    }

    pub fn get(&self, id: &Uuid) -> Option<Courier> {
        self.couriers.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.couriers.contains_key(id)
    }

    /// Applies `f` while holding the entry guard, so the read-modify-write
    /// is serialized against every other access to the same courier row.
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Courier) -> T,
    ) -> Result<T, DispatchError> {
        let mut entry = self
            .couriers
            .get_mut(&id)
            .ok_or_else(|| DispatchError::NotFound(format!("courier {id} not found")))?;

        Ok(f(entry.value_mut()))
    }

    pub fn record_delivery(&self, id: Uuid) -> Result<(), DispatchError> {
        self.update(id, |courier| {
            courier.total_deliveries += 1;
        })
    }

    pub fn all(&self) -> Vec<Courier> {
        self.couriers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }
}
