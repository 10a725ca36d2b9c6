use dashmap::DashMap;
use uuid::Uuid;

use crate::error::DispatchError;
use crate::models::order::{DeliveryStatus, Order};

/// Store of orders within dispatch scope, keyed by order id. The dispatch
/// engine is the only writer of the assignment fields; all writes go through
/// `update` so the `(delivery_status, assigned_courier, assigned_at)` triple
/// is never observed half-written.
#[derive(Default)]
pub struct OrderStore {
    orders: DashMap<Uuid, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    pub fn insert(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    pub fn get(&self, id: &Uuid) -> Option<Order> {
        self.orders.get(id).map(|entry| entry.value().clone())
    }

    /// Applies `f` while holding the entry guard. Two requests racing on the
    /// same order (simultaneous accept and reject) serialize here.
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Order) -> Result<T, DispatchError>,
    ) -> Result<T, DispatchError> {
        let mut entry = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| DispatchError::NotFound(format!("order {id} not found")))?;

        f(entry.value_mut())
    }

    pub fn find_by_courier(&self, courier_id: Uuid, status: DeliveryStatus) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|entry| {
                let order = entry.value();
                order.assigned_courier == Some(courier_id) && order.delivery_status == status
            })
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of orders the courier is currently delivering. Used as the
    /// workload figure for least-loaded selection; callers tolerate the
    /// count going stale between the scan and the assignment write.
    pub fn count_active(&self, courier_id: Uuid) -> usize {
        self.orders
            .iter()
            .filter(|entry| {
                let order = entry.value();
                order.assigned_courier == Some(courier_id)
                    && order.delivery_status == DeliveryStatus::Delivering
            })
            .count()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
