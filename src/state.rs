use tokio::sync::broadcast;

use crate::models::event::DispatchEvent;
use crate::observability::metrics::Metrics;
use crate::store::couriers::CourierDirectory;
use crate::store::orders::OrderStore;

pub struct AppState {
    pub directory: CourierDirectory,
    pub orders: OrderStore,
    pub dispatch_events_tx: broadcast::Sender<DispatchEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (dispatch_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            directory: CourierDirectory::new(),
            orders: OrderStore::new(),
            dispatch_events_tx,
            metrics: Metrics::new(),
        }
    }
}
