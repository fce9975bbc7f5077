use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{plan::Plan, trip::TripRequest};

/// Process-local store for submitted trips and named itineraries.
#[derive(Clone, Default)]
pub struct StorageService {
    trips: Arc<RwLock<Vec<TripRequest>>>,
    itineraries: Arc<RwLock<BTreeMap<String, Plan>>>,
}

impl StorageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trip and returns its 1-based id.
    pub async fn record_trip(&self, trip: TripRequest) -> usize {
        let mut trips = self.trips.write().await;
        trips.push(trip);
        trips.len()
    }

    pub async fn trip_count(&self) -> usize {
        self.trips.read().await.len()
    }

    /// Stores a plan under `name`, replacing any previous one. Returns true
    /// when an existing itinerary was overwritten.
    pub async fn save_itinerary(&self, name: &str, plan: Plan) -> bool {
        let replaced = self
            .itineraries
            .write()
            .await
            .insert(name.to_string(), plan)
            .is_some();
        debug!(name, replaced, "itinerary stored");
        replaced
    }

    pub async fn load_itinerary(&self, name: &str) -> Option<Plan> {
        self.itineraries.read().await.get(name).cloned()
    }

    pub async fn itinerary_names(&self) -> Vec<String> {
        self.itineraries.read().await.keys().cloned().collect()
    }
}
