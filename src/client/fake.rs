use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::TripApi;
use crate::{
    error::ClientError,
    models::{
        catalog::{preset_airports, preset_destinations, Airport},
        itinerary::{ItineraryList, ItineraryResponse, SaveItineraryRequest, SaveItineraryResponse},
        plan::Plan,
        trip::{TripRequest, TripResponse},
    },
};

/// In-memory stand-in for the server. A missing trip reply or a set
/// `offline` flag behaves like a transport failure.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub trip_reply: Mutex<Option<TripResponse>>,
    pub save_rejection: Mutex<Option<String>>,
    pub saved: Mutex<BTreeMap<String, Plan>>,
    pub offline: AtomicBool,
    pub trip_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub sent: Mutex<Vec<TripRequest>>,
}

impl FakeApi {
    pub fn replying(reply: TripResponse) -> Self {
        let api = Self::default();
        *api.trip_reply.lock().unwrap() = Some(reply);
        api
    }

    fn unreachable() -> ClientError {
        ClientError::Status(StatusCode::SERVICE_UNAVAILABLE)
    }

    fn check_online(&self) -> Result<(), ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Self::unreachable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TripApi for FakeApi {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError> {
        self.check_online()?;
        Ok(preset_airports())
    }

    async fn destinations(&self) -> Result<Vec<String>, ClientError> {
        self.check_online()?;
        Ok(preset_destinations())
    }

    async fn create_trip(&self, trip: &TripRequest) -> Result<TripResponse, ClientError> {
        self.trip_calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(trip.clone());
        self.check_online()?;
        self.trip_reply.lock().unwrap().clone().ok_or_else(Self::unreachable)
    }

    async fn list_itineraries(&self) -> Result<ItineraryList, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(ItineraryList {
            names: self.saved.lock().unwrap().keys().cloned().collect(),
        })
    }

    async fn load_itinerary(&self, name: &str) -> Result<ItineraryResponse, ClientError> {
        self.check_online()?;
        let plan = self.saved.lock().unwrap().get(name).cloned();
        Ok(ItineraryResponse {
            success: plan.is_some(),
            message: plan.is_none().then(|| "Itinerary not found.".to_string()),
            plan,
        })
    }

    async fn save_itinerary(
        &self,
        request: &SaveItineraryRequest,
    ) -> Result<SaveItineraryResponse, ClientError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if let Some(message) = self.save_rejection.lock().unwrap().clone() {
            return Ok(SaveItineraryResponse {
                success: false,
                message: Some(message),
            });
        }
        self.saved
            .lock()
            .unwrap()
            .insert(request.name.clone(), request.plan.clone());
        Ok(SaveItineraryResponse {
            success: true,
            message: Some(format!("Saved \"{}\".", request.name)),
        })
    }
}
