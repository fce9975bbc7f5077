use tracing::{info, warn};

use super::TripApi;
use crate::models::{
    itinerary::{ItineraryResponse, SaveItineraryRequest, BLANK_NAME_MESSAGE},
    plan::Plan,
};

pub const NO_PLAN_MESSAGE: &str = "No plan to save. Generate a plan first.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save.";
pub const SAVED_MESSAGE: &str = "Itinerary saved.";
pub const LIST_FAILED_MESSAGE: &str = "Could not load saved itineraries.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
}

impl SaveOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Side panel listing saved itineraries.
#[derive(Debug, Clone, Default)]
pub struct ItineraryPanel {
    open: bool,
    names: Vec<String>,
    pub name_input: String,
    message: Option<String>,
}

impl ItineraryPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Opening the panel refreshes the list.
    pub async fn toggle<A: TripApi + ?Sized>(&mut self, api: &A) {
        self.open = !self.open;
        if self.open {
            self.refresh(api).await;
        }
    }

    /// On failure the previous names stay listed.
    pub async fn refresh<A: TripApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.list_itineraries().await {
            Ok(list) => {
                self.names = list.names;
                true
            }
            Err(err) => {
                warn!("listing itineraries failed: {err}");
                self.message = Some(LIST_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    pub async fn save<A: TripApi + ?Sized>(&mut self, api: &A, plan: Option<&Plan>) -> SaveOutcome {
        let outcome = self.try_save(api, plan).await;
        self.message = Some(outcome.message.clone());
        outcome
    }

    async fn try_save<A: TripApi + ?Sized>(&mut self, api: &A, plan: Option<&Plan>) -> SaveOutcome {
        let name = self.name_input.trim().to_string();
        if name.is_empty() {
            return SaveOutcome::failed(BLANK_NAME_MESSAGE);
        }
        let Some(plan) = plan else {
            return SaveOutcome::failed(NO_PLAN_MESSAGE);
        };

        let request = SaveItineraryRequest {
            name: name.clone(),
            plan: plan.clone(),
        };
        match api.save_itinerary(&request).await {
            Ok(response) if response.success => {
                info!(name = %name, "itinerary saved");
                self.name_input.clear();
                self.refresh(api).await;
                SaveOutcome {
                    success: true,
                    message: response.message.unwrap_or_else(|| SAVED_MESSAGE.to_string()),
                }
            }
            Ok(response) => {
                SaveOutcome::failed(response.message.unwrap_or_else(|| SAVE_FAILED_MESSAGE.to_string()))
            }
            Err(err) => {
                warn!(name = %name, "saving itinerary failed: {err}");
                SaveOutcome::failed(SAVE_FAILED_MESSAGE)
            }
        }
    }
}

pub fn load_failed_message(name: &str) -> String {
    format!("Could not load itinerary \"{name}\".")
}

/// Fetches a saved plan. The error is the message to show in the panel.
pub async fn fetch_plan<A: TripApi + ?Sized>(api: &A, name: &str) -> Result<Plan, String> {
    match api.load_itinerary(name).await {
        Ok(ItineraryResponse {
            success: true,
            plan: Some(plan),
            ..
        }) => Ok(plan),
        Ok(_) => Err(load_failed_message(name)),
        Err(err) => {
            warn!(name, "loading itinerary failed: {err}");
            Err(load_failed_message(name))
        }
    }
}
