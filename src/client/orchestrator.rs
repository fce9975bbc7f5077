//! Drives the trip view: date checks, submission, results and navigation.
//!
//! The orchestrator owns every piece of view state, including the plan that
//! is currently displayed. Requests that change the results region carry a
//! sequence number; a response whose number is no longer the latest is
//! dropped. Loads are numbered separately and only take over the results
//! region once their plan arrives.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{
    itineraries::{fetch_plan, ItineraryPanel, SaveOutcome},
    TripApi,
};
use crate::{
    error::ClientError,
    form::FormControls,
    models::{
        catalog::Airport,
        plan::Plan,
        trip::{TripRequest, TripResponse},
    },
    render::ResultsPanel,
    validation,
};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const NO_OUTPUT_MESSAGE: &str = "No output returned.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";
pub const RENDER_ERROR_MESSAGE: &str = "Could not display the plan.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Welcome,
    Trip,
    Other(String),
}

impl View {
    pub fn name(&self) -> &str {
        match self {
            View::Welcome => "welcome",
            View::Trip => "trip",
            View::Other(name) => name,
        }
    }
}

impl From<&str> for View {
    fn from(name: &str) -> Self {
        match name {
            "welcome" => View::Welcome,
            "trip" => View::Trip,
            other => View::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A trip request is already in flight.
    Pending,
    /// The date check failed; its message is already displayed.
    InvalidDates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rendered,
    Failed(String),
    Blocked(SubmitBlocked),
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
    Superseded,
}

/// An accepted submission, waiting for its response.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    seq: u64,
    request: TripRequest,
}

impl SubmitTicket {
    pub fn request(&self) -> &TripRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    seq: u64,
    name: String,
}

impl LoadTicket {
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct TripOrchestrator<A> {
    api: A,
    today: Option<NaiveDate>,
    view: View,
    form: FormControls,
    airports: Vec<Airport>,
    destinations: Vec<String>,
    date_error: Option<String>,
    results: ResultsPanel,
    current_plan: Option<Plan>,
    panel: ItineraryPanel,
    pending: bool,
    sequence: u64,
    load_sequence: u64,
}

impl<A: TripApi> TripOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            today: None,
            view: View::Welcome,
            form: FormControls::default(),
            airports: Vec::new(),
            destinations: Vec::new(),
            date_error: None,
            results: ResultsPanel::default(),
            current_plan: None,
            panel: ItineraryPanel::default(),
            pending: false,
            sequence: 0,
            load_sequence: 0,
        }
    }

    /// Pins the date used by the date check instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(validation::today)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn form(&self) -> &FormControls {
        &self.form
    }

    /// Direct access to the non-date controls. Dates go through
    /// [`set_departure_date`](Self::set_departure_date) and
    /// [`set_return_date`](Self::set_return_date) so they are re-checked.
    pub fn form_mut(&mut self) -> &mut FormControls {
        &mut self.form
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn date_error(&self) -> Option<&str> {
        self.date_error.as_deref()
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        self.current_plan.as_ref()
    }

    pub fn panel(&self) -> &ItineraryPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ItineraryPanel {
        &mut self.panel
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.pending
    }

    /// Fills the airport and destination pickers.
    pub async fn load_catalog(&mut self) -> Result<(), ClientError> {
        self.airports = self.api.airports().await?;
        self.destinations = self.api.destinations().await?;
        Ok(())
    }

    pub fn navigate(&mut self, view: View) {
        debug!(view = view.name(), "navigating");
        if view == View::Trip {
            self.form.reset();
            self.date_error = None;
            self.results.clear();
            self.current_plan = None;
            self.pending = false;
            self.sequence += 1;
        }
        self.view = view;
    }

    pub fn set_departure_date(&mut self, value: impl Into<String>) -> bool {
        self.form.departure_date = value.into();
        self.revalidate_dates()
    }

    pub fn set_return_date(&mut self, value: impl Into<String>) -> bool {
        self.form.return_date = value.into();
        self.revalidate_dates()
    }

    /// Re-runs the date check and updates the date error region.
    pub fn revalidate_dates(&mut self) -> bool {
        let check = validation::validate(&self.form.departure_date, &self.form.return_date, self.today());
        self.date_error = (!check.message.is_empty()).then_some(check.message);
        check.ok
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitBlocked> {
        if self.pending {
            return Err(SubmitBlocked::Pending);
        }
        if !self.revalidate_dates() {
            return Err(SubmitBlocked::InvalidDates);
        }
        let request = self.form.to_request();
        self.results.set_loading();
        self.current_plan = None;
        self.pending = true;
        self.sequence += 1;
        self.load_sequence += 1;
        info!(seq = self.sequence, destination = %request.destination, "submitting trip");
        Ok(SubmitTicket {
            seq: self.sequence,
            request,
        })
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<TripResponse, ClientError>,
    ) -> SubmitOutcome {
        if ticket.seq != self.sequence {
            debug!(seq = ticket.seq, latest = self.sequence, "dropping superseded trip response");
            return SubmitOutcome::Superseded;
        }
        self.pending = false;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!("trip request failed: {err}");
                return self.fail(NETWORK_ERROR_MESSAGE.to_string());
            }
        };
        if !response.success {
            let message = response
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
            if validation::mentions_departure(&message) {
                self.date_error = Some(message.clone());
            }
            return self.fail(message);
        }
        match response.plan {
            Some(plan) => self.show_plan(plan),
            None => self.fail(NO_OUTPUT_MESSAGE.to_string()),
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };
        let result = self.api.create_trip(&ticket.request).await;
        self.finish_submit(ticket, result)
    }

    fn show_plan(&mut self, plan: Plan) -> SubmitOutcome {
        match self.results.render(&plan) {
            Ok(()) => {
                self.current_plan = Some(plan);
                SubmitOutcome::Rendered
            }
            Err(err) => {
                warn!("rendering plan failed: {err}");
                self.fail(RENDER_ERROR_MESSAGE.to_string())
            }
        }
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        self.results.show_error(message.clone());
        self.current_plan = None;
        SubmitOutcome::Failed(message)
    }

    pub async fn toggle_panel(&mut self) {
        self.panel.toggle(&self.api).await;
    }

    pub async fn save_itinerary(&mut self) -> SaveOutcome {
        self.panel.save(&self.api, self.current_plan.as_ref()).await
    }

    /// A newer load or submission supersedes this one. A trip request still
    /// in flight is only dropped once the loaded plan is shown.
    pub fn begin_load(&mut self, name: impl Into<String>) -> LoadTicket {
        self.load_sequence += 1;
        LoadTicket {
            seq: self.load_sequence,
            name: name.into(),
        }
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Plan, String>) -> LoadOutcome {
        if ticket.seq != self.load_sequence {
            debug!(name = %ticket.name, "dropping superseded itinerary");
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(plan) => {
                self.navigate(View::Trip);
                let outcome = self.show_plan(plan);
                self.panel.close();
                match outcome {
                    SubmitOutcome::Failed(message) => LoadOutcome::Failed(message),
                    _ => LoadOutcome::Loaded,
                }
            }
            Err(message) => {
                self.panel.set_message(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    pub async fn load_itinerary(&mut self, name: &str) -> LoadOutcome {
        let ticket = self.begin_load(name);
        let result = fetch_plan(&self.api, ticket.name()).await;
        self.finish_load(ticket, result)
    }
}
