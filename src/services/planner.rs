use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    models::{
        catalog::resolve_destination_airport,
        offer::{ActivityOffer, FlightOffer, HotelOffer},
        plan::{DayEntry, FlightEntry, Plan},
        trip::TripRequest,
    },
    render::format_currency,
    services::optimizer::{optimize, Selection, Strategy},
    validation::MAX_TRIP_DAYS,
};

const NO_ACTIVITIES_NOTE: &str = "Activity suggestions are not available yet.";

#[derive(Debug, Clone)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
}

#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
}

/// Where flight, hotel and activity offers come from.
#[async_trait]
pub trait OfferSource: Send + Sync {
    async fn search_flights(&self, query: &FlightQuery) -> Vec<FlightOffer>;
    async fn search_hotels(&self, query: &HotelQuery) -> Vec<HotelOffer>;
    async fn search_activities(&self, destination: &str, activity_types: &[String]) -> Vec<ActivityOffer>;
}

/// Offer source used when no search backend is configured.
#[derive(Debug, Clone, Default)]
pub struct NoOffers;

#[async_trait]
impl OfferSource for NoOffers {
    async fn search_flights(&self, _query: &FlightQuery) -> Vec<FlightOffer> {
        Vec::new()
    }

    async fn search_hotels(&self, _query: &HotelQuery) -> Vec<HotelOffer> {
        Vec::new()
    }

    async fn search_activities(&self, _destination: &str, _activity_types: &[String]) -> Vec<ActivityOffer> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
pub struct PlannedTrip {
    pub plan: Plan,
    pub output: String,
}

#[derive(Clone)]
pub struct PlanService {
    offers: Arc<dyn OfferSource>,
    strategy: Strategy,
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new(Arc::new(NoOffers))
    }
}

impl PlanService {
    pub fn new(offers: Arc<dyn OfferSource>) -> Self {
        Self {
            offers,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub async fn plan_trip(&self, trip: &TripRequest) -> PlannedTrip {
        let flights = self.find_flights(trip).await;
        let hotels = self
            .offers
            .search_hotels(&HotelQuery {
                destination: trip.destination.clone(),
                check_in: trip.departure_date.clone(),
                check_out: trip.return_date.clone(),
            })
            .await;
        let activities = self
            .offers
            .search_activities(&trip.destination, &trip.activity_types)
            .await;

        let budget = trip.budget as f64;
        let selection = match optimize(&flights, &hotels, budget, self.strategy) {
            Ok(selection) => Some(selection),
            Err(err) => {
                debug!(destination = %trip.destination, strategy = %self.strategy, "no offer selection: {err}");
                None
            }
        };

        let plan = build_plan(trip, selection.as_ref(), &activities);
        info!(
            destination = %trip.destination,
            days = plan.days.len(),
            flights = plan.flights.len(),
            "trip planned"
        );
        PlannedTrip {
            output: summarize(trip, &flights, &hotels, selection.as_ref()),
            plan,
        }
    }

    async fn find_flights(&self, trip: &TripRequest) -> Vec<FlightOffer> {
        if trip.home_airport.is_empty() || trip.departure_date.is_empty() {
            return Vec::new();
        }
        let Some(destination) = resolve_destination_airport(&trip.destination) else {
            return Vec::new();
        };
        let flights = self
            .offers
            .search_flights(&FlightQuery {
                origin: trip.home_airport.clone(),
                destination,
                departure_date: trip.departure_date.clone(),
                return_date: trip.return_date.clone(),
            })
            .await;
        within_budget(flights, trip.budget)
    }
}

/// A budget of 0 disables filtering.
fn within_budget(flights: Vec<FlightOffer>, budget: i64) -> Vec<FlightOffer> {
    if budget == 0 {
        return flights;
    }
    flights
        .into_iter()
        .filter(|flight| flight.cost <= budget as f64)
        .collect()
}

fn trip_dates(trip: &TripRequest) -> Vec<NaiveDate> {
    let parse = |raw: &str| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    match (parse(&trip.departure_date), parse(&trip.return_date)) {
        (Some(start), Some(end)) if start <= end => start
            .iter_days()
            .take_while(|d| *d <= end)
            .take(MAX_TRIP_DAYS as usize + 1)
            .collect(),
        (Some(start), None) => vec![start],
        _ => Vec::new(),
    }
}

fn build_plan(trip: &TripRequest, selection: Option<&Selection>, activities: &[ActivityOffer]) -> Plan {
    let total_budget = trip.budget as f64;
    let flights: Vec<FlightEntry> = selection
        .map(|s| {
            s.flights
                .iter()
                .map(|flight| FlightEntry {
                    description: Some(flight.description()),
                    cost: Some(flight.cost),
                })
                .collect()
        })
        .unwrap_or_default();

    let dates = trip_dates(trip);
    let spent = selection.map(|s| s.total_cost).unwrap_or(0.0)
        + activities.iter().map(|a| a.cost).sum::<f64>();
    let daily_budget = if dates.is_empty() {
        0.0
    } else {
        (((total_budget - spent) / dates.len() as f64).max(0.0) * 100.0).round() / 100.0
    };

    let last = dates.len().saturating_sub(1);
    let days = dates
        .iter()
        .enumerate()
        .map(|(idx, date)| DayEntry {
            day_number: idx as u32 + 1,
            date: date.format("%Y-%m-%d").to_string(),
            hotel: selection
                .filter(|_| idx < last)
                .map(|s| s.hotel.name.clone()),
            activities: activities
                .iter()
                .skip(idx)
                .step_by(dates.len())
                .map(|a| a.title.clone())
                .collect(),
            daily_budget: Some(daily_budget),
            other: (idx == 0 && activities.is_empty()).then(|| NO_ACTIVITIES_NOTE.to_string()),
        })
        .collect();

    Plan {
        total_budget,
        flights,
        days,
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Plain-text overview of the request and the offers that were found.
pub fn summarize(
    trip: &TripRequest,
    flights: &[FlightOffer],
    hotels: &[HotelOffer],
    selection: Option<&Selection>,
) -> String {
    let mut lines = vec![
        format!("Trip: {}", or_na(&trip.destination)),
        format!("From: {}", or_na(&trip.home_airport)),
        format!(
            "Depart: {} — Return: {}",
            or_na(&trip.departure_date),
            or_na(&trip.return_date)
        ),
        format!("Budget: {}", format_currency(trip.budget as f64)),
        format!(
            "Prefer red-eye flights: {}",
            if trip.prefer_red_eyes { "Yes" } else { "No" }
        ),
        format!("Activities: {}", trip.activities_text()),
        String::new(),
        "--- Flights ---".to_string(),
    ];

    if flights.is_empty() {
        lines.push("No flight offers found.".to_string());
    } else {
        for flight in flights {
            lines.push(format!("- {}", flight.description()));
            lines.push(format!("  Depart: {}", flight.departure.as_deref().unwrap_or("N/A")));
            lines.push(format!("  Arrive: {}", flight.arrival.as_deref().unwrap_or("N/A")));
            lines.push(format!("  Price: {}", format_currency(flight.cost)));
            lines.push(String::new());
        }
    }

    lines.push("--- Hotels ---".to_string());
    if hotels.is_empty() {
        lines.push("No hotel offers found.".to_string());
    } else {
        for hotel in hotels {
            lines.push(format!(
                "- {} | Rating: {}",
                hotel.name,
                hotel.rating.as_deref().unwrap_or("N/A")
            ));
            lines.push(format!("  Total: {}", format_currency(hotel.cost)));
            lines.push(String::new());
        }
    }

    if let Some(selection) = selection {
        lines.push("--- Selection ---".to_string());
        lines.push(format!("Strategy: {}", selection.strategy));
        lines.push(format!("Total cost: {}", format_currency(selection.total_cost)));
        lines.push(format!("Remaining budget: {}", format_currency(selection.remaining_budget)));
        lines.push(String::new());
    }

    lines.push("--- Activities ---".to_string());
    lines.push(NO_ACTIVITIES_NOTE.to_string());
    lines.join("\n")
}
