//! Picks a flight pair and a hotel that fit the trip budget.
//!
//! The two cheapest flights (outbound and return leg) and the cheapest hotel
//! are tried first. When they exceed the budget, the budget is split between
//! flights and hotel and the split is shifted in 5% steps for a bounded
//! number of rounds.

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::models::offer::{FlightOffer, HotelOffer};

const REBALANCE_ROUNDS: usize = 10;
const SHARE_STEP: f64 = 0.05;
const MAX_FLIGHT_SHARE: f64 = 0.9;
const MIN_FLIGHT_SHARE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    CheapestOverall,
    SplurgeFlight,
    SplurgeHotel,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::CheapestOverall => "cheapest_overall",
            Strategy::SplurgeFlight => "splurge_flight",
            Strategy::SplurgeHotel => "splurge_hotel",
        }
    }

    fn initial_flight_share(&self) -> f64 {
        match self {
            Strategy::CheapestOverall => 1.0,
            Strategy::SplurgeFlight => 0.7,
            Strategy::SplurgeHotel => 0.4,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = OptimizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "cheapest_overall" => Ok(Strategy::CheapestOverall),
            "splurge_flight" => Ok(Strategy::SplurgeFlight),
            "splurge_hotel" => Ok(Strategy::SplurgeHotel),
            other => Err(OptimizeError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("Missing flight or hotel results.")]
    MissingResults,
    #[error("No valid combination within budget.")]
    NoValidCombination,
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub flight_share: f64,
    pub hotel_share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub strategy: Strategy,
    pub flights: Vec<FlightOffer>,
    pub hotel: HotelOffer,
    pub total_cost: f64,
    pub remaining_budget: f64,
    /// Present only when the budget had to be split.
    pub allocation: Option<Allocation>,
}

pub fn optimize(
    flights: &[FlightOffer],
    hotels: &[HotelOffer],
    budget: f64,
    strategy: Strategy,
) -> Result<Selection, OptimizeError> {
    let flights = sorted_by_cost(flights, |f| f.cost);
    let hotels = sorted_by_cost(hotels, |h| h.cost);
    let Some(cheapest_hotel) = hotels.first() else {
        return Err(OptimizeError::MissingResults);
    };
    if flights.is_empty() {
        return Err(OptimizeError::MissingResults);
    }

    let selection = |picked: &[FlightOffer], hotel: &HotelOffer, allocation| {
        let total_cost = picked.iter().map(|f| f.cost).sum::<f64>() + hotel.cost;
        (total_cost <= budget).then(|| Selection {
            strategy,
            flights: picked.to_vec(),
            hotel: hotel.clone(),
            total_cost,
            remaining_budget: budget - total_cost,
            allocation,
        })
    };

    if let Some(found) = selection(&flights[..flights.len().min(2)], cheapest_hotel, None) {
        return Ok(found);
    }

    let mut flight_share = strategy.initial_flight_share();
    for _ in 0..REBALANCE_ROUNDS {
        let hotel_share = 1.0 - flight_share;
        let flight_cap = budget * flight_share;
        let hotel_cap = budget * hotel_share;

        let valid_flights: Vec<FlightOffer> = flights
            .iter()
            .filter(|f| f.cost <= flight_cap)
            .cloned()
            .collect();
        let valid_hotel = hotels.iter().find(|h| h.cost <= hotel_cap);

        let Some(hotel) = valid_hotel.filter(|_| !valid_flights.is_empty()) else {
            flight_share = (flight_share + SHARE_STEP).min(MAX_FLIGHT_SHARE);
            continue;
        };

        let allocation = Allocation {
            flight_share: round2(flight_share),
            hotel_share: round2(hotel_share),
        };
        let picked = &valid_flights[..valid_flights.len().min(2)];
        if let Some(found) = selection(picked, hotel, Some(allocation)) {
            return Ok(found);
        }

        flight_share = (flight_share - SHARE_STEP).max(MIN_FLIGHT_SHARE);
    }

    Err(OptimizeError::NoValidCombination)
}

fn sorted_by_cost<T: Clone>(items: &[T], cost: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| cost(a).partial_cmp(&cost(b)).unwrap_or(Ordering::Equal));
    sorted
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
