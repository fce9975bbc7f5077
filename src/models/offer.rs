use serde::{Deserialize, Serialize};

/// One priced flight option from an offer source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub carrier: String,
    pub from: String,
    pub to: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub cost: f64,
}

impl FlightOffer {
    pub fn description(&self) -> String {
        format!("{} • {} → {}", self.carrier, self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub rating: Option<String>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOffer {
    pub title: String,
    pub cost: f64,
}
