use serde::{Deserialize, Serialize};

/// Server-computed itinerary shown in the results region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub total_budget: f64,
    #[serde(default)]
    pub flights: Vec<FlightEntry>,
    #[serde(default)]
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl FlightEntry {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("Flight")
    }

    pub fn cost_value(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub day_number: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl DayEntry {
    pub fn hotel_text(&self) -> &str {
        self.hotel.as_deref().unwrap_or("—")
    }

    pub fn has_other(&self) -> bool {
        self.other.as_deref().is_some_and(|other| !other.is_empty())
    }

    pub fn other_display(&self) -> &str {
        self.other.as_deref().unwrap_or("")
    }

    pub fn daily_budget_value(&self) -> f64 {
        self.daily_budget.unwrap_or(0.0)
    }
}
