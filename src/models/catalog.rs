use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

const AIRPORTS: &[(&str, &str)] = &[
    ("SFO", "San Francisco (SFO)"),
    ("LAX", "Los Angeles (LAX)"),
    ("JFK", "New York JFK (JFK)"),
    ("ORD", "Chicago O'Hare (ORD)"),
    ("DFW", "Dallas/Fort Worth (DFW)"),
    ("SEA", "Seattle (SEA)"),
    ("MIA", "Miami (MIA)"),
    ("DEN", "Denver (DEN)"),
    ("ATL", "Atlanta (ATL)"),
    ("BOS", "Boston (BOS)"),
];

/// Destination label shown in the form, with the primary airport flights use.
const DESTINATIONS: &[(&str, &str)] = &[
    ("New York City", "JFK"),
    ("Miami", "MIA"),
    ("Los Angeles", "LAX"),
    ("Orlando", "MCO"),
    ("San Francisco", "SFO"),
    ("Las Vegas", "LAS"),
    ("Washington D.C.", "IAD"),
    ("Chicago", "ORD"),
    ("Honolulu", "HNL"),
    ("Boston", "BOS"),
    ("Vancouver", "YVR"),
    ("Toronto", "YYZ"),
    ("Montreal", "YUL"),
    ("San Diego", "SAN"),
    ("Seattle", "SEA"),
    ("New Orleans", "MSY"),
    ("Austin", "AUS"),
    ("Nashville", "BNA"),
    ("Savannah", "SAV"),
    ("Philadelphia", "PHL"),
    ("San Antonio", "SAT"),
    ("Denver", "DEN"),
    ("Charleston", "CHS"),
    ("Atlanta", "ATL"),
    ("Houston", "IAH"),
    ("Dallas", "DFW"),
];

/// Checkbox values of the activity preferences, in form order.
pub const ACTIVITY_TYPES: &[(&str, &str)] = &[
    ("beach", "Beach"),
    ("museums", "Museums"),
    ("hiking", "Hiking"),
    ("food", "Food & dining"),
    ("nightlife", "Nightlife"),
    ("shopping", "Shopping"),
];

pub fn preset_airports() -> Vec<Airport> {
    AIRPORTS
        .iter()
        .map(|(code, name)| Airport {
            code: (*code).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

pub fn preset_destinations() -> Vec<String> {
    DESTINATIONS
        .iter()
        .map(|(label, _)| (*label).to_string())
        .collect()
}

/// Maps a destination label to an airport code. Unknown labels are taken to
/// already be a code.
pub fn resolve_destination_airport(destination: &str) -> Option<String> {
    let raw = destination.trim();
    if raw.is_empty() {
        return None;
    }
    let code = DESTINATIONS
        .iter()
        .find(|(label, _)| *label == raw)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| raw.to_uppercase());
    Some(code)
}
