//! Date checks shared by the trip form and the trip endpoint.
//!
//! Dates travel as fixed-width `YYYY-MM-DD` strings, so plain string
//! comparison orders them correctly.

use chrono::{Local, NaiveDate};

pub const PAST_DATE_MESSAGE: &str = "Departure and return dates must be today or in the future.";
pub const DATE_ORDER_MESSAGE: &str = "Return date must be after departure date.";
pub const TRIP_TOO_LONG_MESSAGE: &str = "Trips can be at most 365 days long.";

/// Longest accepted gap between departure and return.
pub const MAX_TRIP_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCheck {
    pub ok: bool,
    pub message: String,
}

impl DateCheck {
    fn valid() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validates the form dates. Nothing is reported until both are filled in.
pub fn validate(departure: &str, return_date: &str, today: NaiveDate) -> DateCheck {
    if departure.is_empty() || return_date.is_empty() {
        return DateCheck::valid();
    }
    let today = today.format("%Y-%m-%d").to_string();
    if departure < today.as_str() || return_date < today.as_str() {
        return DateCheck::invalid(PAST_DATE_MESSAGE);
    }
    if departure >= return_date {
        return DateCheck::invalid(DATE_ORDER_MESSAGE);
    }
    DateCheck::valid()
}

/// Checks dates posted to the trip endpoint. Each date is checked on its own
/// against today, and unparsable dates are ignored by the past check.
pub fn check_submitted(departure: &str, return_date: &str, today: NaiveDate) -> Result<(), &'static str> {
    let (dep, ret) = match (parse_optional(departure), parse_optional(return_date)) {
        (Ok(dep), Ok(ret)) => (dep, ret),
        _ => (None, None),
    };
    if dep.is_some_and(|d| d < today) || ret.is_some_and(|d| d < today) {
        return Err(PAST_DATE_MESSAGE);
    }
    if !departure.is_empty() && !return_date.is_empty() && departure >= return_date {
        return Err(DATE_ORDER_MESSAGE);
    }
    if let (Some(dep), Some(ret)) = (dep, ret) {
        if (ret - dep).num_days() > MAX_TRIP_DAYS {
            return Err(TRIP_TOO_LONG_MESSAGE);
        }
    }
    Ok(())
}

/// Server errors that mention the departure date also belong next to the
/// date fields.
pub fn mentions_departure(message: &str) -> bool {
    message.to_lowercase().contains("departure")
}

fn parse_optional(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Some)
}
