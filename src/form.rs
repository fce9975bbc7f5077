use serde::Deserialize;

use crate::{
    models::{
        catalog::ACTIVITY_TYPES,
        trip::{parse_budget, TripRequest},
    },
    render::format_currency,
};

pub const BUDGET_MIN: i64 = 500;
pub const BUDGET_MAX: i64 = 15_000;
pub const BUDGET_STEP: i64 = 100;
pub const BUDGET_DEFAULT: i64 = 3_000;

/// Raw values of the trip form as the browser submits them. Unchecked
/// checkboxes are simply missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripForm {
    pub home_airport: Option<String>,
    pub departure_date: Option<String>,
    pub destination: Option<String>,
    pub return_date: Option<String>,
    pub budget: Option<String>,
    #[serde(default)]
    pub activity_types: Vec<String>,
    pub prefer_red_eyes: Option<String>,
}

impl TripForm {
    pub fn to_request(&self) -> TripRequest {
        TripRequest {
            home_airport: text(&self.home_airport),
            departure_date: text(&self.departure_date),
            destination: text(&self.destination),
            return_date: text(&self.return_date),
            budget: self.budget.as_deref().map(parse_budget).unwrap_or(0),
            activity_types: self.activity_types.clone(),
            prefer_red_eyes: self
                .prefer_red_eyes
                .as_deref()
                .is_some_and(|value| matches!(value, "on" | "true" | "1" | "yes")),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Live state of the trip form controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControls {
    pub home_airport: String,
    pub departure_date: String,
    pub destination: String,
    pub return_date: String,
    budget: i64,
    pub activities: Vec<ActivityOption>,
    pub prefer_red_eyes: bool,
}

impl Default for FormControls {
    fn default() -> Self {
        Self {
            home_airport: String::new(),
            departure_date: String::new(),
            destination: String::new(),
            return_date: String::new(),
            budget: BUDGET_DEFAULT,
            activities: ACTIVITY_TYPES
                .iter()
                .map(|(value, label)| ActivityOption {
                    value: (*value).to_string(),
                    label: (*label).to_string(),
                    checked: false,
                })
                .collect(),
            prefer_red_eyes: false,
        }
    }
}

impl FormControls {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Moves the budget slider; values snap to the slider range and step.
    pub fn set_budget(&mut self, budget: i64) {
        let clamped = budget.clamp(BUDGET_MIN, BUDGET_MAX);
        self.budget = BUDGET_MIN + ((clamped - BUDGET_MIN) / BUDGET_STEP) * BUDGET_STEP;
    }

    pub fn budget_label(&self) -> String {
        format_currency(self.budget as f64)
    }

    /// Returns false when no checkbox has that value.
    pub fn set_activity(&mut self, value: &str, checked: bool) -> bool {
        match self.activities.iter_mut().find(|option| option.value == value) {
            Some(option) => {
                option.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Captures the controls the way a form submission would.
    pub fn snapshot(&self) -> TripForm {
        TripForm {
            home_airport: Some(self.home_airport.clone()),
            departure_date: Some(self.departure_date.clone()),
            destination: Some(self.destination.clone()),
            return_date: Some(self.return_date.clone()),
            budget: Some(self.budget.to_string()),
            activity_types: self
                .activities
                .iter()
                .filter(|option| option.checked)
                .map(|option| option.value.clone())
                .collect(),
            prefer_red_eyes: self.prefer_red_eyes.then(|| "on".to_string()),
        }
    }

    pub fn to_request(&self) -> TripRequest {
        self.snapshot().to_request()
    }

    /// Restores controls from a submitted form, e.g. to redisplay it.
    pub fn from_form(form: &TripForm) -> Self {
        let request = form.to_request();
        let mut controls = Self {
            home_airport: request.home_airport,
            departure_date: request.departure_date,
            destination: request.destination,
            return_date: request.return_date,
            prefer_red_eyes: request.prefer_red_eyes,
            ..Self::default()
        };
        controls.set_budget(if form.budget.is_some() {
            request.budget
        } else {
            BUDGET_DEFAULT
        });
        for value in &request.activity_types {
            controls.set_activity(value, true);
        }
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_builds_defaults() {
        let request = TripForm::default().to_request();
        assert_eq!(request, TripRequest::default());
        assert_eq!(request.budget, 0);
        assert!(!request.prefer_red_eyes);
    }

    #[test]
    fn unparsable_budget_is_zero() {
        let form = TripForm {
            budget: Some("lots".into()),
            ..TripForm::default()
        };
        assert_eq!(form.to_request().budget, 0);
    }

    #[test]
    fn checked_activities_keep_form_order() {
        let mut controls = FormControls::default();
        assert!(controls.set_activity("shopping", true));
        assert!(controls.set_activity("beach", true));
        assert!(!controls.set_activity("skydiving", true));
        let request = controls.to_request();
        assert_eq!(request.activity_types, vec!["beach", "shopping"]);
    }

    #[test]
    fn building_does_not_touch_controls() {
        let mut controls = FormControls::default();
        controls.home_airport = "SFO".into();
        controls.prefer_red_eyes = true;
        let before = controls.clone();
        let first = controls.to_request();
        let second = controls.to_request();
        assert_eq!(first, second);
        assert_eq!(controls, before);
        assert!(first.prefer_red_eyes);
        assert_eq!(first.budget, BUDGET_DEFAULT);
    }

    #[test]
    fn budget_slider_snaps_to_range() {
        let mut controls = FormControls::default();
        controls.set_budget(20);
        assert_eq!(controls.budget(), BUDGET_MIN);
        controls.set_budget(99_999);
        assert_eq!(controls.budget(), BUDGET_MAX);
        controls.set_budget(1_234);
        assert_eq!(controls.budget(), 1_200);
        assert_eq!(controls.budget_label(), "$1,200");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut controls = FormControls::default();
        controls.destination = "Miami".into();
        controls.set_budget(9_000);
        controls.set_activity("hiking", true);
        controls.reset();
        assert_eq!(controls, FormControls::default());
        assert_eq!(controls.budget_label(), "$3,000");
    }

    #[test]
    fn controls_round_trip_through_form() {
        let mut controls = FormControls::default();
        controls.destination = "Honolulu".into();
        controls.set_activity("food", true);
        controls.set_budget(4_500);
        assert_eq!(FormControls::from_form(&controls.snapshot()), controls);
    }
}
