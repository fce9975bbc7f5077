use askama::Template;

use crate::models::plan::{DayEntry, FlightEntry, Plan};

const PLACEHOLDER_TEXT: &str = "Fill in your trip details to generate a plan.";
const LOADING_TEXT: &str = "Planning your trip…";
const EMPTY_MARK: &str = "—";

/// US dollar amount with grouped thousands. Whole amounts drop the cents.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}${whole}"),
        frac => format!("{sign}${whole}.{frac:02}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

struct FlightRow {
    description: String,
    cost: String,
}

impl From<&FlightEntry> for FlightRow {
    fn from(flight: &FlightEntry) -> Self {
        Self {
            description: flight.description_text().to_string(),
            cost: format_currency(flight.cost_value()),
        }
    }
}

struct DayRow {
    header: String,
    hotel: String,
    activities: Vec<String>,
    has_other: bool,
    other: String,
    daily_budget: String,
}

impl From<&DayEntry> for DayRow {
    fn from(day: &DayEntry) -> Self {
        let activities = if day.activities.is_empty() {
            vec![EMPTY_MARK.to_string()]
        } else {
            day.activities.clone()
        };
        Self {
            header: format!("Day {} — {}", day.day_number, day.date),
            hotel: day.hotel_text().to_string(),
            activities,
            has_other: day.has_other(),
            other: day.other_display().to_string(),
            daily_budget: format_currency(day.daily_budget_value()),
        }
    }
}

// Every field is escaped by the template; only its own markup is raw.
#[derive(Template)]
#[template(path = "results.html")]
struct PlanTemplate {
    total: String,
    flights: Vec<FlightRow>,
    days: Vec<DayRow>,
}

pub fn render_plan(plan: &Plan) -> Result<String, askama::Error> {
    PlanTemplate {
        total: format_currency(plan.total_budget),
        flights: plan.flights.iter().map(FlightRow::from).collect(),
        days: plan.days.iter().map(DayRow::from).collect(),
    }
    .render()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
    #[default]
    Empty,
    Loading,
    Plan {
        html: String,
    },
    Error {
        message: String,
    },
}

/// The results sub-region currently shown. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Placeholder,
    Content,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    state: ResultsState,
}

impl ResultsPanel {
    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    pub fn clear(&mut self) {
        self.state = ResultsState::Empty;
    }

    pub fn set_loading(&mut self) {
        self.state = ResultsState::Loading;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.state = ResultsState::Error {
            message: message.into(),
        };
    }

    /// Replaces the content with the rendered plan. On a template error the
    /// state is left untouched.
    pub fn render(&mut self, plan: &Plan) -> Result<(), askama::Error> {
        let html = render_plan(plan)?;
        self.state = ResultsState::Plan { html };
        Ok(())
    }

    pub fn visible_region(&self) -> Region {
        match self.state {
            ResultsState::Empty | ResultsState::Loading => Region::Placeholder,
            ResultsState::Plan { .. } => Region::Content,
            ResultsState::Error { .. } => Region::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == ResultsState::Loading
    }

    pub fn placeholder_text(&self) -> &'static str {
        if self.is_loading() {
            LOADING_TEXT
        } else {
            PLACEHOLDER_TEXT
        }
    }

    pub fn content_html(&self) -> &str {
        match &self.state {
            ResultsState::Plan { html } => html,
            _ => "",
        }
    }

    pub fn error_message(&self) -> &str {
        match &self.state {
            ResultsState::Error { message } => message,
            _ => "",
        }
    }
}
