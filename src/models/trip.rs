use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::plan::Plan;

/// Normalized trip parameters, built once per submission.
///
/// Every field decodes on its own: a value of the wrong type falls back to
/// that field's default instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub home_airport: String,
    #[serde(deserialize_with = "lenient_text")]
    pub departure_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub destination: String,
    #[serde(deserialize_with = "lenient_text")]
    pub return_date: String,
    #[serde(deserialize_with = "lenient_budget")]
    pub budget: i64,
    #[serde(deserialize_with = "lenient_list")]
    pub activity_types: Vec<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub prefer_red_eyes: bool,
}

impl TripRequest {
    pub fn activities_text(&self) -> String {
        if self.activity_types.is_empty() {
            "None selected".to_string()
        } else {
            self.activity_types.join(", ")
        }
    }
}

/// Accepts integers, floats and numeric strings; anything else is 0.
fn lenient_budget<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|v| v.trunc() as i64))
            .unwrap_or(0),
        Value::String(text) => parse_budget(&text),
        _ => 0,
    })
}

/// Strings pass through, numbers and booleans are written out, anything else
/// is empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_text)
            .filter(|item| !item.is_empty())
            .collect(),
        Value::String(item) if !item.is_empty() => vec![item],
        _ => Vec::new(),
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|v| v != 0.0),
        Value::String(text) => matches!(text.trim().to_lowercase().as_str(), "true" | "on" | "1" | "yes"),
        _ => false,
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_budget(raw: &str) -> i64 {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|v| v.trunc() as i64))
        .unwrap_or(0)
}

/// Response of `POST /api/trip`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<usize>,
}

impl TripResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}
