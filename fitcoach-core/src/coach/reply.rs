//! Turning model replies into reports

use crate::protocol::GenerationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A reply the model was asked to format as a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredReport {
    /// The parsed object, or a default structure when the reply was not JSON
    pub body: Value,
    /// Whether `body` came from the model rather than the default structure
    pub parsed: bool,
    pub ai_provider: String,
    pub ai_model: String,
    pub generated_at: DateTime<Utc>,
}

impl StructuredReport {
    fn new(result: &GenerationResult, body: Value, parsed: bool) -> Self {
        Self {
            body,
            parsed,
            ai_provider: result.provider().to_string(),
            ai_model: result.model().to_string(),
            generated_at: result.generated_at(),
        }
    }

    /// Parse `result`, falling back to `fallback(raw_reply)`
    pub(crate) fn parse_or(result: &GenerationResult, fallback: impl FnOnce(&str) -> Value) -> Self {
        match extract_json(result.content()) {
            Some(body) => Self::new(result, body, true),
            None => Self::new(result, fallback(result.content()), false),
        }
    }
}

/// A free-form reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextReport {
    pub content: String,
    pub ai_provider: String,
    pub ai_model: String,
    pub generated_at: DateTime<Utc>,
}

impl From<GenerationResult> for TextReport {
    fn from(result: GenerationResult) -> Self {
        Self {
            ai_provider: result.provider().to_string(),
            ai_model: result.model().to_string(),
            generated_at: result.generated_at(),
            content: result.into_content(),
        }
    }
}

/// Extract a JSON object from a reply.
///
/// Accepts a bare object or one wrapped in a Markdown code fence. Anything
/// that does not start with `{` once unwrapped is rejected.
pub fn extract_json(reply: &str) -> Option<Value> {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.trim_end().strip_suffix("```").unwrap_or(rest).trim();
    }

    if !text.starts_with('{') {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

pub(crate) fn default_workout_plan(goal: &str, raw: &str) -> Value {
    json!({
        "plan_name": format!("{goal} training plan"),
        "duration_weeks": 8,
        "weekly_schedule": {
            "monday": "Chest and triceps",
            "tuesday": "Rest",
            "wednesday": "Back and biceps",
            "thursday": "Rest",
            "friday": "Legs and shoulders",
            "saturday": "Cardio",
            "sunday": "Rest"
        },
        "exercises": [],
        "nutrition_tips": "Keep a balanced diet with adequate protein",
        "safety_notes": "Warm up thoroughly and keep good form",
        "ai_response": raw
    })
}

pub(crate) fn default_meal_plan(goal: &str, raw: &str) -> Value {
    json!({
        "plan_name": format!("{goal} meal plan"),
        "duration_days": 7,
        "daily_meals": {},
        "shopping_list": [],
        "nutrition_summary": {
            "daily_calories": 2000,
            "protein": 100,
            "carbs": 250,
            "fat": 70
        },
        "tips": "Eat a balanced diet and drink plenty of water",
        "ai_response": raw
    })
}

pub(crate) fn default_food_analysis(raw: &str) -> Value {
    json!({
        "calories": 0,
        "protein": 0,
        "carbs": 0,
        "fat": 0,
        "vitamins": {},
        "minerals": {},
        "health_score": 0,
        "recommendations": raw
    })
}

pub(crate) fn default_macros(raw: &str) -> Value {
    json!({
        "bmr": 0,
        "tdee": 0,
        "calories": 2000,
        "protein": 100,
        "carbs": 250,
        "fat": 70,
        "explanation": raw
    })
}
