//! Inputs to the coaching prompts
//!
//! Every field is optional; prompts render missing values with a neutral
//! default so partially filled profiles still produce a usable request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported training experience
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile used for workout planning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f32>,
    pub weight_kg: Option<f32>,
    pub fitness_level: FitnessLevel,
    /// e.g. weight_loss, muscle_gain, endurance, general_fitness
    pub goals: Option<String>,
    pub available_hours_per_week: Option<f32>,
    pub equipment: Option<String>,
    pub injuries: Option<String>,
    pub preferences: Option<String>,
}

/// Profile used for nutrition planning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionProfile {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f32>,
    pub weight_kg: Option<f32>,
    pub target_weight_kg: Option<f32>,
    pub activity_level: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub health_goals: Option<String>,
    pub allergies: Option<String>,
    pub preferences: Option<String>,
}

/// A food item to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodQuery {
    pub food_name: String,
    #[serde(default = "default_portion")]
    pub portion_size: String,
    #[serde(default)]
    pub ingredients: Option<String>,
}

fn default_portion() -> String {
    "100g".to_string()
}

impl FoodQuery {
    pub fn new(food_name: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            portion_size: default_portion(),
            ingredients: None,
        }
    }

    pub fn with_portion(mut self, portion: impl Into<String>) -> Self {
        self.portion_size = portion.into();
        self
    }
}

/// Background handed to a chat persona
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatContext {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub fitness_level: Option<FitnessLevel>,
    pub goals: Option<String>,
    pub health_goals: Option<String>,
    pub dietary_restrictions: Option<String>,
    /// Earlier turns, oldest first
    pub history: Vec<crate::protocol::ConversationMessage>,
}

/// Render an optional value or a fallback
pub(crate) fn or_default<T: fmt::Display>(value: &Option<T>, fallback: &str) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"age": 28, "fitness_level": "advanced"}"#).unwrap();
        assert_eq!(profile.age, Some(28));
        assert_eq!(profile.fitness_level, FitnessLevel::Advanced);
        assert!(profile.goals.is_none());
    }

    #[test]
    fn test_food_query_default_portion() {
        let query: FoodQuery = serde_json::from_str(r#"{"food_name": "oats"}"#).unwrap();
        assert_eq!(query.portion_size, "100g");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(&Some(3), "unknown"), "3");
        assert_eq!(or_default::<u32>(&None, "unknown"), "unknown");
    }
}
