//! Nutritionist persona

use super::profile::{ChatContext, FoodQuery, NutritionProfile};
use super::prompt;
use super::reply::{self, StructuredReport, TextReport};
use crate::protocol::{Conversation, GenerationResult};
use crate::providers::{DispatchError, ProviderRegistry};
use std::sync::Arc;
use tracing::{error, info};

/// Meal planning, food analysis and dietary chat on top of a registry
#[derive(Debug, Clone)]
pub struct NutritionistService {
    registry: Arc<ProviderRegistry>,
}

impl NutritionistService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub async fn generate_meal_plan(
        &self,
        profile: &NutritionProfile,
    ) -> Result<StructuredReport, DispatchError> {
        let result = self.ask("meal plan", prompt::meal_plan(profile)).await?;
        let goal = profile.health_goals.as_deref().unwrap_or("healthy eating");
        Ok(StructuredReport::parse_or(&result, |raw| {
            reply::default_meal_plan(goal, raw)
        }))
    }

    /// Nutritional breakdown of one food; non-JSON replies become `recommendations`
    pub async fn analyze_food(&self, query: &FoodQuery) -> Result<StructuredReport, DispatchError> {
        let result = self.ask("food analysis", prompt::food_analysis(query)).await?;
        Ok(StructuredReport::parse_or(&result, reply::default_food_analysis))
    }

    pub async fn dietary_advice(
        &self,
        condition: &str,
        profile: &NutritionProfile,
    ) -> Result<TextReport, DispatchError> {
        self.ask("dietary advice", prompt::dietary_advice(condition, profile))
            .await
            .map(TextReport::from)
    }

    pub async fn calculate_macros(
        &self,
        profile: &NutritionProfile,
    ) -> Result<StructuredReport, DispatchError> {
        let result = self.ask("macro targets", prompt::macros(profile)).await?;
        Ok(StructuredReport::parse_or(&result, reply::default_macros))
    }

    pub async fn chat(
        &self,
        message: &str,
        context: &ChatContext,
    ) -> Result<TextReport, DispatchError> {
        let conversation = Conversation::new()
            .with_system(prompt::nutritionist_system(context))
            .with_history(&context.history)
            .with_user(message);

        self.registry
            .call(conversation.messages())
            .await
            .map(TextReport::from)
            .inspect_err(|e| error!("Nutritionist chat failed: {}", e))
    }

    async fn ask(&self, task: &str, prompt: String) -> Result<GenerationResult, DispatchError> {
        let result = self
            .registry
            .call(Conversation::new().with_user(prompt).messages())
            .await
            .inspect_err(|e| error!("Failed to generate {}: {}", task, e))?;
        info!("Generated {} via {}", task, result.provider());
        Ok(result)
    }
}
