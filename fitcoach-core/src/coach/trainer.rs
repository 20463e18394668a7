//! Fitness coach persona

use super::profile::{ChatContext, FitnessLevel, UserProfile};
use super::prompt;
use super::reply::{self, StructuredReport, TextReport};
use crate::protocol::{Conversation, GenerationResult};
use crate::providers::{DispatchError, ProviderRegistry};
use std::sync::Arc;
use tracing::{error, info};

/// Workout planning, exercise guidance and coaching chat on top of a registry
#[derive(Debug, Clone)]
pub struct CoachService {
    registry: Arc<ProviderRegistry>,
}

impl CoachService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Generate a personalized workout plan.
    ///
    /// A reply that is not a JSON object yields a default eight-week plan
    /// named after the user's goal, with the raw reply under `ai_response`.
    pub async fn generate_workout_plan(
        &self,
        profile: &UserProfile,
    ) -> Result<StructuredReport, DispatchError> {
        let result = self.ask("workout plan", prompt::workout_plan(profile)).await?;
        let goal = profile.goals.as_deref().unwrap_or("fitness");
        Ok(StructuredReport::parse_or(&result, |raw| {
            reply::default_workout_plan(goal, raw)
        }))
    }

    pub async fn exercise_guidance(
        &self,
        exercise: &str,
        level: FitnessLevel,
    ) -> Result<TextReport, DispatchError> {
        self.ask("exercise guidance", prompt::exercise_guidance(exercise, level))
            .await
            .map(TextReport::from)
    }

    /// Review arbitrary workout history; the data is embedded as pretty JSON
    pub async fn analyze_progress(
        &self,
        workout_data: &serde_json::Value,
    ) -> Result<TextReport, DispatchError> {
        self.ask("progress analysis", prompt::progress_analysis(workout_data))
            .await
            .map(TextReport::from)
    }

    pub async fn chat(
        &self,
        message: &str,
        context: &ChatContext,
    ) -> Result<TextReport, DispatchError> {
        let conversation = Conversation::new()
            .with_system(prompt::coach_system(context))
            .with_history(&context.history)
            .with_user(message);

        self.registry
            .call(conversation.messages())
            .await
            .map(TextReport::from)
            .inspect_err(|e| error!("Coach chat failed: {}", e))
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
