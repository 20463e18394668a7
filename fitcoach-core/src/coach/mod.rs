//! Coaching services built on the provider registry
//!
//! [`CoachService`] and [`NutritionistService`] turn user profiles into
//! prompts, dispatch them through a shared [`ProviderRegistry`] and shape the
//! replies into serializable reports.
//!
//! [`ProviderRegistry`]: crate::providers::ProviderRegistry

mod nutrition;
mod profile;
mod prompt;
mod reply;
mod trainer;

pub use nutrition::NutritionistService;
pub use profile::{ChatContext, FitnessLevel, FoodQuery, NutritionProfile, UserProfile};
pub use prompt::{COACH_NAME, NUTRITIONIST_NAME};
pub use reply::{extract_json, StructuredReport, TextReport};
pub use trainer::CoachService;
