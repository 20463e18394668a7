//! Provider abstraction and dispatch
//!
//! Concrete providers wrap external text-generation APIs behind the
//! [`Provider`] trait; [`ProviderRegistry`] tries them in a fixed priority
//! order.

pub mod adapter;
pub mod error;
pub mod hunyuan;
pub mod openai_compatible;
pub mod registry;

pub use adapter::{Provider, ProviderKind};
pub use error::{DispatchError, ProviderError, ProviderResult};
pub use hunyuan::HunyuanProvider;
pub use openai_compatible::OpenAICompatibleProvider;
pub use registry::{ProviderRegistry, RegistryStatus, MOCK_CONTENT, MOCK_MODEL, MOCK_PROVIDER};
