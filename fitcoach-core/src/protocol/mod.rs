//! Protocol module for conversations and generation results
//!
//! These structures are provider-agnostic: every provider consumes the same
//! conversation type and produces the same result type.

pub mod types;

pub use types::{Conversation, ConversationMessage, GenerationResult, MessageRole};
