use serde::{Deserialize, Serialize};

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// The input messages, oldest first.
    pub messages: Vec<ModelMessage>,
    /// How the model should sample its output.
    pub sampling: SamplingParams,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ModelMessage {
    /// Returns the text content of the message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ModelMessage::System(content)
            | ModelMessage::User(content)
            | ModelMessage::Assistant(content) => content,
        }
    }
}

/// Sampling parameters attached to every request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature, usually in `0.0..=2.0`.
    pub temperature: f32,
    /// Upper bound of generated tokens.
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    #[inline]
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}
