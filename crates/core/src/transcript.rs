//! Transcript-related types.

use serde::{Deserialize, Serialize};
use talentscout_model::ModelMessage;

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The candidate.
    User,
    /// The model.
    Assistant,
}

/// A role-tagged message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// The producer of this turn.
    pub role: Role,
    /// The text of this turn.
    pub content: String,
}

impl Turn {
    /// Creates a turn.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Converts the turn into a message for the model.
    #[inline]
    pub fn to_model_message(&self) -> ModelMessage {
        let content = self.content.clone();
        match self.role {
            Role::System => ModelMessage::System(content),
            Role::User => ModelMessage::User(content),
            Role::Assistant => ModelMessage::Assistant(content),
        }
    }
}

/// The append-only history of an interview, used verbatim as the context
/// window of every model request.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Returns the turns, oldest first.
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns whether the transcript has no turns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the most recent assistant text.
    pub fn last_assistant(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }

    #[inline]
    pub(crate) fn push(&mut self, role: Role, content: &str) {
        self.turns.push(Turn::new(role, content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript() {
        let mut transcript = Transcript::default();
        assert_eq!(transcript.last_assistant(), None);
        transcript.push(Role::Assistant, "What is your name?");
        transcript.push(Role::User, "Alice");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last_assistant(), Some("What is your name?"));
        assert_eq!(
            transcript.turns()[1].to_model_message(),
            ModelMessage::User("Alice".to_owned())
        );

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "role": "assistant", "content": "What is your name?" },
                { "role": "user", "content": "Alice" }
            ])
        );
    }
}
