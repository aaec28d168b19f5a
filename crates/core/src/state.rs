//! The fixed interview script.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::validate::{validate_email, validate_phone};

/// One stage of the interview script, in traversal order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Greets the candidate. Collects nothing.
    InitialGreeting,
    /// Collects [`CandidateField::Name`].
    CollectName,
    /// Collects [`CandidateField::Email`].
    CollectEmail,
    /// Collects [`CandidateField::Phone`].
    CollectPhone,
    /// Collects [`CandidateField::Experience`].
    CollectExperience,
    /// Collects [`CandidateField::Position`].
    CollectPosition,
    /// Collects [`CandidateField::TechStack`].
    CollectTechStack,
    /// Follow-up rounds on the generated questions. This is the only state
    /// that may repeat.
    TechnicalAssessment,
    /// Wraps up the interview.
    Conclusion,
}

impl ConversationState {
    /// Every state in traversal order. A state's position in this array is
    /// its index.
    pub const ALL: [ConversationState; 9] = [
        ConversationState::InitialGreeting,
        ConversationState::CollectName,
        ConversationState::CollectEmail,
        ConversationState::CollectPhone,
        ConversationState::CollectExperience,
        ConversationState::CollectPosition,
        ConversationState::CollectTechStack,
        ConversationState::TechnicalAssessment,
        ConversationState::Conclusion,
    ];

    /// Returns the state at `index`, or `None` past the end of the script.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the position of this state in [`ALL`](Self::ALL).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the state that follows this one, or `None` for the last one.
    #[inline]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the candidate field a successful turn in this state writes.
    pub fn field(self) -> Option<CandidateField> {
        match self {
            ConversationState::CollectName => Some(CandidateField::Name),
            ConversationState::CollectEmail => Some(CandidateField::Email),
            ConversationState::CollectPhone => Some(CandidateField::Phone),
            ConversationState::CollectExperience => {
                Some(CandidateField::Experience)
            }
            ConversationState::CollectPosition => Some(CandidateField::Position),
            ConversationState::CollectTechStack => {
                Some(CandidateField::TechStack)
            }
            ConversationState::InitialGreeting
            | ConversationState::TechnicalAssessment
            | ConversationState::Conclusion => None,
        }
    }

    /// Returns the snake_case name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::InitialGreeting => "initial_greeting",
            ConversationState::CollectName => "collect_name",
            ConversationState::CollectEmail => "collect_email",
            ConversationState::CollectPhone => "collect_phone",
            ConversationState::CollectExperience => "collect_experience",
            ConversationState::CollectPosition => "collect_position",
            ConversationState::CollectTechStack => "collect_tech_stack",
            ConversationState::TechnicalAssessment => "technical_assessment",
            ConversationState::Conclusion => "conclusion",
        }
    }
}

impl Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of candidate information collected by the script.
///
/// The declaration order is the collection order, which is also the order
/// fields appear in an exported record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    /// Full name.
    Name,
    /// Email address, validated by [`validate_email`].
    Email,
    /// Phone number, validated by [`validate_phone`].
    Phone,
    /// Years of experience, free text.
    Experience,
    /// Desired position.
    Position,
    /// Technologies the candidate is proficient in.
    TechStack,
}

impl CandidateField {
    /// Returns the key this field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Experience => "experience",
            CandidateField::Position => "position",
            CandidateField::TechStack => "tech_stack",
        }
    }

    /// Checks `value` against the field's format. Fields without a format
    /// accept anything but a blank answer.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            CandidateField::Email => validate_email(value),
            CandidateField::Phone => validate_phone(value),
            _ => !value.trim().is_empty(),
        }
    }
}

impl Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
