//! Core logic of the interview: the fixed script, field validation, the
//! candidate record, the transcript and the dispatcher that turns each
//! candidate turn into a model request.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod candidate;
mod interview;
mod model_client;
pub mod prompt;
pub mod state;
pub mod transcript;
pub mod validate;

pub use candidate::CandidateRecord;
pub use interview::{AssessmentPolicy, Interview, InterviewBuilder, Reply};
pub use state::{CandidateField, ConversationState};
pub use transcript::{Role, Transcript, Turn};
pub use validate::{validate_email, validate_phone};
