//! Fixed texts of the interview: the persona, per-state instructions and
//! the canned replies that never reach the model.

use crate::state::{CandidateField, ConversationState};

/// The persona sent as the leading system message of every request.
pub const SYSTEM_PROMPT: &str = "\
You are TalentScout's AI hiring assistant, here to professionally evaluate \
technical candidates. Keep your tone clear, friendly and professional. Ask \
one question at a time and stay consistent with the conversation so far. \
Evaluate answers thoughtfully and tailor technical questions to the \
candidate's expertise. If the candidate uses a conversation-ending phrase \
such as 'goodbye', 'exit' or 'quit', conclude the conversation \
professionally.";

/// Returned for every turn once the script is exhausted.
pub const CLOSING_MESSAGE: &str =
    "Thank you for completing the interview process. We will be in touch soon!";

const INVALID_EMAIL_MESSAGE: &str = "I apologize, but that doesn't appear to \
be a valid email address. Could you please provide a valid email?";

const INVALID_PHONE_MESSAGE: &str = "I apologize, but that doesn't appear to \
be a valid phone number. Please provide a valid phone number.";

const INVALID_INPUT_MESSAGE: &str =
    "I apologize, but I couldn't understand that. Could you please try again?";

/// Returns the instruction appended after the transcript for `state`.
///
/// `input` is the candidate's answer in this turn; only the tech stack
/// instruction embeds it.
pub fn instruction(state: ConversationState, input: Option<&str>) -> String {
    match state {
        ConversationState::InitialGreeting => {
            "Greet the candidate and ask for their name.".to_owned()
        }
        ConversationState::CollectName => {
            "Ask for the candidate's email address.".to_owned()
        }
        ConversationState::CollectEmail => {
            "Ask for the candidate's phone number.".to_owned()
        }
        ConversationState::CollectPhone => {
            "Ask about the candidate's years of experience in technology."
                .to_owned()
        }
        ConversationState::CollectExperience => {
            "Ask about the candidate's desired position.".to_owned()
        }
        ConversationState::CollectPosition => {
            "Ask the candidate to list their technical skills, frameworks, \
             and tools they're proficient in."
                .to_owned()
        }
        ConversationState::CollectTechStack => format!(
            "Generate 3-5 technical questions based on the candidate's tech \
             stack: {}. Focus on practical scenarios and problem-solving \
             abilities. Make the questions challenging but fair.",
            input.unwrap_or_default()
        ),
        ConversationState::TechnicalAssessment => {
            "Analyze the candidate's response and provide relevant follow-up \
             questions or conclude the interview."
                .to_owned()
        }
        ConversationState::Conclusion => {
            "Thank the candidate and explain the next steps in the hiring \
             process."
                .to_owned()
        }
    }
}

/// Returns the message shown when `field` fails its format check.
pub fn rejection(field: CandidateField) -> &'static str {
    match field {
        CandidateField::Email => INVALID_EMAIL_MESSAGE,
        CandidateField::Phone => INVALID_PHONE_MESSAGE,
        _ => INVALID_INPUT_MESSAGE,
    }
}

/// Returns the message shown when the model call fails.
pub fn apology(detail: &str) -> String {
    format!(
        "I apologize, but I encountered an error. Please try again. Error: {detail}"
    )
}
