mod builder;
#[cfg(test)]
mod proptests;

use std::sync::Arc;

use talentscout_model::{ErrorKind, ModelMessage, ModelRequest, SamplingParams};

use crate::candidate::CandidateRecord;
use crate::model_client::ModelClient;
use crate::prompt;
use crate::state::{CandidateField, ConversationState};
use crate::transcript::{Role, Transcript};
pub use builder::InterviewBuilder;

pub(crate) type DeltaFn = Arc<dyn Fn(&str) + Send + Sync>;

/// The outcome of one interview turn.
///
/// Every variant carries the text to show the candidate, see
/// [`Reply::text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The model answered and the interview moved on.
    Generated(String),
    /// The answer failed the format check of `field`. Nothing changed.
    Rejected {
        /// The field being collected.
        field: CandidateField,
        /// A fixed message asking for the field again.
        message: &'static str,
    },
    /// The model call failed. Nothing changed, the same turn may be retried.
    ModelFailed {
        /// The kind of the underlying failure.
        kind: ErrorKind,
        /// An apology embedding the failure detail.
        message: String,
    },
    /// The script is over. The model was not called.
    Closed(&'static str),
}

impl Reply {
    /// Returns the text to show the candidate.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) => text,
            Reply::Rejected { message, .. } | Reply::Closed(message) => message,
            Reply::ModelFailed { message, .. } => message,
        }
    }

    /// Returns whether the model produced this reply.
    #[inline]
    pub fn is_generated(&self) -> bool {
        matches!(self, Reply::Generated(_))
    }
}

/// Decides when the technical assessment loop ends.
///
/// The assessment concludes as soon as the model's reply contains the
/// marker (case-insensitive), or once `max_rounds` replies have been
/// generated in the assessment state, whichever comes first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentPolicy {
    marker: String,
    max_rounds: Option<u32>,
}

impl AssessmentPolicy {
    /// The default termination marker.
    pub const DEFAULT_MARKER: &'static str = "thank you";

    /// Creates a policy that concludes on `marker`, without a round limit.
    #[inline]
    pub fn with_marker<S: AsRef<str>>(marker: S) -> Self {
        Self {
            marker: marker.as_ref().to_lowercase(),
            max_rounds: None,
        }
    }

    /// Forces the assessment to conclude after `max_rounds` replies.
    #[inline]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Returns the round limit, if any.
    #[inline]
    pub fn max_rounds(&self) -> Option<u32> {
        self.max_rounds
    }

    /// Returns whether the assessment should conclude after `reply`, the
    /// `rounds`-th reply generated in the assessment state.
    pub fn should_conclude(&self, reply: &str, rounds: u32) -> bool {
        reply.to_lowercase().contains(&self.marker)
            || self.max_rounds.is_some_and(|max| rounds >= max)
    }
}

impl Default for AssessmentPolicy {
    #[inline]
    fn default() -> Self {
        Self::with_marker(Self::DEFAULT_MARKER)
    }
}

/// A scripted interview with one candidate.
///
/// The interview owns its state index, the candidate record and the
/// transcript; nothing is shared between two instances. Each call to
/// [`respond`](Self::respond) handles exactly one candidate turn.
pub struct Interview {
    model_client: ModelClient,
    system_prompt: String,
    sampling: SamplingParams,
    policy: AssessmentPolicy,
    on_delta: Option<DeltaFn>,

    state_index: usize,
    assessment_rounds: u32,
    candidate: CandidateRecord,
    transcript: Transcript,
}

impl Interview {
    /// Returns the current state, or `None` once the script is over.
    #[inline]
    pub fn state(&self) -> Option<ConversationState> {
        ConversationState::from_index(self.state_index)
    }

    /// Returns the position in the script. It never decreases, and equals
    /// the number of states once the script is over.
    #[inline]
    pub fn state_index(&self) -> usize {
        self.state_index
    }

    /// Returns whether every state has been passed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state().is_none()
    }

    /// Returns the answers collected so far.
    #[inline]
    pub fn candidate(&self) -> &CandidateRecord {
        &self.candidate
    }

    /// Returns the conversation so far.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns how many replies were generated in the assessment state.
    #[inline]
    pub fn assessment_rounds(&self) -> u32 {
        self.assessment_rounds
    }

    /// Produces the opening message without any candidate input.
    ///
    /// Once the greeting has been generated this does not call the model
    /// again: it repeats the latest assistant message, or the closing
    /// message if the script is over.
    pub async fn greet(&mut self) -> Reply {
        match self.state() {
            Some(ConversationState::InitialGreeting) => {
                self.dispatch(ConversationState::InitialGreeting, None).await
            }
            Some(_) => match self.transcript.last_assistant() {
                Some(text) => Reply::Generated(text.to_owned()),
                None => Reply::Closed(prompt::CLOSING_MESSAGE),
            },
            None => Reply::Closed(prompt::CLOSING_MESSAGE),
        }
    }

    /// Handles one candidate turn.
    pub async fn respond(&mut self, input: &str) -> Reply {
        let Some(state) = self.state() else {
            debug!("interview is over, not calling the model");
            return Reply::Closed(prompt::CLOSING_MESSAGE);
        };

        if let Some(field) = state.field() {
            if !field.accepts(input) {
                debug!(%state, %field, "rejected candidate input");
                return Reply::Rejected {
                    field,
                    message: prompt::rejection(field),
                };
            }
        }

        self.dispatch(state, Some(input)).await
    }

    async fn dispatch(
        &mut self,
        state: ConversationState,
        input: Option<&str>,
    ) -> Reply {
        let request = self.build_model_request(state, input);
        let on_delta = self.on_delta.clone();
        let result = self
            .model_client
            .send_request(request, move |delta| {
                if let Some(on_delta) = &on_delta {
                    on_delta(&delta);
                }
            })
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(err) => {
                warn!(%state, "model request failed: {err}");
                return Reply::ModelFailed {
                    kind: err.kind(),
                    message: prompt::apology(&err.to_string()),
                };
            }
        };

        let text = resp.transcript;
        if let Some(input) = input {
            self.transcript.push(Role::User, input);
        }
        self.transcript.push(Role::Assistant, &text);
        if let (Some(field), Some(input)) = (state.field(), input) {
            self.candidate.insert(field, input);
        }
        self.advance(state, &text);

        Reply::Generated(text)
    }

    /// Builds the request for `state`: the persona, the whole transcript,
    /// the candidate's input and finally the instruction.
    fn build_model_request(
        &self,
        state: ConversationState,
        input: Option<&str>,
    ) -> ModelRequest {
        let mut messages = Vec::with_capacity(self.transcript.len() + 3);
        messages.push(ModelMessage::System(self.system_prompt.clone()));
        messages.extend(
            self.transcript.turns().iter().map(|turn| turn.to_model_message()),
        );
        if let Some(input) = input {
            messages.push(ModelMessage::User(input.to_owned()));
        }
        messages.push(ModelMessage::User(prompt::instruction(state, input)));

        ModelRequest {
            messages,
            sampling: self.sampling,
        }
    }

    fn advance(&mut self, state: ConversationState, reply: &str) {
        if state == ConversationState::TechnicalAssessment {
            self.assessment_rounds += 1;
            if !self.policy.should_conclude(reply, self.assessment_rounds) {
                debug!(rounds = self.assessment_rounds, "assessment continues");
                return;
            }
        }
        self.state_index += 1;
        match self.state() {
            Some(next) => debug!(from = %state, to = %next, "state advanced"),
            None => info!("interview finished"),
        }
    }
}
