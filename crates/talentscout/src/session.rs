use std::collections::HashMap;
use std::fmt::{self, Display};

use chrono::{DateTime, Local};
use talentscout_core::{
    AssessmentPolicy, ConversationState, Interview, InterviewBuilder, Reply,
    Role, Turn,
};
use talentscout_model::{ModelProvider, SamplingParams};

use crate::record::InterviewRecord;

/// Identifies a session within a [`SessionRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Wraps a raw id.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    interview_builder: InterviewBuilder,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let interview_builder = InterviewBuilder::with_model_provider(provider);
        Self { interview_builder }
    }

    /// Sets the sampling parameters for every model request.
    #[inline]
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.interview_builder = self.interview_builder.with_sampling(sampling);
        self
    }

    /// Sets how the technical assessment loop ends.
    #[inline]
    pub fn with_assessment_policy(mut self, policy: AssessmentPolicy) -> Self {
        self.interview_builder =
            self.interview_builder.with_assessment_policy(policy);
        self
    }

    /// Attaches a callback to be invoked with generated text as it streams.
    #[inline]
    pub fn on_delta(
        mut self,
        on_delta: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.interview_builder = self.interview_builder.on_delta(on_delta);
        self
    }

    /// Builds a new session with the given id.
    pub fn build(self, id: SessionId) -> Session {
        Session {
            id,
            interview: self.interview_builder.build(),
            messages: Vec::new(),
            started_at: Local::now(),
            finished_at: None,
        }
    }
}

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session owns one [`Interview`] and everything shown to the
/// candidate, including rejections and apologies that never enter the
/// interview transcript.
pub struct Session {
    id: SessionId,
    interview: Interview,
    messages: Vec<Turn>,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
}

impl Session {
    /// Returns the id of this session.
    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the underlying interview.
    #[inline]
    pub fn interview(&self) -> &Interview {
        &self.interview
    }

    /// Returns every message displayed so far.
    #[inline]
    pub fn messages(&self) -> &[Turn] {
        &self.messages
    }

    /// Returns when the session was created.
    #[inline]
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Returns whether the interview script is over.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.interview.is_finished()
    }

    /// Produces the greeting, before any user message.
    ///
    /// Once the greeting has been generated, later calls return the latest
    /// assistant message again without adding it to
    /// [`messages`](Self::messages).
    pub async fn start(&mut self) -> Reply {
        let greeting =
            self.interview.state() == Some(ConversationState::InitialGreeting);
        let reply = self.interview.greet().await;
        if greeting {
            self.messages.push(Turn::new(Role::Assistant, reply.text()));
        }
        reply
    }

    /// Sends a user message to the session and returns the reply to show.
    ///
    /// Surrounding whitespace is trimmed before the interview sees the
    /// message.
    pub async fn send_message(&mut self, message: &str) -> Reply {
        let message = message.trim();
        self.messages.push(Turn::new(Role::User, message));

        let reply = self.interview.respond(message).await;
        self.messages.push(Turn::new(Role::Assistant, reply.text()));

        if self.finished_at.is_none() && self.interview.is_finished() {
            info!(session = %self.id, "interview complete");
            self.finished_at = Some(Local::now());
        }
        reply
    }

    /// Returns the exportable record, once the interview is complete.
    pub fn record(&self) -> Option<InterviewRecord> {
        let timestamp = self.finished_at?;
        Some(InterviewRecord {
            timestamp,
            candidate_data: self.interview.candidate().clone(),
            conversation: self.messages.clone(),
        })
    }
}

/// Sessions keyed by id.
///
/// Every session owns its own interview, so nothing is shared between two
/// candidates served by the same process.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl SessionRegistry {
    /// Builds a session from `builder` and registers it under a fresh id.
    pub fn open(&mut self, builder: SessionBuilder) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(id, builder.build(id));
        debug!(session = %id, "session opened");
        id
    }

    /// Returns the session registered under `id`.
    #[inline]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Returns the session registered under `id` for handling a turn.
    #[inline]
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Removes the session and hands it back.
    pub fn close(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&id);
        if session.is_some() {
            debug!(session = %id, "session closed");
        }
        session
    }

    /// Returns the number of open sessions.
    #[inline]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns whether no session is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
