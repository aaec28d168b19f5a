use std::sync::Arc;

use talentscout_model::{ModelProvider, SamplingParams};

use super::{AssessmentPolicy, DeltaFn, Interview};
use crate::candidate::CandidateRecord;
use crate::model_client::ModelClient;
use crate::prompt::SYSTEM_PROMPT;
use crate::transcript::Transcript;

/// [`Interview`] builder.
pub struct InterviewBuilder {
    model_client: ModelClient,
    system_prompt: String,
    sampling: SamplingParams,
    policy: AssessmentPolicy,
    on_delta: Option<DeltaFn>,
}

impl InterviewBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: SYSTEM_PROMPT.to_owned(),
            sampling: SamplingParams::default(),
            policy: AssessmentPolicy::default(),
            on_delta: None,
        }
    }

    /// Replaces the default interviewer persona.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the sampling parameters sent with every request.
    #[inline]
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets how the technical assessment loop ends.
    #[inline]
    pub fn with_assessment_policy(mut self, policy: AssessmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches a callback invoked with each chunk of generated text as it
    /// streams in.
    #[inline]
    pub fn on_delta(
        mut self,
        on_delta: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_delta = Some(Arc::new(on_delta));
        self
    }

    /// Builds the interview, positioned at the greeting.
    #[inline]
    pub fn build(self) -> Interview {
        let InterviewBuilder {
            model_client,
            system_prompt,
            sampling,
            policy,
            on_delta,
        } = self;

        Interview {
            model_client,
            system_prompt,
            sampling,
            policy,
            on_delta,
            state_index: 0,
            assessment_rounds: 0,
            candidate: CandidateRecord::default(),
            transcript: Transcript::default(),
        }
    }
}
