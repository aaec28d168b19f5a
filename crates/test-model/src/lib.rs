//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, ready};
use std::time::Duration;

use talentscout_model::{
    ErrorKind, ModelFinishReason, ModelProvider, ModelProviderError,
    ModelRequest, ModelResponse, ModelResponseEvent,
};
use tokio::time::{Sleep, sleep};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

pub struct TestModelResponse {
    events: Vec<PresetEvent>,
    delay: Duration,
    event_idx: usize,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ModelResponse for TestModelResponse {
    type Error = crate::Error;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        // SAFETY: This type does not require to be pinned.
        let this = unsafe { self.get_unchecked_mut() };

        if let Some(sleep) = &mut this.sleep {
            let sleep = sleep.as_mut();
            ready!(sleep.poll(cx));
            this.sleep = None;

            if this.event_idx < this.events.len() {
                let PresetEvent::MessageDelta(msg) =
                    &this.events[this.event_idx];
                this.event_idx += 1;
                return Poll::Ready(Ok(Some(
                    ModelResponseEvent::MessageDelta(msg.clone()),
                )));
            } else if this.event_idx == this.events.len() {
                this.event_idx += 1;
                return Poll::Ready(Ok(Some(ModelResponseEvent::Completed(
                    ModelFinishReason::Stop,
                ))));
            } else {
                // In case this method is called after completion.
                return Poll::Ready(Ok(None));
            }
        }
        this.sleep = Some(Box::pin(sleep(this.delay)));
        Pin::new(this).poll_next_event(cx)
    }
}

#[derive(Default)]
struct Script {
    steps: VecDeque<PresetResponse>,
    // Failed attempts of the front step so far.
    attempts: u64,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the response script. Each
/// request consumes the next step in order, regardless of its content. If
/// there are no steps left in the script, an error will be returned.
///
/// Clones share the same script, so a test can keep one handle around to
/// inspect [`requests`](Self::requests) after moving the other into the
/// code under test.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_response_step(&mut self, preset: PresetResponse) {
        self.lock().steps.push_back(preset);
    }

    #[inline]
    pub fn add_text_step<S: Into<String>>(&mut self, text: S) {
        self.add_response_step(PresetResponse::with_text(text));
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every request received so far, failed ones included.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Returns the number of steps not yet consumed.
    #[inline]
    pub fn remaining_steps(&self) -> usize {
        self.lock().steps.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_step(&self, req: &ModelRequest) -> Result<Vec<PresetEvent>, Error> {
        let mut script = self.lock();
        script.requests.push(req.clone());

        let Some(step) = script.steps.front() else {
            return Err(Error {
                message: "no enough steps",
                kind: ErrorKind::Other,
            });
        };
        match step.failures {
            Some(0) => {
                return Err(Error {
                    message: "preset failure",
                    kind: ErrorKind::RateLimitExceeded,
                });
            }
            Some(failures) if script.attempts < failures => {
                script.attempts += 1;
                return Err(Error {
                    message: "preset failure",
                    kind: ErrorKind::RateLimitExceeded,
                });
            }
            _ => {}
        }

        script.attempts = 0;
        let step = script.steps.pop_front().unwrap_or_else(|| {
            unreachable!("the front step was checked above")
        });
        Ok(step.events)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;
    type Response = TestModelResponse;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + 'static
    {
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        let result = self.next_step(req).map(|events| TestModelResponse {
            events,
            delay,
            event_idx: 0,
            sleep: None,
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use std::future::poll_fn;
    use std::pin::pin;

    use talentscout_model::{ModelMessage, SamplingParams};

    use super::*;

    async fn collect_response(resp: TestModelResponse) -> String {
        let mut resp = pin!(resp);
        let mut msg = String::new();
        loop {
            let event = poll_fn(|cx| resp.as_mut().poll_next_event(cx))
                .await
                .unwrap()
                .unwrap();
            match event {
                ModelResponseEvent::Completed(_) => break,
                ModelResponseEvent::MessageDelta(delta) => {
                    msg.push_str(&delta);
                }
            }
        }
        msg
    }

    fn request(text: &str) -> ModelRequest {
        ModelRequest {
            messages: vec![ModelMessage::User(text.to_owned())],
            sampling: SamplingParams::default(),
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::default();
        provider.add_response_step(PresetResponse::with_events([
            PresetEvent::MessageDelta("Hello, ".to_owned()),
            PresetEvent::MessageDelta("world!".to_owned()),
        ]));
        provider.add_text_step("Sure, let me take a look.");

        let observer = provider.clone();

        let resp = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(collect_response(resp).await, "Hello, world!");

        let resp = provider.send_request(&request("Check")).await.unwrap();
        assert_eq!(collect_response(resp).await, "Sure, let me take a look.");

        let err = provider.send_request(&request("More")).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Other);

        let requests = observer.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], request("Check"));
        assert_eq!(observer.remaining_steps(), 0);
    }

    #[tokio::test]
    async fn test_preset_failures() {
        let mut provider = TestModelProvider::default();
        provider.add_response_step(
            PresetResponse::with_text("Finally").with_failures(2),
        );
        provider.add_response_step(
            PresetResponse::with_text("Never").with_failures(0),
        );

        for _ in 0..2 {
            let err = provider.send_request(&request("Hi")).await.err().unwrap();
            assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        }
        let resp = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(collect_response(resp).await, "Finally");

        for _ in 0..3 {
            assert!(provider.send_request(&request("Hi")).await.is_err());
        }
        assert_eq!(provider.remaining_steps(), 1);
        assert_eq!(provider.request_count(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let mut provider = TestModelProvider::default();
        provider.add_text_step("Slow answer");
        provider.set_delay(Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        let resp = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(collect_response(resp).await, "Slow answer");
        // One sleep before the delta and one before completion.
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
