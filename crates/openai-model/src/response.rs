use std::pin::Pin;
use std::task::{Context, Poll, ready};

use pin_project_lite::pin_project;
use talentscout_model::{
    ErrorKind, ModelFinishReason, ModelResponse, ModelResponseEvent,
};

use crate::Error;
use crate::io::Sse;
use crate::proto::ChatCompletionChunk;

struct PartialState {
    sse: Sse,
    id: Option<String>,
    // Cleared after the response returns the complete event.
    pending_finish_reason: Option<ModelFinishReason>,
    finished: bool,
}

type PinnedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type NextEvent = Result<(Option<ModelResponseEvent>, PartialState), Error>;

pin_project! {
    pub struct OpenAIResponse {
        next_event_fut: Option<PinnedFuture<NextEvent>>,
    }
}

impl OpenAIResponse {
    #[inline]
    pub fn from_sse(sse: Sse) -> Self {
        let partial_state = PartialState {
            sse,
            id: None,
            pending_finish_reason: None,
            finished: false,
        };
        let next_event_fut = async move { next_event(partial_state).await };
        Self {
            next_event_fut: Some(Box::pin(next_event_fut)),
        }
    }
}

impl ModelResponse for OpenAIResponse {
    type Error = crate::Error;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        let this = self.project();
        let Some(next_event_fut) = this.next_event_fut else {
            return Poll::Ready(Ok(None));
        };
        let (event, partial_state) =
            match ready!(next_event_fut.as_mut().poll(cx)) {
                Ok((Some(event), partial_state)) => (event, partial_state),
                Ok((None, _)) => {
                    *this.next_event_fut = None;
                    return Poll::Ready(Ok(None));
                }
                Err(err) => {
                    *this.next_event_fut = None;
                    return Poll::Ready(Err(err));
                }
            };

        // The stream may still have more data to pull, create a new future for
        // the next event.
        let next_event_fut = async move { next_event(partial_state).await };
        *this.next_event_fut = Some(Box::pin(next_event_fut));

        Poll::Ready(Ok(Some(event)))
    }
}

async fn next_event(
    mut partial_state: PartialState,
) -> Result<(Option<ModelResponseEvent>, PartialState), Error> {
    if let Some(finish_reason) = partial_state.pending_finish_reason.take() {
        return Ok((
            Some(ModelResponseEvent::Completed(finish_reason)),
            partial_state,
        ));
    }
    if partial_state.finished {
        return Ok((None, partial_state));
    }

    loop {
        let sse_event = match partial_state.sse.next_event().await {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(err) => {
                return Err(Error::new(format!("{err:?}"), ErrorKind::Other));
            }
        };
        trace!("got sse event: {sse_event}");
        if sse_event == "[DONE]" {
            break;
        }

        let mut chunk = serde_json::from_str::<ChatCompletionChunk>(&sse_event)
            .map_err(|err| Error::new(format!("{err}"), ErrorKind::Other))?;
        if partial_state.id.get_or_insert_with(|| chunk.id.clone()) != &chunk.id
        {
            return Err(Error::new("chunk id mismatch", ErrorKind::Other));
        };

        // Usage-only chunks come without choices.
        let Some(choice) = chunk.choices.pop() else {
            continue;
        };

        if let Some(finish_reason) = choice.finish_reason {
            partial_state.pending_finish_reason =
                Some(match finish_reason.as_str() {
                    "length" => ModelFinishReason::Length,
                    "content_filter" => {
                        return Err(Error::new(
                            "the response was blocked by the content filter",
                            ErrorKind::Moderated,
                        ));
                    }
                    _ => ModelFinishReason::Stop,
                });
        }

        // The order of events is important. Always emit the message delta
        // first, and the finish reason on the next poll.
        if let Some(content) = choice.delta.content.filter(|c| !c.is_empty())
        {
            return Ok((
                Some(ModelResponseEvent::MessageDelta(content)),
                partial_state,
            ));
        }

        if let Some(finish_reason) = partial_state.pending_finish_reason.take()
        {
            return Ok((
                Some(ModelResponseEvent::Completed(finish_reason)),
                partial_state,
            ));
        }
    }

    partial_state.finished = true;
    Ok((None, partial_state))
}

#[cfg(test)]
mod tests {
    use std::future::poll_fn;
    use std::pin::pin;

    use bytes::Bytes;

    use super::*;
    use crate::io::Chunks;

    async fn collect(
        chunks: Vec<Bytes>,
    ) -> Result<(String, Option<ModelFinishReason>), Error> {
        let sse = Sse::new(Chunks::from_vec_deque(chunks.into()));
        let mut resp = pin!(OpenAIResponse::from_sse(sse));
        let mut text = String::new();
        let mut finish_reason = None;
        while let Some(event) =
            poll_fn(|cx| resp.as_mut().poll_next_event(cx)).await?
        {
            match event {
                ModelResponseEvent::MessageDelta(delta) => {
                    text.push_str(&delta)
                }
                ModelResponseEvent::Completed(reason) => {
                    finish_reason = Some(reason)
                }
            }
        }
        Ok((text, finish_reason))
    }

    #[tokio::test]
    async fn test_simple_events() {
        let (text, finish_reason) = collect(vec![Bytes::from_static(
            include_bytes!("../fixtures/test_response.txt"),
        )])
        .await
        .unwrap();
        assert_eq!(
            text,
            "Hello! Welcome to TalentScout. Could you please tell me your name?"
        );
        assert_eq!(finish_reason, Some(ModelFinishReason::Stop));
    }

    #[tokio::test]
    async fn test_truncated_by_length() {
        let (text, finish_reason) = collect(vec![
            Bytes::from_static(
                b"data: {\"id\":\"c1\",\"choices\":[{\"delta\":{\"content\":\"Q1\"},\"finish_reason\":null}]}\n\n",
            ),
            Bytes::from_static(
                b"data: {\"id\":\"c1\",\"choices\":[{\"delta\":{},\"finish_reason\":\"length\"}]}\n\n",
            ),
            Bytes::from_static(b"data: [DONE]\n\n"),
        ])
        .await
        .unwrap();
        assert_eq!(text, "Q1");
        assert_eq!(finish_reason, Some(ModelFinishReason::Length));
    }

    #[tokio::test]
    async fn test_stream_errors() {
        let err = collect(vec![
            Bytes::from_static(
                b"data: {\"id\":\"c1\",\"choices\":[{\"delta\":{\"content\":\"a\"},\"finish_reason\":null}]}\n\n",
            ),
            Bytes::from_static(
                b"data: {\"id\":\"c2\",\"choices\":[{\"delta\":{\"content\":\"b\"},\"finish_reason\":null}]}\n\n",
            ),
        ])
        .await
        .unwrap_err();
        assert_eq!(err.message(), "chunk id mismatch");

        let err = collect(vec![Bytes::from_static(
            b"data: {\"id\":\"c1\",\"choices\":[{\"delta\":{},\"finish_reason\":\"content_filter\"}]}\n\n",
        )])
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Moderated);

        let err = collect(vec![Bytes::from_static(b"data: not json\n\n")])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Other);
    }
}
