//! HTTP implementation of [`ChatBackend`] over server-sent events.

use crate::backend::{ChatBackend, ChatRequest, TokenStream};
use crate::sse::{SseDecoder, SseEvent};
use async_trait::async_trait;
use chatpression_core::{ChatpressionError, Result};
use futures::{StreamExt, future, stream};
use reqwest::Client;

/// Talks to the chat endpoint with reqwest and decodes the SSE body.
///
/// No timeouts are applied; a stalled stream waits until the server closes.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn stream_reply(&self, request: &ChatRequest) -> Result<TokenStream> {
        tracing::debug!(
            endpoint = %self.endpoint,
            history = request.history.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| ChatpressionError::network(format!("chat request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatpressionError::network(format!(
                "chat endpoint returned {status}"
            )));
        }

        let tokens = response
            .bytes_stream()
            .scan(SseDecoder::new(), |decoder, chunk| {
                let events: Vec<Result<SseEvent>> = match chunk {
                    Ok(bytes) => decoder.push(&bytes).into_iter().map(Ok).collect(),
                    Err(err) => vec![Err(ChatpressionError::network(format!(
                        "chat stream interrupted: {err}"
                    )))],
                };
                future::ready(Some(stream::iter(events)))
            })
            .flatten()
            .take_while(|event| future::ready(!matches!(event, Ok(SseEvent::Done))))
            .filter_map(|event| {
                future::ready(match event {
                    Ok(SseEvent::Token(token)) => Some(Ok(token)),
                    Ok(SseEvent::Done) => None,
                    Err(err) => Some(Err(err)),
                })
            });

        Ok(tokens.boxed())
    }
}
