//! Backend traits connecting a conversation transcript to a concrete
//! provider (OpenAI, a self-hosted gateway, a test double, …).
//!
//! The traits are intentionally minimal:
//!
//! * **One associated type** – the in-memory `Message` representation the
//!   backend accepts.
//! * **Two operations** – a single non-streaming round trip, and a streaming
//!   variant that yields UTF-8 text deltas as they arrive.

use std::{future::Future, pin::Pin};

use crate::{error::Result, generic::GenericChatCompletionResponse, model::Model};
use futures_core::stream::Stream;

/// A **backend** turns a chat transcript into a network call to a concrete
/// provider and parses the structured chat response.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend.
    type Message: Send + Sync + 'static;

    /// Execute the transcript and return the provider’s full reply.
    fn chat_complete<'p, M>(
        &'p self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p;
}

/// A provider that can deliver the model’s answer **incrementally**.
///
/// The stream yields UTF-8 text *deltas* (similar to OpenAI’s SSE format).
/// It is lazy, finite and non-restartable: each call is one fresh request
/// lifecycle, and dropping the stream abandons the transfer along with the
/// underlying connection.
pub trait StreamingChatProvider: ChatCompletionProvider {
    /// The item type returned on the stream.  For now it is plain UTF-8 text
    /// chunks, but back-ends are free to wrap it in richer enums if needed.
    type Delta<'s>: Stream<Item = Result<String>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's;
}

/// Everything a backend needs to issue one completion request: the ordered
/// transcript, the target model, and optional sampling overrides.
///
/// When the overrides stay `None` the backend applies its fixed defaults, so
/// ordinary callers never touch sampling configuration.
#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M: Clone> {
    pub messages: Vec<M>,
    pub model: Model,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i64>,
}

impl<M: Clone> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: Model) -> Self {
        Self {
            messages,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn messages(&self) -> &Vec<M> {
        &self.messages
    }

    pub fn model(&self) -> Model {
        self.model.clone()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
