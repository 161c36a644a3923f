//! Generic, lightweight client that executes chat completions against a
//! single concrete backend.
//!
//! The client is **generic over the backend type `B`**, so the compiler
//! guarantees that the message type supplied by the caller matches what the
//! backend expects, with no dynamic dispatch or object-safety hurdles in
//! user code.
//!
//! Besides forwarding the provider traits, the client offers
//! [`ColloquyClient::chat_stream_with`], a two-callback rendition of the
//! streaming operation for callers that prefer push-style delivery (a UI
//! appending text as it arrives) over polling a stream themselves.

use std::sync::Arc;

use futures_core::stream::Stream;

use crate::{
    error::Result,
    generic::GenericChatCompletionResponse,
    provider::{ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider},
};

/// A client bound to a single provider.
///
/// Clone the client if you need to share it across tasks—`B` controls whether
/// that’s cheap (e.g. wraps an `Arc`) or a deep copy.
#[derive(Debug, Clone)]
pub struct ColloquyClient<B> {
    backend: Arc<B>,
}

impl<B> ColloquyClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for ColloquyClient<B> {
    type Message = B::Message;

    fn chat_complete<'p, M>(
        &'p self,
        params: ChatCompleteParameters<M>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>,
    >
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let backend = Arc::clone(&self.backend);
        Box::pin(async move { backend.chat_complete(params).await })
    }
}

impl<B> ColloquyClient<B>
where
    B: StreamingChatProvider,
{
    /// Start a streaming completion and hand the delta stream to the caller.
    ///
    /// Dropping the returned stream abandons the request.
    pub fn chat_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> B::Delta<'s>
    where
        M: Into<B::Message> + Clone + Send + Sync + 's,
    {
        self.backend.chat_complete_stream(params)
    }

    /// Run a streaming completion to the end, pushing every text delta into
    /// `on_chunk` in arrival order.
    ///
    /// `on_complete` fires exactly once, after the final delta, whether the
    /// stream ended on the provider’s termination signal or simply ran dry.
    /// If the operation fails, the error is returned instead and
    /// `on_complete` is never invoked—callers must expect zero or more
    /// `on_chunk` calls followed by either completion or the error.
    pub async fn chat_stream_with<'s, M, F, C>(
        &'s self,
        params: ChatCompleteParameters<M>,
        mut on_chunk: F,
        on_complete: C,
    ) -> Result<()>
    where
        M: Into<B::Message> + Clone + Send + Sync + 's,
        F: FnMut(&str),
        C: FnOnce(),
    {
        let stream = self.backend.chat_complete_stream(params);
        let mut stream = std::pin::pin!(stream);

        while let Some(delta) =
            std::future::poll_fn(|cx| stream.as_mut().poll_next(cx)).await
        {
            on_chunk(&delta?);
        }

        on_complete();
        Ok(())
    }
}
