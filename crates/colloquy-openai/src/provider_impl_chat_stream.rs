use std::pin::Pin;
use std::sync::Arc;

use crate::OpenAiAdapter;
use crate::api_v1::ChatCompletionRequest;
use colloquy_core::error::{ColloquyError, Result};
use colloquy_core::provider::{ChatCompleteParameters, StreamingChatProvider};
use futures_core::stream::Stream;

impl StreamingChatProvider for OpenAiAdapter {
    type Delta<'s>
        = Pin<Box<dyn Stream<Item = Result<String>> + Send + 's>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let request: ChatCompletionRequest = params.try_into()?;

            let stream = client.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(ColloquyError::from)?;

                // Only the first choice is consumed; this client never
                // requests multi-choice completions.
                if let Some(choice) = chunk.choices.into_iter().next()
                    && let Some(text) = choice.delta.content
                    && !text.is_empty()
                {
                    yield text;
                }
            }
        })
    }
}
