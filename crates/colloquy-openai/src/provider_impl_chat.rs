use std::sync::Arc;
use std::{future::Future, pin::Pin};

use crate::OpenAiAdapter;
use crate::api_v1::{ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse};
use colloquy_core::error::{ColloquyError, Result};
use colloquy_core::generic::{
    GenericChatCompletionResponse, GenericMessage, GenericUsageReport,
};
use colloquy_core::provider::{ChatCompleteParameters, ChatCompletionProvider};

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &'p self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let request: ChatCompletionRequest = params.try_into()?;
            let response = client
                .chat_completion(request)
                .await
                .map_err(ColloquyError::from)?;
            into_generic(response)
        })
    }
}

fn into_generic(response: ChatCompletionResponse) -> Result<GenericChatCompletionResponse> {
    let usage = Some(GenericUsageReport {
        prompt_tokens: i64::from(response.usage.prompt_tokens),
        completion_tokens: i64::from(response.usage.completion_tokens),
        total_tokens: i64::from(response.usage.total_tokens),
    });

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ColloquyError::Invalid("response contained no choices".into()))?;

    let message: GenericMessage = choice.message.into();
    Ok(GenericChatCompletionResponse { message, usage })
}
