//! # One-shot Chat Completion
//!
//! The non-streaming counterpart of `chat_stream`: one request, one fully
//! assembled reply, plus the provider’s token accounting.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example chat_once
//! ```

use colloquy::openai::OpenAiAdapterBuilder;
use colloquy::{
    ColloquyClient,
    generic::{GenericMessage, GenericRole},
    model::{Model, ModelTier},
    provider::{ChatCompleteParameters, ChatCompletionProvider as _},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = ColloquyClient::new(backend);

    let params = ChatCompleteParameters::new(
        vec![GenericMessage::new(
            "Name three things Rust is good at, one line each.".into(),
            GenericRole::User,
        )],
        Model::Tier(ModelTier::Base),
    );

    let response = client.chat_complete(params).await?;

    println!("Assistant: {}", response.message.content);
    if let Some(usage) = response.usage {
        println!(
            "({} prompt + {} completion = {} tokens)",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }
    Ok(())
}
