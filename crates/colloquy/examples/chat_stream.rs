//! # Streaming Chat Completion – Real-time Example
//!
//! Shows how to consume incremental text **deltas** via
//! [`ColloquyClient::chat_stream`].
//!
//! Whereas `chat_complete` collects the full reply before returning,
//! streaming lets you render partial output as soon as it arrives—perfect
//! for live terminals, web sockets, or any UX where latency matters.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example chat_stream
//! ```
//!
//! The assistant’s reply appears character-by-character.

use colloquy::openai::OpenAiAdapterBuilder;
use colloquy::{
    ColloquyClient,
    generic::{GenericMessage, GenericRole},
    model::{Model, ModelTier},
    provider::ChatCompleteParameters,
};
use futures_util::StreamExt; // for `next`
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Needs `OPENAI_API_KEY` in the env.
    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = ColloquyClient::new(backend);

    let messages = vec![
        GenericMessage::new(
            "You are a concise travel guide.".into(),
            GenericRole::System,
        ),
        GenericMessage::new(
            "Describe a walking tour of Yerevan in five sentences.".into(),
            GenericRole::User,
        ),
    ];

    let params = ChatCompleteParameters::new(messages, Model::Tier(ModelTier::Pro));

    let mut stream = client.chat_stream(params);

    print!("Assistant: ");
    io::stdout().flush().ok();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(text) => {
                print!("{text}");
                io::stdout().flush().ok();
            }
            Err(e) => {
                eprintln!("\n\nError while streaming: {e}");
                break;
            }
        }
    }

    println!("\n\nStream finished");
    Ok(())
}
