//! # Persisted Conversation
//!
//! A minimal rendition of the application shell around the streaming core:
//! load the local history, start a conversation, stream a reply into it,
//! save everything back, and print the sidebar-style grouped listing.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example chat_with_history
//! ```

use chrono::Utc;
use colloquy::history::HistoryStore;
use colloquy::history::conversation::{ChatMessage, Conversation, Sender};
use colloquy::history::groups::group_by_age;
use colloquy::openai::OpenAiAdapterBuilder;
use colloquy::{
    ColloquyClient,
    model::{Model, ModelTier},
    provider::ChatCompleteParameters,
};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = HistoryStore::open_default()?;
    let mut conversations = store.load()?;

    let mut conversation = Conversation::new(Utc::now());
    conversation.push(ChatMessage::new(
        "What is the tallest mountain in Europe?",
        Sender::User,
        Utc::now(),
    ));

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = ColloquyClient::new(backend);

    let params = ChatCompleteParameters::new(
        conversation.turns(),
        Model::Tier(ModelTier::Standard),
    );

    print!("Assistant: ");
    io::stdout().flush().ok();

    let mut reply = String::new();
    client
        .chat_stream_with(
            params,
            |chunk| {
                print!("{chunk}");
                io::stdout().flush().ok();
                reply.push_str(chunk);
            },
            || println!(),
        )
        .await?;

    conversation.push(
        ChatMessage::new(reply, Sender::Assistant, Utc::now()).with_model("standard"),
    );
    conversations.insert(0, conversation);
    store.save(&conversations)?;

    let now = Utc::now();
    let grouped = group_by_age(&conversations, &now);
    for (label, section) in [
        ("Today", &grouped.today),
        ("Previous 7 days", &grouped.past_week),
        ("Previous 30 days", &grouped.past_month),
        ("Older", &grouped.older),
    ] {
        if section.is_empty() {
            continue;
        }
        println!("\n{label}:");
        for conversation in section {
            println!("  {}", conversation.title);
        }
    }

    Ok(())
}
