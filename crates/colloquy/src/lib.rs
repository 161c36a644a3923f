//! # `colloquy` – The umbrella crate
//!
//! This crate is a *one-stop import* that glues together the building-block
//! crates in the workspace
//!
//! | Crate                  | What it provides                                                               |
//! |------------------------|--------------------------------------------------------------------------------|
//! | **`colloquy-core`**    | Provider-agnostic traits, generic messages and models, the client, errors      |
//! | **`colloquy-history`** | Conversation transcripts, titles, age grouping, JSON file store, access gate   |
//! | **`colloquy-openai`**  | Streaming HTTP client for the OpenAI *v1* chat-completion API *(optional)*     |
//!
//! By default the crate re-exports **core** and **history** so downstream
//! users can stay provider-agnostic.  The default-enabled `openai` Cargo
//! feature additionally re-exports the adapter crate so a single dependency
//! line is enough to access the whole stack:
//!
//! ```toml
//! [dependencies]
//! colloquy = "0.1"
//! ```
//!
//! ## Design philosophy
//!
//! * **Opt-in providers** – Disabling `openai` drops `reqwest`, TLS, etc.,
//!   and your binary stays lean.
//! * **No procedural macros** – Everything is powered by ordinary traits and
//!   `impl`s so you can understand and extend the code without magic.
//! * **Streaming first** – Replies surface as text deltas the moment they
//!   arrive; nothing buffers a whole completion unless you ask it to.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use colloquy::{
//!     ColloquyClient,
//!     generic::{GenericMessage, GenericRole},
//!     model::{Model, ModelTier},
//!     provider::ChatCompleteParameters,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = colloquy::openai::OpenAiAdapterBuilder::new_from_env().build()?;
//!     let client = ColloquyClient::new(backend);
//!
//!     let params = ChatCompleteParameters::new(
//!         vec![GenericMessage::new("Say hello!".into(), GenericRole::User)],
//!         Model::Tier(ModelTier::Base),
//!     );
//!
//!     client
//!         .chat_stream_with(params, |chunk| print!("{chunk}"), || println!())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! The `pub use` statements below simply forward the public API of the
//! individual crates so users can write `colloquy::ColloquyClient` instead
//! of juggling three separate dependencies.

pub use colloquy_core::*;
pub use colloquy_history as history;

#[cfg(feature = "openai")]
pub use colloquy_openai as openai;
