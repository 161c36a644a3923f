//! Provider-agnostic building blocks for the **Colloquy** chat SDK.
//!
//! This crate defines the small vocabulary the rest of the workspace speaks:
//!
//! * [`generic`] – provider-independent chat messages and roles,
//! * [`model`] – logical model identifiers mapped by each backend,
//! * [`provider`] – the backend traits (blocking and streaming completion),
//! * [`client`] – a thin generic client bound to one backend,
//! * [`error`] – the unified error type providers convert into.
//!
//! Backend crates (e.g. `colloquy-openai`) implement the provider traits and
//! the same [`ColloquyClient`] works out of the box.

pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod provider;

pub use client::ColloquyClient;
