//! Local conversation history for the **Colloquy** chat SDK.
//!
//! The streaming client deliberately owns no persistence; this crate supplies
//! the pieces an application shell needs around it:
//!
//! * [`conversation`] – transcript types and title derivation,
//! * [`groups`] – age bucketing for a sidebar-style conversation list,
//! * [`store`] – JSON file persistence under a process-wide scope directory,
//! * [`access`] – the static access-code gate in front of the admin surface.

pub mod access;
pub mod conversation;
pub mod error;
pub mod groups;
pub mod store;

pub use conversation::{ChatMessage, Conversation, Sender};
pub use store::HistoryStore;
