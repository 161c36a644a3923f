mod adapter;
mod model_map;
mod provider_impl_chat;
mod provider_impl_chat_stream;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub mod api_v1;
mod client;
pub mod error;
mod sse;
