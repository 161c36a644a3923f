//! Model identifiers used throughout the **colloquy** workspace.
//!
//! The enum hierarchy keeps the *public* API blissfully simple while allowing
//! each provider crate to map the variants onto its own naming scheme.  As a
//! consequence you never have to type literal strings such as `"gpt-4o"`
//! in your application code—pick an enum variant instead and let the adapter
//! translate it.
//!
//! # Adding more tiers
//!
//! 1. **Tier enum**
//!    Add the variant to [`ModelTier`].
//! 2. **Mapping layer**
//!    Update the mapping function in the provider crate
//!    (`colloquy-openai::model_map::map_model`, etc.).
//! 3. **Compile-time safety**
//!    The compiler will tell you if you forgot to handle the new variant in
//!    provider match statements.
//!
//! # Example
//!
//! ```rust
//! use colloquy_core::model::{Model, ModelTier};
//! assert_eq!(Model::from(ModelTier::Pro), Model::Tier(ModelTier::Pro));
//! ```

/// Universal identifier for an LLM model.
///
/// * `Tier` – one of the closed set of logical tiers the application exposes.
/// * `Custom` – any provider / model name not covered by the tiers. Use this if
///   you run a self-hosted or beta model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in logical tiers, translated by the active backend.
    Tier(ModelTier),
    /// Fully qualified provider model ID (`"gpt-4.1-mini"` or similar).
    Custom(&'static str),
}

/// Closed set of logical model tiers.
///
/// Keeping the list small avoids accidental typos while still allowing
/// arbitrary model names through [`Model::Custom`].  A tier the active
/// backend cannot map is rejected loudly when the request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTier {
    /// Cheapest tier, for quick conversational traffic.
    Base,
    /// Mid tier with stronger reasoning.
    Standard,
    /// Top tier.
    Pro,
}

impl From<ModelTier> for Model {
    fn from(val: ModelTier) -> Self {
        Model::Tier(val)
    }
}
