use std::borrow::Cow;

use colloquy_core::model::{Model, ModelTier};

pub const GPT35_TURBO: &str = "gpt-3.5-turbo";
pub const GPT4: &str = "gpt-4";
pub const GPT4_O: &str = "gpt-4o";

pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    if let Model::Custom(custom) = model {
        return Some(Cow::Borrowed(*custom));
    }

    let Model::Tier(tier) = model else {
        return None;
    };

    match tier {
        ModelTier::Base => Some(GPT35_TURBO.into()),
        ModelTier::Standard => Some(GPT4.into()),
        ModelTier::Pro => Some(GPT4_O.into()),
    }
}
