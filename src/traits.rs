use anyhow::Result;

use crate::format::LineFormat;

/// Build a value by asking the user. The format decides which fields can be stored.
pub trait CreateByPrompt {
    fn create_by_prompt(format: &LineFormat) -> Result<Self>
    where
        Self: Sized;
}

/// Ask the user which fields of an existing value to change.
pub trait UpdateByPrompt {
    type Patch;

    fn update_by_prompt(&self, format: &LineFormat) -> Result<Self::Patch>;
}
