use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAX_DICE: u8 = 12;
pub const DEFAULT_ROLL_DELAY_MS: u64 = 300;

/// Tunables for the roll pipeline. Every field has a default, so a partial
/// YAML file only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct RollerConfig {
    /// Largest accepted dice count.
    pub max_dice: u8,
    /// Delay between accepting a roll and revealing its faces.
    pub roll_delay_ms: u64,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
            roll_delay_ms: DEFAULT_ROLL_DELAY_MS,
        }
    }
}

impl RollerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.max_dice == 0 {
            return Err(ConfigError::ZeroMaxDice);
        }
        Ok(self)
    }
}
