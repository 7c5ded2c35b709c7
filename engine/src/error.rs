use std::path::PathBuf;

use thiserror::Error;

/// Rejections of a raw dice-count input. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Number of dice must be greater than 0.")]
    TooFew,
    #[error("You can only roll up to {max} dice at a time.")]
    TooMany { max: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("cannot compute statistics of an empty roll")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRoll {
    #[error("a roll needs at least one die")]
    Empty,
    #[error("face value {0} is outside 1..=6")]
    FaceOutOfRange(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}` (expected `light` or `dark`)")]
pub struct UnknownTheme(pub String);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not a JSON object of strings: {source}")]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored `{key}` is not valid JSON: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored `{key}` is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("max_dice must be at least 1")]
    ZeroMaxDice,
}
