use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod presenter;
pub mod roller;
pub mod scheduler;
pub mod stats;
pub mod store;
pub mod theme;
pub mod validate;

pub use config::RollerConfig;
pub use error::{ConfigError, InvalidRoll, RollError, StatsError, StoreError, UnknownTheme};
pub use presenter::{DieImage, Page, Presenter, ResultView, ThemeView, Tone};
pub use roller::DiceRoller;
pub use stats::{Average, Statistics};
pub use store::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use theme::{Theme, ThemeController};
pub use validate::validate;

/// Number of faces on every die this crate rolls.
pub const FACES: u8 = 6;

enum Source {
    Rng(ChaCha8Rng),
    Scripted { values: Vec<u8>, next: usize },
}

pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Rng(ChaCha8Rng::from_entropy()) }
    }

    /// Replays `values` in order, cycling when exhausted. Values are clamped to 1..=6.
    /// An empty script always yields 1.
    pub fn from_scripted(values: Vec<u8>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    pub fn d6(&mut self) -> u8 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=FACES),
            Source::Scripted { values, next } => {
                if values.is_empty() {
                    return 1;
                }
                let v = values[*next % values.len()];
                *next += 1;
                v.clamp(1, FACES)
            }
        }
    }

    /// Roll `n` dice independently; repeats are expected.
    pub fn roll_many(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.d6()).collect()
    }
}

/* ---------------- roll result ---------------- */

/// The face values of one completed roll, in the order they were rolled.
///
/// Always non-empty and every face lies in `1..=6`. Serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RollResult {
    values: Vec<u8>,
}

impl RollResult {
    pub fn new(values: Vec<u8>) -> Result<Self, InvalidRoll> {
        if values.is_empty() {
            return Err(InvalidRoll::Empty);
        }
        if let Some(&bad) = values.iter().find(|v| !(1..=FACES).contains(*v)) {
            return Err(InvalidRoll::FaceOutOfRange(bad));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn dice_count(&self) -> usize {
        self.values.len()
    }
}

impl TryFrom<Vec<u8>> for RollResult {
    type Error = InvalidRoll;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<RollResult> for Vec<u8> {
    fn from(roll: RollResult) -> Self {
        roll.values
    }
}
