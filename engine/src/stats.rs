use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::StatsError;

/// A mean rounded half-up to two decimals, held as integer hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Average {
    hundredths: u64,
}

impl Average {
    /// `total / count` rounded half-up to two decimals. `count` must be non-zero.
    fn from_ratio(total: u64, count: u64) -> Self {
        // round(total * 100 / count) with halves going up
        Self { hundredths: (total * 200 + count) / (2 * count) }
    }

    pub fn hundredths(self) -> u64 {
        self.hundredths
    }

    pub fn as_f64(self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: u64,
    pub average: Average,
    pub highest: u8,
    pub lowest: u8,
}

impl Statistics {
    pub fn compute(values: &[u8]) -> Result<Self, StatsError> {
        let (&first, rest) = values.split_first().ok_or(StatsError::EmptyInput)?;
        let (total, highest, lowest) = rest.iter().fold(
            (u64::from(first), first, first),
            |(total, hi, lo), &v| (total + u64::from(v), hi.max(v), lo.min(v)),
        );
        Ok(Self {
            total,
            average: Average::from_ratio(total, values.len() as u64),
            highest,
            lowest,
        })
    }
}
