use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroUsize, str::FromStr};

#[cfg(test)]
use proptest::prelude::*;

/// Configuration for the [`Evaluator`][`crate::chess::Evaluator`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename = "options", default)]
pub struct Options {
    /// The number of threads to use while filtering out moves that leave the king in check.
    #[cfg_attr(test, strategy((1usize..=4).prop_filter_map("zero", |t| NonZeroUsize::new(t))))]
    pub threads: NonZeroUsize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threads: NonZeroUsize::MIN,
        }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Options`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse evaluator configuration")]
pub struct ParseOptionsError(ron::de::SpannedError);

impl FromStr for Options {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
