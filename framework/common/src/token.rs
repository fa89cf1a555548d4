//! Correlation tokens tying a player instance to the run that spawned it.

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    num::{NonZeroU128, TryFromIntError},
};

/// UUID to associate a player's messages with the run that booted it.
///
/// The host mints a fresh token per run and hands it to the player at boot;
/// the player echoes it in its ready signal. A ready signal carrying a stale
/// token belongs to a superseded run and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunToken(pub NonZeroU128);

impl RunToken {
    #[must_use]
    pub fn new_random() -> Self {
        Self(thread_rng().r#gen())
    }
}

impl TryFrom<u128> for RunToken {
    type Error = TryFromIntError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        value.try_into().map(Self)
    }
}

impl Display for RunToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::RunToken;

    #[test]
    fn random_tokens_are_distinct() {
        let first = RunToken::new_random();
        let second = RunToken::new_random();
        assert_ne!(first, second, "two runs must never share a token");
    }
}
