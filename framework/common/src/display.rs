//! Display configuration for a run.

use std::{fmt::Display, str::FromStr};

/// How the player should size its render surface for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayConfig {
    /// Let the player pick its own surface size. No `setResolution` message
    /// is sent in this case.
    #[default]
    Native,
    /// Fixed surface size in pixels.
    Fixed { width: u32, height: u32 },
}

impl DisplayConfig {
    /// Decodes the wire sentinel: a zero dimension means "native".
    #[must_use]
    pub fn from_wire(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            Self::Native
        } else {
            Self::Fixed { width, height }
        }
    }
}

impl Display for DisplayConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Native => formatter.write_str("native"),
            Self::Fixed { width, height } => write!(formatter, "{width}x{height}"),
        }
    }
}

/// The resolution argument was neither `native` nor `WIDTHxHEIGHT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDisplayConfigError(pub String);

impl Display for ParseDisplayConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "invalid resolution `{}`; expected `native` or `WIDTHxHEIGHT`",
            self.0
        )
    }
}

impl std::error::Error for ParseDisplayConfigError {}

impl FromStr for DisplayConfig {
    type Err = ParseDisplayConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("native") {
            return Ok(Self::Native);
        }
        let error = || ParseDisplayConfigError(value.to_owned());
        let (width, height) = value.split_once(['x', 'X']).ok_or_else(error)?;
        let width: u32 = width.trim().parse().map_err(|_| error())?;
        let height: u32 = height.trim().parse().map_err(|_| error())?;
        if width == 0 || height == 0 {
            return Err(error());
        }
        Ok(Self::Fixed { width, height })
    }
}
