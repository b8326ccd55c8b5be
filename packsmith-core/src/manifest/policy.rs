//! Manifest format versions and the engine baselines they demand.

use super::version::PackVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Manifest schema generation, serialized as the bare integer.
///
/// Version 1 is the legacy schema for engines up to 1.13; version 2 is the
/// current schema introduced with engine 1.14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FormatVersion {
    V1 = 1,
    V2 = 2,
}

/// Integer in the `format_version` field that is neither 1 nor 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown manifest format version {0}; expected 1 or 2")]
pub struct UnknownFormatVersion(u8);

impl TryFrom<u8> for FormatVersion {
    type Error = UnknownFormatVersion;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(UnknownFormatVersion(other)),
        }
    }
}

impl From<FormatVersion> for u8 {
    fn from(version: FormatVersion) -> Self {
        version as u8
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

impl FormatVersion {
    /// Minimum supported engine baseline for this schema generation.
    pub const fn engine_floor(self) -> PackVersion {
        match self {
            Self::V1 => PackVersion::new(1, 13, 0),
            Self::V2 => PackVersion::new(1, 16, 0),
        }
    }

    /// Whether `engine_version` may appear as `min_engine_version` under
    /// this schema generation.
    ///
    /// Version 2 changed the schema at engine minor 14, so any `1.13.x` or
    /// older engine line is contradictory there. Version 1 accepts any
    /// parsed version.
    pub const fn accepts_engine_version(self, engine_version: PackVersion) -> bool {
        match self {
            Self::V1 => true,
            Self::V2 => engine_version.minor > 13,
        }
    }
}
