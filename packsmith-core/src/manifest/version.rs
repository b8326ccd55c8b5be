//! Three-component pack versions.
//!
//! The on-disk form is a JSON array of three integers (`[1, 2, 0]`); the
//! interactive form is a dotted string (`1.2.0`). Components are unsigned,
//! so a negative segment fails to parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor.patch` triple of non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
pub struct PackVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PackVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl From<[u32; 3]> for PackVersion {
    fn from([major, minor, patch]: [u32; 3]) -> Self {
        Self::new(major, minor, patch)
    }
}

impl From<PackVersion> for [u32; 3] {
    fn from(version: PackVersion) -> Self {
        [version.major, version.minor, version.patch]
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Rejected version string, kept verbatim for the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{0}`: expected three dot-separated non-negative integers")]
pub struct ParseVersionError(String);

impl FromStr for PackVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_string());

        let mut segments = s.split('.');
        let (Some(major), Some(minor), Some(patch), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(invalid());
        };

        Ok(Self::new(
            major.parse().map_err(|_| invalid())?,
            minor.parse().map_err(|_| invalid())?,
            patch.parse().map_err(|_| invalid())?,
        ))
    }
}
