//! In-memory model of `manifest.json`.
//!
//! Field declaration order is load-bearing: it fixes the key order of the
//! serialized file (`format_version`, `header`, `modules`).

pub mod policy;
pub mod store;
pub mod version;

pub use policy::FormatVersion;
pub use version::PackVersion;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Root descriptor for a content pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: FormatVersion,
    pub header: Header,
    pub modules: Vec<Module>,
}

/// Pack identity and engine compatibility. Created once per manifest; the
/// uuid is assigned at creation and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub description: String,
    pub uuid: Uuid,
    pub version: PackVersion,
    pub min_engine_version: PackVersion,
}

/// One declared content unit within a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub uuid: Uuid,
    pub description: String,
    pub version: PackVersion,
    #[serde(rename = "type")]
    pub kind: ModuleType,
}

/// On-disk module type token.
///
/// The wizard only ever produces the three known kinds. Deserialization
/// keeps any other token verbatim as [`ModuleType::Unrecognized`] so that a
/// hand-edited manifest still loads and deployment can ask the operator
/// which category to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleType {
    Resources,
    Data,
    SkinPack,
    Unrecognized(String),
}

impl ModuleType {
    /// The token written to disk.
    pub fn token(&self) -> &str {
        match self {
            Self::Resources => "resources",
            Self::Data => "data",
            Self::SkinPack => "skin_pack",
            Self::Unrecognized(token) => token,
        }
    }
}

impl From<String> for ModuleType {
    fn from(token: String) -> Self {
        match token.as_str() {
            "resources" => Self::Resources,
            "data" => Self::Data,
            "skin_pack" => Self::SkinPack,
            _ => Self::Unrecognized(token),
        }
    }
}

impl From<ModuleType> for String {
    fn from(kind: ModuleType) -> Self {
        match kind {
            ModuleType::Unrecognized(token) => token,
            known => known.token().to_string(),
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
