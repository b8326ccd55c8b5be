//! Session failure taxonomy.
//!
//! Every fallible operation returns [`Result`]; whichever error reaches the
//! top of the session loop decides the process exit code and the message
//! printed before exit. Categories never stack: an operation carries exactly
//! one, and propagation through `?` preserves it.

use thiserror::Error;

/// A failure category reached during a wizard session.
///
/// Each variant has a fixed, user-visible description and a stable exit
/// code. Details of the underlying cause (I/O errors, parse errors) are
/// logged at the failure site rather than carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PackError {
    /// The working directory was never successfully selected.
    #[error("an error occurred during working directory selection")]
    WorkingDir,

    /// No valid manifest format version was chosen.
    #[error("an error occurred during format version selection")]
    FormatVersion,

    /// A header field failed validation and the operator declined to redo.
    #[error("an error occurred during header creation")]
    Header,

    /// A module field failed validation and the operator declined to redo.
    #[error("an error occurred during module creation")]
    Module,

    /// `manifest.json` could not be written into the working directory.
    #[error("an error occurred during manifest saving")]
    Persist,

    /// The pack archive could not be created.
    #[error("an error occurred during archive creation")]
    Archive,

    /// `manifest.json` could not be read back from the working directory.
    #[error("the manifest could not be read from the working directory")]
    ManifestRead,

    /// The host platform has no known game data directory.
    #[error("this platform is not supported for deployment")]
    PlatformLookup,

    /// The game data directory does not exist on this machine.
    #[error("the game data directory was not found; is the game installed?")]
    PlatformMissing,

    /// No installation category could be determined for the pack.
    #[error("the pack category for deployment could not be determined")]
    PackType,

    /// An installed pack with the same name was kept in place.
    #[error("deployment cancelled; the existing installed pack was kept")]
    Conflict,

    /// Copying the pack into the game data directory failed.
    #[error("an error occurred while copying the pack for deployment")]
    DeployCopy,
}

impl PackError {
    /// Process exit code for this category. Zero is reserved for a clean
    /// session end and never produced here.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::WorkingDir => 1,
            Self::FormatVersion => 2,
            Self::Header => 3,
            Self::Module => 4,
            Self::Persist => 9,
            Self::Archive => 10,
            Self::ManifestRead => 11,
            Self::PlatformLookup => 12,
            Self::PlatformMissing => 13,
            Self::PackType => 14,
            Self::Conflict => 15,
            Self::DeployCopy => 16,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
