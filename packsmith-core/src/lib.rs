//! Core engine for packsmith: an interactive wizard that builds, archives,
//! and deploys content-pack manifests.
//!
//! The pieces mirror the lifecycle of a pack: [`wizard`] assembles a
//! [`manifest::Manifest`] field by field, [`manifest::store`] persists it as
//! `manifest.json`, [`archive`] zips the working directory, and [`deploy`]
//! copies it into the consuming application's installation tree. [`session`]
//! ties them together behind a menu; every failure is a typed
//! [`error::PackError`] carrying the exit code the process ends with.

pub mod archive;
pub mod deploy;
pub mod error;
pub mod manifest;
pub mod session;
pub mod wizard;

pub use error::{PackError, Result};
