//! # BagIt Profiles
//!
//! Loads declarative BagIt profiles into a flat rule set and checks bag metadata
//! against it. Also provides the path encoding used when laying out an export
//! package on disk.
#![deny(missing_docs)]
pub mod baginfo;
pub mod catalog;
pub mod path;
pub mod profile;
pub mod validate;

pub use profile::{LoadError, Profile};
pub use validate::{validate, Fields, Rules, ValidationError, Violation};
