//! Collection configuration.
//!
//! A collection is described by a `traitmix.yaml` manifest: the collection
//! name and description, how many images to make, where the component
//! layers live, and the ordered list of weighted traits.

mod manifest;

pub use manifest::{Manifest, METADATA_FILENAME};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "traitmix.yaml";
