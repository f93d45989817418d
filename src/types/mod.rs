//! Core domain types for traitmix.
//!
//! - `TraitDef` - a named layer with weighted variants
//! - `Combination` - one variant per trait
//! - `ExportRecord` - a combination with its file/name/description
//! - `Colour` - opaque canvas colour

mod colour;
mod combination;
mod record;
mod traits;

pub use colour::Colour;
pub use combination::Combination;
pub use record::{columns, ExportRecord, BASE_COLUMNS};
pub use traits::{combination_space, TraitDef};
