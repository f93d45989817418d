//! Export of the finished collection: records, metadata table and the
//! output directory they land in.

mod metadata;
mod output_dir;
mod records;

pub use metadata::{MetadataFile, MetadataWriter};
pub use output_dir::{prepare_output_dir, Prepared};
pub use records::build_records;
