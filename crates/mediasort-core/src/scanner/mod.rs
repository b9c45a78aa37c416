pub mod scan;
pub mod walk;

pub use scan::{collect_new, index_destination, DestinationIndex, SourceScan};
pub use walk::list_files;
