pub mod dummy;
pub mod mirror;
pub mod report;
pub mod restore;

pub use dummy::{DUMMY_SUFFIX, dummy_name, original_name, read_dummy_size, write_dummy};
pub use mirror::{MirrorSummary, mirror_tree};
pub use report::{FileEntry, PathReport, collect_report};
pub use restore::{RestoreSummary, restore_names};
