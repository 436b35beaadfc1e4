mod options;
mod walker;

pub use options::ScanOptions;
pub use walker::{project_path, scan_project, scan_subtree};
