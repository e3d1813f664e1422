pub mod classify;
pub mod walk;

pub use classify::classify;
pub use walk::{list_output_files, ScanListing};
