// Save module - the persisted progress record (beaten flag, best score)

pub mod manager;
pub mod types;

pub use manager::ProgressManager;
pub use types::{ProgressData, ProgressError, CURRENT_PROGRESS_VERSION};
