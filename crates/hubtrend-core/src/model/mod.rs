pub mod record;
pub mod result;
pub mod window;

pub use record::{author_of, History, ItemKind, SnapshotRecord};
pub use result::DeltaResult;
pub use window::{DeltaWindow, DEFAULT_DAYS, DEFAULT_TOP_N};
