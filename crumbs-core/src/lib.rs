pub mod catalog;
pub mod clean;
pub mod discovery;
pub mod disk;
pub mod error;
pub mod platform;
pub mod resolve;
pub mod safety;
pub mod selection;
pub mod size;

pub use catalog::{Catalog, CatalogEntry};
pub use clean::{CleanEvent, CleanReport, Cleaner};
pub use discovery::{DiscoveredEntry, DiscoveryOptions, discover};
pub use disk::{DiskProbe, DiskSnapshot, SystemDisk};
pub use error::{CrumbsError, Result};
pub use platform::Platform;
pub use resolve::PathResolver;
pub use safety::{Protection, SafetyValidator, Verdict};
pub use selection::{EventSource, MenuEvent, Selection, SessionEnd, Transition, run_session};
pub use size::{estimate_size, format_size, size_percentage};
