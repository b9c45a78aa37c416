pub mod config;
pub mod copier;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod membership;
pub mod placement;
pub mod progress;
pub mod scanner;

pub use config::{AppConfig, HashErrorPolicy};
pub use descriptor::{FileDescriptor, Period};
pub use engine::{RunSummary, SortEngine};
pub use error::{CopyError, Error};
pub use membership::MembershipSet;
pub use progress::{ProgressReporter, SilentReporter};
