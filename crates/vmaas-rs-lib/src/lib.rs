pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod package;
pub use package::Nevra;

pub mod cache;
pub use cache::Snapshot;
pub use cache::SnapshotHandle;

pub mod updates;
pub use updates::Request;
pub use updates::Updates;
