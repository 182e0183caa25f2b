//! Object-store adapters.

mod fs;

pub use fs::FsObjectStore;
