//! File upload module.
//!
//! Bytes go straight to an [`domain::ports::ObjectStore`] implementation;
//! the domain layer only keeps metadata rows and the ownership rule
//! (only the uploader may delete a file).

pub mod api;
pub mod domain;
pub mod infra;

pub use domain::error::FileError;
pub use domain::model::FileRecord;
pub use domain::ports::ObjectStore;
pub use domain::service::FileService;
pub use infra::object_store::FsObjectStore;
pub use infra::storage::SeaOrmFileRepository;
pub use infra::storage::migrations::Migrator as FilesMigrator;
