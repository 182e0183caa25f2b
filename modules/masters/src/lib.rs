//! Master-data module.
//!
//! One generic record store backs eight logical master types (cities,
//! locations, amenities, floors, towers, property types, rooms, washrooms),
//! each exposed through a thin per-kind adapter that fixes the discriminator
//! and layers on type-specific validation and named queries.

pub mod api;
pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::model::{MasterKind, MasterRecord, RecordStatus};
pub use domain::repo::MasterRepository;
pub use infra::storage::SeaOrmMasterRepository;
pub use infra::storage::migrations::Migrator;
