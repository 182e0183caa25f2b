//! Projects module: builders, agents and projects with nested unit
//! configurations, media and documents. Master-data references (city,
//! location, property type, amenities) are validated through the
//! [`domain::ports::MasterLookup`] port.

pub mod api;
pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::service::{AgentService, BuilderService, ProjectService};
pub use infra::master_lookup::RepoMasterLookup;
pub use infra::storage::migrations::Migrator as ProjectsMigrator;
pub use infra::storage::{SeaOrmAgentRepository, SeaOrmBuilderRepository, SeaOrmProjectRepository};
