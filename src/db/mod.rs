//! Storage module for road networks and traffic samples.
//!
//! This module provides abstractions for data access via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, CLI, tests)               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Analysis Pipeline          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! │  - RoadRegistry: areas and road metadata                │
//! │  - SampleStore: timestamped congestion samples          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The analysis core only depends on the traits; the traffic sample store
//! is an external collaborator in real deployments, and the in-memory
//! implementation here covers local development and tests.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod models;
pub mod repositories;
pub mod repository;

pub use checksum::calculate_checksum;
pub use models::AreaInfo;
pub use repositories::LocalRepository;
pub use repository::{
    FullRepository, RepositoryError, RepositoryResult, RoadRegistry, SampleStore,
};
