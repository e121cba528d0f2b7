//! Repository trait definitions.
//!
//! The traits here are the boundary contract the analysis core requires
//! from its collaborators: a registry of areas and road metadata, and a
//! store of timestamped traffic samples. Implementations must be
//! `Send + Sync` to work with async Rust.

pub mod error;
pub mod roads;
pub mod samples;

pub use error::{RepositoryError, RepositoryResult};
pub use roads::RoadRegistry;
pub use samples::SampleStore;

/// Combined repository interface: road registry plus sample store.
///
/// Blanket-implemented for any type that provides both halves, so a
/// single backend object can be shared as `Arc<dyn FullRepository>`.
pub trait FullRepository: RoadRegistry + SampleStore {}

impl<T: RoadRegistry + SampleStore> FullRepository for T {}
