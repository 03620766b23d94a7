pub mod artifact_store;
pub mod error;

pub use artifact_store::ArtifactStore;
pub use error::StoreError;
