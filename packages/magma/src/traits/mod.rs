//! Collaborator seams: where markup comes from and where coordinates live.

pub mod fetcher;
pub mod registry;

pub use fetcher::DocumentFetcher;
pub use registry::MountainRegistry;
