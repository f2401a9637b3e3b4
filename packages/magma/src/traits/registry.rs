use async_trait::async_trait;

use crate::error::RegistryError;
use crate::types::GeocodedMountain;

/// Read-only access to the geocoded mountain registry.
#[async_trait]
pub trait MountainRegistry: Send + Sync {
    /// Look a mountain up by name, compared after [`crate::normalize::name_key`].
    async fn find_by_name(&self, name: &str) -> Result<Option<GeocodedMountain>, RegistryError>;

    /// Every registered mountain.
    async fn all(&self) -> Result<Vec<GeocodedMountain>, RegistryError>;
}
