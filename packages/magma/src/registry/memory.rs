//! In-memory registry for tests and local development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::RegistryError;
use crate::normalize::name_key;
use crate::traits::MountainRegistry;
use crate::types::GeocodedMountain;

/// Registry held in a `Vec`. Data is lost on restart.
#[derive(Default)]
pub struct MemoryRegistry {
    mountains: RwLock<Vec<GeocodedMountain>>,
    queries: AtomicUsize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mountains(mountains: Vec<GeocodedMountain>) -> Self {
        Self {
            mountains: RwLock::new(mountains),
            queries: AtomicUsize::new(0),
        }
    }

    /// Register a mountain with the next free id.
    pub fn insert(&self, name: &str, latitude: f64, longitude: f64, code: Option<&str>) -> i64 {
        let mut mountains = self.mountains.write().unwrap();
        let id = mountains.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        mountains.push(GeocodedMountain {
            id,
            name: name.to_string(),
            latitude,
            longitude,
            code: code.map(str::to_string),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.mountains.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MountainRegistry for MemoryRegistry {
    async fn find_by_name(&self, name: &str) -> Result<Option<GeocodedMountain>, RegistryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let key = name_key(name);
        Ok(self
            .mountains
            .read()
            .unwrap()
            .iter()
            .find(|m| name_key(&m.name) == key)
            .cloned())
    }

    async fn all(&self) -> Result<Vec<GeocodedMountain>, RegistryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.mountains.read().unwrap().clone())
    }
}
