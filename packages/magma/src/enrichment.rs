//! Registry enrichment.
//!
//! Names are compared with [`name_key`] on both sides and must be exactly
//! equal. A miss is not an error; the record is returned without location.

use std::collections::HashMap;
use tracing::debug;

use crate::error::RegistryError;
use crate::normalize::name_key;
use crate::traits::MountainRegistry;
use crate::types::{EruptionDetailReport, GeocodedMountain, Geolocation, MountainDetailReport};

/// A record that can carry registry coordinates.
pub trait Locatable {
    /// Name to look up in the registry.
    fn registry_name(&self) -> &str;

    fn set_location(&mut self, location: Geolocation);
}

impl Locatable for MountainDetailReport {
    fn registry_name(&self) -> &str {
        &self.name
    }

    fn set_location(&mut self, location: Geolocation) {
        self.location = Some(location);
    }
}

impl Locatable for EruptionDetailReport {
    // The notice title is the mountain name once the prefix is stripped.
    fn registry_name(&self) -> &str {
        &self.title
    }

    fn set_location(&mut self, location: Geolocation) {
        self.location = Some(location);
    }
}

/// Look the record up in `registry` and merge coordinates on a match.
pub async fn enrich<T: Locatable + Send>(
    registry: &dyn MountainRegistry,
    mut record: T,
) -> Result<T, RegistryError> {
    match registry.find_by_name(record.registry_name()).await? {
        Some(mountain) => record.set_location(mountain.geolocation()),
        None => debug!(mountain = %record.registry_name(), "No registry match"),
    }
    Ok(record)
}

/// Registry snapshot indexed by normalized name.
///
/// When two entries normalize to the same key the first one wins.
pub struct RegistryIndex {
    by_key: HashMap<String, GeocodedMountain>,
}

impl RegistryIndex {
    pub fn new(mountains: Vec<GeocodedMountain>) -> Self {
        let mut by_key = HashMap::with_capacity(mountains.len());
        for mountain in mountains {
            by_key.entry(name_key(&mountain.name)).or_insert(mountain);
        }
        Self { by_key }
    }

    pub fn lookup(&self, name: &str) -> Option<&GeocodedMountain> {
        self.by_key.get(&name_key(name))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;
    use crate::types::DetailBody;

    fn mountain(id: i64, name: &str) -> GeocodedMountain {
        GeocodedMountain {
            id,
            name: name.to_string(),
            latitude: -7.5,
            longitude: 110.4,
            code: None,
        }
    }

    fn notice(title: &str) -> EruptionDetailReport {
        EruptionDetailReport {
            image: String::new(),
            date: "Senin, 13 Mei 2024".to_string(),
            title: title.to_string(),
            author: "Sari".to_string(),
            description: String::new(),
            recommendations: vec![],
            location: None,
        }
    }

    #[test]
    fn test_index_matches_normalized_names() {
        let index = RegistryIndex::new(vec![mountain(1, "Gunung  Merapi"), mountain(2, "Ibu")]);

        assert_eq!(index.lookup("gunung merapi").map(|m| m.id), Some(1));
        assert_eq!(index.lookup(" IBU ").map(|m| m.id), Some(2));
        assert!(index.lookup("Merapi").is_none());
    }

    #[test]
    fn test_index_first_duplicate_wins() {
        let index = RegistryIndex::new(vec![mountain(1, "Semeru"), mountain(2, "SEMERU")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("semeru").map(|m| m.id), Some(1));
    }

    #[tokio::test]
    async fn test_enrich_eruption_notice_by_title() {
        let registry = MemoryRegistry::new();
        registry.insert("Ibu", 1.488, 127.63, Some("IBU"));

        let enriched = enrich(&registry, notice("Ibu")).await.unwrap();
        let location = enriched.location.unwrap();
        assert_eq!(location.latitude, 1.488);
        assert_eq!(location.code.as_deref(), Some("IBU"));

        let missed = enrich(&registry, notice("Lewotobi")).await.unwrap();
        assert!(missed.location.is_none());
    }

    #[tokio::test]
    async fn test_enriched_detail_serializes_flat_location() {
        let registry = MemoryRegistry::new();
        registry.insert("Merapi", -7.5, 110.4, None);

        let report = MountainDetailReport {
            level: "Level II (Waspada)".to_string(),
            name: "Merapi".to_string(),
            date: None,
            time: None,
            author: None,
            geo: None,
            report: DetailBody {
                image: "/img.jpg".to_string(),
                visual: "Asap".to_string(),
                climatology: None,
                seismicity: None,
                recommendations: None,
            },
            location: None,
        };

        let json = serde_json::to_value(enrich(&registry, report).await.unwrap()).unwrap();
        assert_eq!(json["latitude"], -7.5);
        assert_eq!(json["longitude"], 110.4);
        assert!(json.get("code").is_none());
    }
}
