use serde::{Deserialize, Serialize};

/// A row of the geocoded mountain registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct GeocodedMountain {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub code: Option<String>,
}

impl GeocodedMountain {
    pub fn geolocation(&self) -> Geolocation {
        Geolocation {
            latitude: self.latitude,
            longitude: self.longitude,
            code: self.code.clone(),
        }
    }
}

/// Fields merged into a record when the registry knows the mountain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
