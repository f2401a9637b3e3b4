//! PostgreSQL registry over the `mountains` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::RegistryError;
use crate::normalize::name_key;
use crate::traits::MountainRegistry;
use crate::types::GeocodedMountain;

/// Reads geocoded mountains from PostgreSQL.
///
/// Expects the `mountains (id, name, latitude, longitude, code)` table created
/// by the server migrations. Names are compared with whitespace removed and
/// case folded on both sides.
#[derive(Clone)]
pub struct PostgresRegistry {
    pool: PgPool,
}

impl PostgresRegistry {
    /// Use an existing pool (e.g. the server's `PgPool`).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_error(e: sqlx::Error) -> RegistryError {
    RegistryError::Query(Box::new(e))
}

#[async_trait]
impl MountainRegistry for PostgresRegistry {
    async fn find_by_name(&self, name: &str) -> Result<Option<GeocodedMountain>, RegistryError> {
        sqlx::query_as::<_, GeocodedMountain>(
            r#"
            SELECT id, name, latitude, longitude, code
            FROM mountains
            WHERE lower(regexp_replace(name, '\s', '', 'g')) = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)
    }

    async fn all(&self) -> Result<Vec<GeocodedMountain>, RegistryError> {
        sqlx::query_as::<_, GeocodedMountain>(
            "SELECT id, name, latitude, longitude, code FROM mountains ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)
    }
}
