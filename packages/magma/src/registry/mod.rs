//! Geocoded mountain registry backends.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryRegistry;
#[cfg(feature = "postgres")]
pub use postgres::PostgresRegistry;
