// MAGMA volcano activity API - server core
//
// HTTP surface over the `magma` scraping library: listing pages, detail
// pages enriched from the mountain registry, and the map aggregate.

pub mod config;
pub mod server;

pub use config::*;
