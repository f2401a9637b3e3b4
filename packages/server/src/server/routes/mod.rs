// HTTP routes
pub mod health;
pub mod volcano;

pub use health::*;
pub use volcano::*;
