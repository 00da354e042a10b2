//! Typed shapes of every metrics payload the dashboard consumes.
//!
//! Field names serialize in camelCase so the JSON served by the metrics API
//! maps directly onto these records.

pub mod characters;
pub mod cities;
pub mod economy;
pub mod factions;
pub mod overview;
pub mod performance;
pub mod world;

pub use characters::*;
pub use cities::*;
pub use economy::*;
pub use factions::*;
pub use overview::*;
pub use performance::*;
pub use world::*;
