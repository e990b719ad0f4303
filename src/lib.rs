// Declare modules at the root level
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod sensor_validation;
pub mod time;
pub mod validators;
pub mod wire;

// Test utilities module (available in test and integration test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Also re-export at root for convenience
pub use chart::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use sensor_validation::*;
pub use time::*;
pub use validators::*;
pub use wire::{decode_list, FieldKind, FieldMapping, JsonMap, WireField, WireModel, WireReader};
