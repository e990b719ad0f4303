//! Wire models for the Sahool API.
//!
//! Ids named after another entity (`owner`, `farm`, `crop`, `field`,
//! `device`, `sensor`) are plain integers; nothing here resolves them.
//! `*_name` and `*_count` fields are display copies of data that lives on the
//! referenced entity and may be stale.

pub mod auth;
pub mod farm;
pub mod iot;
pub mod irrigation;
pub mod page;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, TokenRefreshRequest};
pub use farm::{Crop, Farm, Field};
pub use iot::{Actuator, IoTDevice, Sensor, SensorReading};
pub use irrigation::IrrigationSchedule;
pub use page::Page;
pub use user::{User, UserKind};
