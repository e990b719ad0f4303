use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::sensor_validation::{classify_reading, ReadingLevel, SensorLimits};
use crate::time::Clock;
use crate::wire::wire_model;

wire_model! {
    /// Hardware node installed in a field.
    ///
    /// `device_id` is the identifier printed on the hardware; `id` is the
    /// backend's row id. `battery_level` is a percentage and
    /// `signal_strength` is in dBm.
    #[derive(Debug, Clone, PartialEq)]
    pub struct IoTDevice {
        pub id: i64 => "id",
        pub field: i64 => "field",
        pub field_name: String => "field_name",
        pub device_id: String => "device_id",
        pub name: String => "name",
        pub device_type: String => "device_type",
        pub status: String => "status",
        pub battery_level: Option<i64> => "battery_level",
        pub signal_strength: Option<i64> => "signal_strength",
        pub latitude: Option<f64> => "latitude",
        pub longitude: Option<f64> => "longitude",
        pub last_seen: Option<DateTime<FixedOffset>> => "last_seen",
        pub sensors_count: i64 => "sensors_count",
        pub actuators_count: i64 => "actuators_count",
        pub created_at: DateTime<FixedOffset> => "created_at",
        pub updated_at: DateTime<FixedOffset> => "updated_at",
    }
}

/// Battery percentage at or below which a device needs attention
pub const LOW_BATTERY_PCT: i64 = 20;

impl IoTDevice {
    /// Not heard from within `max_silence`; a device never seen is offline
    pub fn is_offline(&self, clock: &dyn Clock, max_silence: Duration) -> bool {
        match self.last_seen {
            Some(seen) => clock.now() - seen.with_timezone(&Utc) > max_silence,
            None => true,
        }
    }

    pub fn is_battery_low(&self) -> bool {
        self.battery_level.is_some_and(|pct| pct <= LOW_BATTERY_PCT)
    }
}

wire_model! {
    /// One value observed by a sensor
    #[derive(Debug, Clone, PartialEq)]
    pub struct SensorReading {
        pub id: i64 => "id",
        pub sensor: i64 => "sensor",
        pub value: f64 => "value",
        pub timestamp: DateTime<FixedOffset> => "timestamp",
    }
}

wire_model! {
    /// A measuring channel on a device, with its latest reading embedded
    #[derive(Debug, Clone, PartialEq)]
    pub struct Sensor {
        pub id: i64 => "id",
        pub device: i64 => "device",
        pub sensor_type: String => "sensor_type",
        pub unit: String => "unit",
        pub min_value: Option<f64> => "min_value",
        pub max_value: Option<f64> => "max_value",
        pub threshold_low: Option<f64> => "threshold_low",
        pub threshold_high: Option<f64> => "threshold_high",
        pub latest_reading: Option<SensorReading> => "latest_reading",
        pub created_at: DateTime<FixedOffset> => "created_at",
    }
}

impl Sensor {
    pub fn limits(&self) -> SensorLimits {
        SensorLimits {
            min_value: self.min_value,
            max_value: self.max_value,
            threshold_low: self.threshold_low,
            threshold_high: self.threshold_high,
        }
    }

    pub fn classify(&self, value: f64) -> ReadingLevel {
        classify_reading(value, &self.limits())
    }

    pub fn latest_level(&self) -> Option<ReadingLevel> {
        self.latest_reading
            .as_ref()
            .map(|reading| self.classify(reading.value))
    }
}

wire_model! {
    /// A controllable output on a device (pump, valve, fan)
    #[derive(Debug, Clone, PartialEq)]
    pub struct Actuator {
        pub id: i64 => "id",
        pub device: i64 => "device",
        pub actuator_type: String => "actuator_type",
        pub status: String => "status",
        pub last_activated: Option<DateTime<FixedOffset>> => "last_activated",
        pub created_at: DateTime<FixedOffset> => "created_at",
    }
}

impl Actuator {
    pub fn is_active(&self) -> bool {
        matches!(self.status.as_str(), "on" | "active" | "running")
    }
}
