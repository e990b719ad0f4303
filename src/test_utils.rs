//! Test utilities for property-based testing
//!
//! Generators for wire primitives (ids, offset-carrying timestamps, dates)
//! and for every model, plus small helpers for building wire maps in tests.

pub mod generators {
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
    use proptest::prelude::*;

    use crate::models::{
        Actuator, Crop, Farm, Field, IoTDevice, IrrigationSchedule, LoginRequest, LoginResponse,
        RegisterRequest, Sensor, SensorReading, User,
    };

    /// Generate a positive row id
    pub fn id() -> impl Strategy<Value = i64> {
        1i64..1_000_000
    }

    /// Generate a denormalized count
    pub fn count() -> impl Strategy<Value = i64> {
        0i64..500
    }

    /// Generate a short printable name
    pub fn name() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z][A-Za-z0-9 _-]{0,24}").expect("Valid regex for name")
    }

    /// Generate an optional short name
    pub fn opt_name() -> impl Strategy<Value = Option<String>> {
        prop::option::of(name())
    }

    /// Generate a finite measurement value
    pub fn measurement() -> impl Strategy<Value = f64> {
        -1000.0f64..1000.0
    }

    /// Generate a timestamp between 2020 and 2030 with microsecond precision
    /// and a quarter-hour offset between -12:00 and +14:00
    pub fn timestamp() -> impl Strategy<Value = DateTime<FixedOffset>> {
        // 2020-01-01 00:00:00 UTC .. 2030-12-31 23:59:59 UTC
        (1_577_836_800i64..1_924_991_999, 0u32..1_000_000, -48i32..=56).prop_map(
            |(secs, micros, quarter_hours)| {
                let offset = FixedOffset::east_opt(quarter_hours * 15 * 60)
                    .expect("Offset within +/-24h");
                offset
                    .timestamp_opt(secs, micros * 1000)
                    .single()
                    .expect("Valid timestamp")
            },
        )
    }

    pub fn opt_timestamp() -> impl Strategy<Value = Option<DateTime<FixedOffset>>> {
        prop::option::of(timestamp())
    }

    /// Generate a calendar date between 2000-01-01 and roughly 2054
    pub fn date() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|days| {
            NaiveDate::from_ymd_opt(2000, 1, 1).expect("Valid date")
                + chrono::Duration::days(days)
        })
    }

    pub fn user() -> impl Strategy<Value = User> {
        (
            (id(), name(), name(), opt_name(), opt_name(), name()),
            (opt_name(), opt_name(), any::<bool>(), name(), timestamp(), opt_timestamp()),
        )
            .prop_map(
                |(
                    (id, username, email, first_name, last_name, user_type),
                    (phone_number, profile_image, is_verified, subscription_plan, created_at, updated_at),
                )| User {
                    id,
                    username,
                    email,
                    first_name,
                    last_name,
                    user_type,
                    phone_number,
                    profile_image,
                    is_verified,
                    subscription_plan,
                    created_at,
                    updated_at,
                },
            )
    }

    pub fn login_request() -> impl Strategy<Value = LoginRequest> {
        (name(), name()).prop_map(|(username, password)| LoginRequest { username, password })
    }

    pub fn login_response() -> impl Strategy<Value = LoginResponse> {
        (name(), name()).prop_map(|(access, refresh)| LoginResponse { access, refresh })
    }

    pub fn register_request() -> impl Strategy<Value = RegisterRequest> {
        (
            (name(), name(), name(), name()),
            (opt_name(), opt_name(), name(), opt_name()),
        )
            .prop_map(
                |(
                    (username, email, password, password_confirm),
                    (first_name, last_name, user_type, phone_number),
                )| RegisterRequest {
                    username,
                    email,
                    password,
                    password_confirm,
                    first_name,
                    last_name,
                    user_type,
                    phone_number,
                },
            )
    }

    pub fn farm() -> impl Strategy<Value = Farm> {
        (
            (id(), id(), name(), name(), name()),
            (
                prop::option::of(-90.0f64..90.0),
                prop::option::of(-180.0f64..180.0),
                0.0f64..10_000.0,
                opt_name(),
                opt_name(),
            ),
            (count(), timestamp(), timestamp()),
        )
            .prop_map(
                |(
                    (id, owner, owner_name, name, location),
                    (latitude, longitude, total_area, description, image),
                    (fields_count, created_at, updated_at),
                )| Farm {
                    id,
                    owner,
                    owner_name,
                    name,
                    location,
                    latitude,
                    longitude,
                    total_area,
                    description,
                    image,
                    fields_count,
                    created_at,
                    updated_at,
                },
            )
    }

    pub fn field() -> impl Strategy<Value = Field> {
        (
            (id(), id(), name(), name(), 0.0f64..1_000.0, name()),
            (
                prop::option::of(id()),
                opt_name(),
                prop::option::of(date()),
                prop::option::of(date()),
            ),
            (name(), count(), timestamp(), timestamp()),
        )
            .prop_map(
                |(
                    (id, farm, farm_name, name, area, soil_type),
                    (crop, crop_name, planting_date, expected_harvest_date),
                    (status, devices_count, created_at, updated_at),
                )| Field {
                    id,
                    farm,
                    farm_name,
                    name,
                    area,
                    soil_type,
                    crop,
                    crop_name,
                    planting_date,
                    expected_harvest_date,
                    status,
                    devices_count,
                    created_at,
                    updated_at,
                },
            )
    }

    pub fn crop() -> impl Strategy<Value = Crop> {
        (
            id(),
            name(),
            opt_name(),
            prop::option::of(1i64..400),
            prop::option::of(0.0f64..5_000.0),
            opt_name(),
        )
            .prop_map(
                |(id, name, variety, growth_duration, water_requirement, description)| Crop {
                    id,
                    name,
                    variety,
                    growth_duration,
                    water_requirement,
                    description,
                },
            )
    }

    pub fn irrigation_schedule() -> impl Strategy<Value = IrrigationSchedule> {
        (
            id(),
            id(),
            timestamp(),
            1i64..600,
            prop::option::of(0.0f64..100_000.0),
            name(),
            opt_timestamp(),
            timestamp(),
        )
            .prop_map(
                |(id, field, scheduled_time, duration, water_amount, status, completed_at, created_at)| {
                    IrrigationSchedule {
                        id,
                        field,
                        scheduled_time,
                        duration,
                        water_amount,
                        status,
                        completed_at,
                        created_at,
                    }
                },
            )
    }

    pub fn iot_device() -> impl Strategy<Value = IoTDevice> {
        (
            (id(), id(), name(), name(), name(), name(), name()),
            (
                prop::option::of(0i64..=100),
                prop::option::of(-120i64..0),
                prop::option::of(-90.0f64..90.0),
                prop::option::of(-180.0f64..180.0),
                opt_timestamp(),
            ),
            (count(), count(), timestamp(), timestamp()),
        )
            .prop_map(
                |(
                    (id, field, field_name, device_id, name, device_type, status),
                    (battery_level, signal_strength, latitude, longitude, last_seen),
                    (sensors_count, actuators_count, created_at, updated_at),
                )| IoTDevice {
                    id,
                    field,
                    field_name,
                    device_id,
                    name,
                    device_type,
                    status,
                    battery_level,
                    signal_strength,
                    latitude,
                    longitude,
                    last_seen,
                    sensors_count,
                    actuators_count,
                    created_at,
                    updated_at,
                },
            )
    }

    pub fn sensor_reading() -> impl Strategy<Value = SensorReading> {
        (id(), id(), measurement(), timestamp()).prop_map(|(id, sensor, value, timestamp)| {
            SensorReading {
                id,
                sensor,
                value,
                timestamp,
            }
        })
    }

    pub fn sensor() -> impl Strategy<Value = Sensor> {
        (
            (id(), id(), name(), name()),
            (
                prop::option::of(measurement()),
                prop::option::of(measurement()),
                prop::option::of(measurement()),
                prop::option::of(measurement()),
            ),
            (prop::option::of(sensor_reading()), timestamp()),
        )
            .prop_map(
                |(
                    (id, device, sensor_type, unit),
                    (min_value, max_value, threshold_low, threshold_high),
                    (latest_reading, created_at),
                )| Sensor {
                    id,
                    device,
                    sensor_type,
                    unit,
                    min_value,
                    max_value,
                    threshold_low,
                    threshold_high,
                    latest_reading,
                    created_at,
                },
            )
    }

    pub fn actuator() -> impl Strategy<Value = Actuator> {
        (id(), id(), name(), name(), opt_timestamp(), timestamp()).prop_map(
            |(id, device, actuator_type, status, last_activated, created_at)| Actuator {
                id,
                device,
                actuator_type,
                status,
                last_activated,
                created_at,
            },
        )
    }

    /// Generate a non-empty, time-ordered series of chart samples
    pub fn reading_series(
        size: std::ops::Range<usize>,
    ) -> impl Strategy<Value = Vec<(f64, DateTime<FixedOffset>)>> {
        (timestamp(), prop::collection::vec(measurement(), size)).prop_map(|(start, values)| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (v, start + chrono::Duration::minutes(15 * i as i64)))
                .collect()
        })
    }
}

pub mod helpers {
    use serde_json::Value;

    use crate::wire::JsonMap;

    /// Unwrap a `json!` object literal into a wire map
    pub fn object(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected a JSON object, got {}", other),
        }
    }

    /// Copy of `map` without `key`
    pub fn without(map: &JsonMap, key: &str) -> JsonMap {
        let mut copy = map.clone();
        copy.remove(key);
        copy
    }

    /// Copy of `map` with `key` set to `value`
    pub fn with(map: &JsonMap, key: &str, value: Value) -> JsonMap {
        let mut copy = map.clone();
        copy.insert(key.to_string(), value);
        copy
    }

    /// True if every optional key that is null in `a` is null or absent in `b`,
    /// and every other key holds the same value in both
    pub fn equivalent_modulo_null(a: &JsonMap, b: &JsonMap) -> bool {
        a.keys().chain(b.keys()).all(|k| {
            let left = a.get(k).unwrap_or(&Value::Null);
            let right = b.get(k).unwrap_or(&Value::Null);
            left == right
        })
    }
}
