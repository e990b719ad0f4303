//! Property Test: Wire Round Trip
//!
//! This property test verifies that, for every model:
//! - decode(encode(x)) == x
//! - encoding a decoded wire map reproduces the map, where the only allowed
//!   difference is an absent optional key coming back as explicit null

use proptest::prelude::*;
use sahool_models::test_utils::{generators, helpers};
use sahool_models::{
    Actuator, Crop, Farm, Field, IoTDevice, IrrigationSchedule, LoginRequest, LoginResponse,
    Page, RegisterRequest, Sensor, SensorReading, User, WireModel,
};

fn assert_round_trip<T>(record: &T) -> Result<(), TestCaseError>
where
    T: WireModel + PartialEq + std::fmt::Debug,
{
    let encoded = record.encode();
    let decoded = T::decode(&encoded);
    prop_assert!(decoded.is_ok(), "decode failed: {:?}", decoded.err());
    let decoded = decoded.unwrap();
    prop_assert_eq!(&decoded, record);

    // Offsets survive as well as instants
    prop_assert_eq!(decoded.encode(), encoded);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_user_round_trip(user in generators::user()) {
        assert_round_trip(&user)?;
    }

    #[test]
    fn prop_login_request_round_trip(request in generators::login_request()) {
        assert_round_trip(&request)?;
    }

    #[test]
    fn prop_login_response_round_trip(response in generators::login_response()) {
        assert_round_trip(&response)?;
    }

    #[test]
    fn prop_register_request_round_trip(request in generators::register_request()) {
        assert_round_trip(&request)?;
    }

    #[test]
    fn prop_farm_round_trip(farm in generators::farm()) {
        assert_round_trip(&farm)?;
    }

    #[test]
    fn prop_field_round_trip(field in generators::field()) {
        assert_round_trip(&field)?;
    }

    #[test]
    fn prop_crop_round_trip(crop in generators::crop()) {
        assert_round_trip(&crop)?;
    }

    #[test]
    fn prop_irrigation_schedule_round_trip(schedule in generators::irrigation_schedule()) {
        assert_round_trip(&schedule)?;
    }

    #[test]
    fn prop_iot_device_round_trip(device in generators::iot_device()) {
        assert_round_trip(&device)?;
    }

    #[test]
    fn prop_sensor_round_trip(sensor in generators::sensor()) {
        assert_round_trip(&sensor)?;
    }

    #[test]
    fn prop_sensor_reading_round_trip(reading in generators::sensor_reading()) {
        assert_round_trip(&reading)?;
    }

    #[test]
    fn prop_actuator_round_trip(actuator in generators::actuator()) {
        assert_round_trip(&actuator)?;
    }

    #[test]
    fn prop_page_round_trip(crops in prop::collection::vec(generators::crop(), 0..5)) {
        let page = Page {
            count: crops.len() as i64,
            next: None,
            previous: None,
            results: crops,
        };
        assert_round_trip(&page)?;
    }

    /// Property: dropping a null optional key from the wire map changes nothing
    #[test]
    fn prop_absent_equals_null(farm in generators::farm()) {
        let encoded = farm.encode();
        let stripped: sahool_models::JsonMap = encoded
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let decoded = Farm::decode(&stripped).unwrap();
        prop_assert_eq!(&decoded, &farm);
        prop_assert!(helpers::equivalent_modulo_null(&decoded.encode(), &stripped));
    }

    /// Property: every required field is enforced by name
    #[test]
    fn prop_missing_required_field_is_named(device in generators::iot_device()) {
        let encoded = device.encode();
        for mapping in IoTDevice::FIELDS.iter().filter(|f| f.required) {
            let err = IoTDevice::decode(&helpers::without(&encoded, mapping.wire)).unwrap_err();
            prop_assert_eq!(err.entity, "IoTDevice");
            prop_assert_eq!(err.field.as_str(), mapping.wire);
            prop_assert!(err.is_missing_or_invalid());
        }
    }

    /// Property: serde impls agree with encode/decode
    #[test]
    fn prop_serde_matches_wire(reading in generators::sensor_reading()) {
        let via_serde = serde_json::to_value(&reading).unwrap();
        prop_assert_eq!(&via_serde, &reading.to_value());

        let back: SensorReading = serde_json::from_value(via_serde).unwrap();
        prop_assert_eq!(back, reading);
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_round_trip() {
        let json = r#"{
            "id": 3,
            "name": "Wheat",
            "variety": null,
            "growth_duration": 150,
            "water_requirement": 450.5,
            "description": "Winter wheat"
        }"#;
        let crop = Crop::from_json_str(json).unwrap();
        assert_eq!(Crop::from_json_str(&crop.to_json_string()).unwrap(), crop);
    }

    #[test]
    fn test_encode_of_decoded_wire_is_field_equivalent() {
        let wire = helpers::object(json!({
            "id": 7,
            "farm": 1,
            "farm_name": "Green Valley",
            "name": "North",
            "area": 12.5,
            "soil_type": "loam",
            "planting_date": "2024-11-01",
            "status": "active",
            "devices_count": 2,
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T13:30:00+03:00"
        }));
        let field = Field::decode(&wire).unwrap();
        assert!(helpers::equivalent_modulo_null(&field.encode(), &wire));
    }

    #[test]
    fn test_mapping_tables_cover_every_model() {
        assert_eq!(User::FIELDS.len(), 12);
        assert_eq!(LoginRequest::FIELDS.len(), 2);
        assert_eq!(LoginResponse::FIELDS.len(), 2);
        assert_eq!(RegisterRequest::FIELDS.len(), 8);
        assert_eq!(Farm::FIELDS.len(), 13);
        assert_eq!(Field::FIELDS.len(), 14);
        assert_eq!(Crop::FIELDS.len(), 6);
        assert_eq!(IrrigationSchedule::FIELDS.len(), 8);
        assert_eq!(IoTDevice::FIELDS.len(), 16);
        assert_eq!(Sensor::FIELDS.len(), 10);
        assert_eq!(SensorReading::FIELDS.len(), 4);
        assert_eq!(Actuator::FIELDS.len(), 6);
    }
}
