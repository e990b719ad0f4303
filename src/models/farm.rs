use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::wire::wire_model;

wire_model! {
    /// A farm. `owner` is the owning user's id; `owner_name` and
    /// `fields_count` are display copies and may be stale.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Farm {
        pub id: i64 => "id",
        pub owner: i64 => "owner",
        pub owner_name: String => "owner_name",
        pub name: String => "name",
        pub location: String => "location",
        pub latitude: Option<f64> => "latitude",
        pub longitude: Option<f64> => "longitude",
        pub total_area: f64 => "total_area",
        pub description: Option<String> => "description",
        pub image: Option<String> => "image",
        pub fields_count: i64 => "fields_count",
        pub created_at: DateTime<FixedOffset> => "created_at",
        pub updated_at: DateTime<FixedOffset> => "updated_at",
    }
}

impl Farm {
    /// (latitude, longitude) when both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

wire_model! {
    /// A field inside a farm, optionally planted with a crop.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Field {
        pub id: i64 => "id",
        pub farm: i64 => "farm",
        pub farm_name: String => "farm_name",
        pub name: String => "name",
        pub area: f64 => "area",
        pub soil_type: String => "soil_type",
        pub crop: Option<i64> => "crop",
        pub crop_name: Option<String> => "crop_name",
        pub planting_date: Option<NaiveDate> => "planting_date",
        pub expected_harvest_date: Option<NaiveDate> => "expected_harvest_date",
        pub status: String => "status",
        pub devices_count: i64 => "devices_count",
        pub created_at: DateTime<FixedOffset> => "created_at",
        pub updated_at: DateTime<FixedOffset> => "updated_at",
    }
}

impl Field {
    pub fn is_planted(&self) -> bool {
        self.crop.is_some()
    }

    /// Days from `today` to the expected harvest; negative once it has passed
    pub fn days_until_harvest(&self, today: NaiveDate) -> Option<i64> {
        self.expected_harvest_date
            .map(|harvest| (harvest - today).num_days())
    }

    /// Days since planting, if planted on or before `today`
    pub fn days_since_planting(&self, today: NaiveDate) -> Option<i64> {
        let planted = self.planting_date?;
        let days = (today - planted).num_days();
        (days >= 0).then_some(days)
    }
}

wire_model! {
    /// Crop catalogue entry
    #[derive(Debug, Clone, PartialEq)]
    pub struct Crop {
        pub id: i64 => "id",
        pub name: String => "name",
        pub variety: Option<String> => "variety",
        pub growth_duration: Option<i64> => "growth_duration",
        pub water_requirement: Option<f64> => "water_requirement",
        pub description: Option<String> => "description",
    }
}

impl Crop {
    /// Harvest date implied by the crop's growth duration (days)
    pub fn expected_harvest(&self, planting_date: NaiveDate) -> Option<NaiveDate> {
        let days = self.growth_duration?;
        chrono::Duration::try_days(days).and_then(|d| planting_date.checked_add_signed(d))
    }
}
