use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::time::Clock;
use crate::wire::wire_model;

/// Status the backend assigns to a schedule that has not run yet
pub const STATUS_SCHEDULED: &str = "scheduled";

wire_model! {
    /// Planned watering of a field. `duration` is in minutes and
    /// `water_amount` in litres.
    #[derive(Debug, Clone, PartialEq)]
    pub struct IrrigationSchedule {
        pub id: i64 => "id",
        pub field: i64 => "field",
        pub scheduled_time: DateTime<FixedOffset> => "scheduled_time",
        pub duration: i64 => "duration",
        pub water_amount: Option<f64> => "water_amount",
        pub status: String => "status",
        pub completed_at: Option<DateTime<FixedOffset>> => "completed_at",
        pub created_at: DateTime<FixedOffset> => "created_at",
    }
}

impl IrrigationSchedule {
    /// Planned end of the watering run; `None` if the duration overflows
    pub fn ends_at(&self) -> Option<DateTime<FixedOffset>> {
        Duration::try_minutes(self.duration)
            .and_then(|d| self.scheduled_time.checked_add_signed(d))
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Still scheduled and its start time has been reached
    pub fn is_due(&self, clock: &dyn Clock) -> bool {
        self.status == STATUS_SCHEDULED
            && !self.is_completed()
            && self.scheduled_time.with_timezone(&Utc) <= clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use crate::wire::WireModel;
    use serde_json::json;

    fn schedule() -> IrrigationSchedule {
        IrrigationSchedule::from_value(&json!({
            "id": 5,
            "field": 7,
            "scheduled_time": "2024-06-01T05:00:00+03:00",
            "duration": 45,
            "water_amount": 1200.0,
            "status": "scheduled",
            "completed_at": null,
            "created_at": "2024-05-30T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_ends_at() {
        let schedule = schedule();
        assert_eq!(
            crate::time::format_timestamp(&schedule.ends_at().unwrap()),
            "2024-06-01T05:45:00+03:00"
        );
    }

    #[test]
    fn test_is_due() {
        let schedule = schedule();

        let clock = FixedClock::from_rfc3339("2024-06-01T01:59:00Z").unwrap();
        assert!(!schedule.is_due(&clock));

        let clock = FixedClock::from_rfc3339("2024-06-01T02:00:00Z").unwrap();
        assert!(schedule.is_due(&clock));

        let mut done = schedule.clone();
        done.completed_at = done.ends_at();
        assert!(done.is_completed());
        assert!(!done.is_due(&clock));
    }

    #[test]
    fn test_duration_must_be_integer() {
        let mut value = schedule().to_value();
        value["duration"] = json!(45.5);
        let err = IrrigationSchedule::from_value(&value).unwrap_err();
        assert_eq!(err.decode_error().unwrap().field, "duration");
    }
}
