use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Available,
    Unavailable,
}

/// One departure window of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_order"))]
pub struct Schedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ScheduleStatus,
}

impl Schedule {
    pub fn is_available(&self) -> bool {
        self.status == ScheduleStatus::Available
    }
}

fn validate_date_order(schedule: &Schedule) -> Result<(), ValidationError> {
    if schedule.start_date > schedule.end_date {
        let mut error = ValidationError::new("date_order");
        error.message = Some(Cow::Borrowed("startDate must not be after endDate"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let schedule: Schedule = serde_json::from_value(serde_json::json!({
            "startDate": "2023-08-01",
            "endDate": "2023-08-03",
            "status": "available"
        }))
        .unwrap();

        assert_eq!(schedule.start_date, date("2023-08-01"));
        assert!(schedule.is_available());
    }

    #[test]
    fn test_single_day_window_is_valid() {
        let schedule = Schedule {
            start_date: date("2023-08-01"),
            end_date: date("2023-08-01"),
            status: ScheduleStatus::Unavailable,
        };
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_reversed_window_is_invalid() {
        let schedule = Schedule {
            start_date: date("2023-08-05"),
            end_date: date("2023-08-01"),
            status: ScheduleStatus::Available,
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<Schedule, _> = serde_json::from_value(serde_json::json!({
            "startDate": "2023-08-01",
            "endDate": "2023-08-03",
            "status": "sold_out"
        }));
        assert!(result.is_err());
    }
}
