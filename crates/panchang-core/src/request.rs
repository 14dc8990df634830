//! Validated panchang request and the shared upstream payload.
//!
//! A [`PanchangRequest`] serializes directly into the body every provider
//! endpoint accepts:
//!
//! ```json
//! {
//!   "year": 2024, "month": 4, "date": 15,
//!   "hours": 6, "minutes": 0, "seconds": 0,
//!   "latitude": 28.6, "longitude": 77.2, "timezone": 5.5,
//!   "config": { "observation_point": "topocentric", "ayanamsha": "lahiri" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Month};

use crate::ValidationError;

pub const DEFAULT_HOURS: u8 = 6;
pub const DEFAULT_TIMEZONE: f64 = 5.5;

/// Observation settings forwarded verbatim to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationConfig {
    pub observation_point: String,
    pub ayanamsha: String,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            observation_point: String::from("topocentric"),
            ayanamsha: String::from("lahiri"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangRequest {
    pub year: i32,
    pub month: u8,
    pub date: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: f64,
    pub config: ObservationConfig,
    #[serde(skip)]
    civil_date: Date,
}

impl PanchangRequest {
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        let civil_date = civil_date(year, month, day)?;
        validate_finite("latitude", latitude)?;
        validate_finite("longitude", longitude)?;

        Ok(Self {
            year,
            month,
            date: day,
            hours: DEFAULT_HOURS,
            minutes: 0,
            seconds: 0,
            latitude,
            longitude,
            timezone: DEFAULT_TIMEZONE,
            config: ObservationConfig::default(),
            civil_date,
        })
    }

    /// Builds a request from an ISO `YYYY-MM-DD` date string.
    pub fn from_iso_date(
        value: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        let format = format_description!("[year]-[month]-[day]");
        let parsed = Date::parse(value.trim(), &format).map_err(|_| {
            ValidationError::InvalidDateFormat {
                value: value.to_owned(),
            }
        })?;

        Self::new(
            parsed.year(),
            u8::from(parsed.month()),
            parsed.day(),
            latitude,
            longitude,
        )
    }

    pub fn with_time(
        mut self,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Result<Self, ValidationError> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(ValidationError::InvalidTime {
                hours,
                minutes,
                seconds,
            });
        }
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        Ok(self)
    }

    pub fn with_timezone(mut self, timezone: f64) -> Result<Self, ValidationError> {
        validate_finite("timezone", timezone)?;
        self.timezone = timezone;
        Ok(self)
    }

    pub fn with_config(mut self, config: ObservationConfig) -> Self {
        self.config = config;
        self
    }

    pub const fn civil_date(&self) -> Date {
        self.civil_date
    }
}

fn civil_date(year: i32, month: u8, day: u8) -> Result<Date, ValidationError> {
    let invalid = || ValidationError::InvalidDate { year, month, day };
    let month_value = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month_value, day).map_err(|_| invalid())
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}
