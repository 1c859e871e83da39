use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Turns raw timestamps and temperatures into display labels.
///
/// The pipeline only ever talks to this trait, so locale rules stay out of it.
pub trait LabelFormatter {
    fn hour_label(&self, datetime: &DateTime<FixedOffset>) -> String;
    fn temperature_label(&self, temperature: f64) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clock {
    #[serde(rename = "12")]
    H12,
    #[default]
    #[serde(rename = "24")]
    H24,
}

#[derive(Debug, Clone)]
pub struct ClockFormatter {
    pub clock: Clock,
    pub decimal_separator: char,
}

impl Default for ClockFormatter {
    fn default() -> Self {
        Self {
            clock: Clock::H24,
            decimal_separator: '.',
        }
    }
}

impl ClockFormatter {
    pub fn new(clock: Clock, decimal_separator: char) -> Self {
        Self {
            clock,
            decimal_separator,
        }
    }
}

impl LabelFormatter for ClockFormatter {
    fn hour_label(&self, datetime: &DateTime<FixedOffset>) -> String {
        hour::label(datetime, self.clock)
    }

    fn temperature_label(&self, temperature: f64) -> String {
        temperature::label(temperature, self.decimal_separator)
    }
}

pub mod hour {
    use super::*;

    pub fn label(datetime: &DateTime<FixedOffset>, clock: Clock) -> String {
        match clock {
            Clock::H24 => datetime.format("%H:%M").to_string(),
            // "3:00 PM" reads as "3 PM"
            Clock::H12 => datetime.format("%-I:%M %p").to_string().replace(":00", ""),
        }
    }

    #[test]
    fn test_hour_label() {
        let dt = DateTime::parse_from_rfc3339("2024-06-01T15:00:00+02:00").unwrap();
        assert_eq!(label(&dt, Clock::H24), "15:00");
        assert_eq!(label(&dt, Clock::H12), "3 PM");

        let midnight = DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z").unwrap();
        assert_eq!(label(&midnight, Clock::H24), "00:00");
        assert_eq!(label(&midnight, Clock::H12), "12 AM");

        let half = DateTime::parse_from_rfc3339("2024-06-01T09:30:00Z").unwrap();
        assert_eq!(label(&half, Clock::H12), "9:30 AM");
    }
}

pub mod temperature {
    const FRACTION_DIGITS: i32 = 3;

    pub fn label(temperature: f64, decimal_separator: char) -> String {
        let scale = 10f64.powi(FRACTION_DIGITS);
        let mut rounded = (temperature * scale).round() / scale;
        if rounded == 0.0 {
            // no "-0"
            rounded = 0.0;
        }
        let text = format!("{rounded}");
        if decimal_separator == '.' {
            text
        } else {
            text.replace('.', &decimal_separator.to_string())
        }
    }

    #[test]
    fn test_temperature_label() {
        assert_eq!(label(21.0, '.'), "21");
        assert_eq!(label(21.5, '.'), "21.5");
        assert_eq!(label(21.5, ','), "21,5");
        assert_eq!(label(-3.25, '.'), "-3.25");
        assert_eq!(label(12.34567, '.'), "12.346");
        assert_eq!(label(-0.0001, '.'), "0");
    }
}
