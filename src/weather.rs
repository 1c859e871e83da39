use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Conditions the strip knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "clear-night")]
    ClearNight,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "exceptional")]
    Exceptional,
    #[serde(rename = "fog")]
    Fog,
    #[serde(rename = "hail")]
    Hail,
    #[serde(rename = "lightning")]
    Lightning,
    #[serde(rename = "lightning-rainy")]
    LightningRainy,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    #[serde(rename = "pouring")]
    Pouring,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snowy")]
    Snowy,
    #[serde(rename = "snowy-rainy")]
    SnowyRainy,
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "windy")]
    Windy,
    #[serde(rename = "windy-variant")]
    WindyVariant,
}

impl Condition {
    pub const ALL: [Condition; 15] = [
        Condition::ClearNight,
        Condition::Cloudy,
        Condition::Exceptional,
        Condition::Fog,
        Condition::Hail,
        Condition::Lightning,
        Condition::LightningRainy,
        Condition::PartlyCloudy,
        Condition::Pouring,
        Condition::Rainy,
        Condition::Snowy,
        Condition::SnowyRainy,
        Condition::Sunny,
        Condition::Windy,
        Condition::WindyVariant,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Condition::ClearNight => "clear-night",
            Condition::Cloudy => "cloudy",
            Condition::Exceptional => "exceptional",
            Condition::Fog => "fog",
            Condition::Hail => "hail",
            Condition::Lightning => "lightning",
            Condition::LightningRainy => "lightning-rainy",
            Condition::PartlyCloudy => "partlycloudy",
            Condition::Pouring => "pouring",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
            Condition::SnowyRainy => "snowy-rainy",
            Condition::Sunny => "sunny",
            Condition::Windy => "windy",
            Condition::WindyVariant => "windy-variant",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .find(|c| c.id() == s)
            .copied()
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

/// One raw forecast entry at the feed's native resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSegment {
    pub datetime: DateTime<FixedOffset>,
    pub condition: String,
    pub temperature: f64,
}

/// A maximal run of one condition, counted in forecast entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSpan {
    pub condition: String,
    pub run_length: usize,
}

impl ConditionSpan {
    pub fn new(condition: impl Into<String>, run_length: usize) -> Self {
        Self {
            condition: condition.into(),
            run_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourTemperature {
    pub hour_label: String,
    pub temperature_label: String,
}

#[test]
fn test_condition_ids_round_trip() {
    for condition in Condition::ALL {
        assert_eq!(condition.id().parse::<Condition>(), Ok(condition));
    }
    assert!("bogus-condition".parse::<Condition>().is_err());
    assert!("Sunny".parse::<Condition>().is_err());
}

#[test]
fn test_forecast_segment_from_json() {
    let json = r#"{"datetime": "2024-06-01T15:00:00+02:00", "condition": "sunny", "temperature": 21.5}"#;
    let segment: ForecastSegment = serde_json::from_str(json).unwrap();
    assert_eq!(segment.condition, "sunny");
    assert_eq!(segment.temperature, 21.5);
    assert_eq!(segment.datetime.to_rfc3339(), "2024-06-01T15:00:00+02:00");
}
