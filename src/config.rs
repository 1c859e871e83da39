use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::colors::ColorConfig;
use crate::error::ConfigError;
use crate::format::{Clock, ClockFormatter};
use crate::strip::StripRequest;

const DEFAULT_NUM_HOURS: &str = "12";
const DEFAULT_OFFSET: &str = "0";

/// Card configuration as written by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub entity: Option<String>,
    /// Hours to display (string-encoded integer)
    #[serde(default, deserialize_with = "string_or_number")]
    pub num_hours: Option<String>,
    /// Forecast entries to skip (string-encoded integer)
    #[serde(default, deserialize_with = "string_or_number")]
    pub offset: Option<String>,
    #[serde(default)]
    pub colors: Option<ColorConfig>,
    #[serde(default)]
    pub clock: Clock,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_decimal_separator() -> char {
    '.'
}

/// YAML users write `num_hours: 12` as often as `num_hours: "12"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    }))
}

/// Where the forecast comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastEntity {
    File(PathBuf),
    Noaa(String),
}

impl CardConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn entity(&self) -> Result<ForecastEntity, ConfigError> {
        let entity = self
            .entity
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEntity)?;

        if let Some(path) = entity.strip_prefix("file:") {
            Ok(ForecastEntity::File(PathBuf::from(path)))
        } else if let Some(station) = entity.strip_prefix("noaa:") {
            Ok(ForecastEntity::Noaa(station.trim().to_uppercase()))
        } else {
            Err(ConfigError::UnknownEntity(entity.to_string()))
        }
    }

    pub fn request(&self) -> Result<StripRequest, ConfigError> {
        let num_hours = parse_count(
            "num_hours",
            self.num_hours.as_deref().unwrap_or(DEFAULT_NUM_HOURS),
        )?;
        if num_hours == 0 {
            return Err(ConfigError::ZeroHours);
        }
        let offset = parse_count("offset", self.offset.as_deref().unwrap_or(DEFAULT_OFFSET))?;
        Ok(StripRequest { num_hours, offset })
    }

    pub fn formatter(&self) -> ClockFormatter {
        ClockFormatter::new(self.clock, self.decimal_separator)
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
