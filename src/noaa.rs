use chrono::DateTime;
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::error::SourceError;
use crate::weather::{Condition, ForecastSegment};

const BASE_URL: &str = "https://api.weather.gov/";

pub mod station {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Station {
        geometry: Geometry,
    }

    impl Station {
        pub fn from_station(station_id: &str) -> Result<Self, reqwest::Error> {
            let url = format!("{BASE_URL}stations/{station_id}");
            get_web_json(&url)?.error_for_status()?.json()
        }

        pub fn coordinates(&self) -> (f32, f32) {
            let lat = self.geometry.coordinates.1;
            let lon = self.geometry.coordinates.0;
            (lat, lon)
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct Geometry {
        coordinates: (f32, f32),
    }
}

pub mod gridpoints {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        #[serde(rename = "forecastHourly")]
        forecast_hourly: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct Gridpoints {
        properties: Properties,
    }

    impl Gridpoints {
        pub fn from_coord(lat: f32, lon: f32) -> Result<Self, reqwest::Error> {
            let url = format!("{BASE_URL}points/{lat},{lon}");
            get_web_json(&url)?.error_for_status()?.json()
        }

        pub fn forecast_hourly_url(&self) -> &str {
            &self.properties.forecast_hourly
        }
    }
}

pub mod forecast {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Forecast {
        pub properties: Properties,
    }

    impl Forecast {
        pub fn from_noaa(url: &str) -> Result<Self, reqwest::Error> {
            get_web_json(url)?.error_for_status()?.json()
        }

        pub fn segments(&self) -> Result<Vec<ForecastSegment>, SourceError> {
            self.properties.periods.iter().map(Period::segment).collect()
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        pub periods: Vec<Period>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Period {
        #[serde(rename = "startTime")]
        pub start_time: String,

        #[serde(rename = "isDaytime", default = "daytime")]
        pub is_daytime: bool,

        pub temperature: Option<f64>,

        #[serde(rename = "shortForecast")]
        pub short_forecast: Option<String>,
    }

    fn daytime() -> bool {
        true
    }

    impl Period {
        pub fn segment(&self) -> Result<ForecastSegment, SourceError> {
            let datetime = DateTime::parse_from_rfc3339(&self.start_time).map_err(|source| {
                SourceError::Timestamp {
                    value: self.start_time.clone(),
                    source,
                }
            })?;
            let text = self.short_forecast.as_deref().unwrap_or_default();
            Ok(ForecastSegment {
                datetime,
                condition: condition_from_text(text, self.is_daytime).to_string(),
                temperature: self.temperature.unwrap_or(f64::NAN),
            })
        }
    }
}

/// Maps NOAA's free-text `shortForecast` onto a display condition.
pub fn condition_from_text(text: &str, is_daytime: bool) -> Condition {
    let text = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["thunder", "t-storm", "tstorm"]) {
        if has(&["rain", "shower"]) {
            Condition::LightningRainy
        } else {
            Condition::Lightning
        }
    } else if has(&["hail"]) {
        Condition::Hail
    } else if has(&["snow", "flurr", "sleet", "ice", "freezing"]) {
        if has(&["rain", "drizzle", "sleet", "freezing"]) {
            Condition::SnowyRainy
        } else {
            Condition::Snowy
        }
    } else if has(&["heavy rain", "downpour"]) {
        Condition::Pouring
    } else if has(&["rain", "shower", "drizzle"]) {
        Condition::Rainy
    } else if has(&["fog", "haze", "smoke", "mist"]) {
        Condition::Fog
    } else if has(&["wind", "breezy", "blustery"]) {
        if has(&["cloud"]) {
            Condition::WindyVariant
        } else {
            Condition::Windy
        }
    } else if has(&["partly", "mostly sunny", "mostly clear"]) {
        Condition::PartlyCloudy
    } else if has(&["cloud", "overcast"]) {
        Condition::Cloudy
    } else if has(&["sunny", "clear", "fair"]) {
        if is_daytime {
            Condition::Sunny
        } else {
            Condition::ClearNight
        }
    } else {
        Condition::Exceptional
    }
}

/// Hourly forecast for the grid cell containing `station_id`.
pub fn hourly_forecast(station_id: &str) -> Result<Vec<ForecastSegment>, SourceError> {
    let station = station::Station::from_station(station_id)?;
    let (lat, lon) = station.coordinates();
    debug!("Resolved station coordinates: station={station_id} lat={lat} lon={lon}");

    let gridpoints = gridpoints::Gridpoints::from_coord(lat, lon)?;
    let url = gridpoints.forecast_hourly_url();
    info!("Fetching NOAA hourly forecast: station={station_id} url={url}");

    let segments = forecast::Forecast::from_noaa(url)?.segments()?;
    debug!("NOAA hourly forecast loaded: periods={}", segments.len());
    Ok(segments)
}

fn get_web_json(url: &str) -> Result<Response, reqwest::Error> {
    let client = Client::builder().user_agent("wx-strip").build()?;
    client.get(url).send()
}
