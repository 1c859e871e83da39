use std::fs;
use std::path::Path;

use log::debug;

use crate::config::ForecastEntity;
use crate::error::SourceError;
use crate::noaa;
use crate::weather::ForecastSegment;

pub fn load_forecast(entity: &ForecastEntity) -> Result<Vec<ForecastSegment>, SourceError> {
    match entity {
        ForecastEntity::File(path) => from_file(path),
        ForecastEntity::Noaa(station) => noaa::hourly_forecast(station),
    }
}

/// Reads a JSON array of forecast segments.
pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<ForecastSegment>, SourceError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let forecast: Vec<ForecastSegment> = serde_json::from_str(&contents)?;
    debug!(
        "Loaded forecast file: path={} entries={}",
        path.as_ref().display(),
        forecast.len()
    );
    Ok(forecast)
}
