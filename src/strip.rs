//! The forecast-to-strip pipeline.
//!
//! One call to [`build`] is one refresh pass: every output is computed from
//! scratch out of the raw forecast and the resolved request.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::colors::{validate_colors, ColorConfig, ColorSettings};
use crate::error::RequestError;
use crate::format::LabelFormatter;
use crate::registry::DisplayType;
use crate::weather::{ConditionSpan, ForecastSegment, HourTemperature};

pub const DISPLAY_TYPE: DisplayType = DisplayType {
    kind: "hourly-weather",
    name: "Hourly Weather",
    description: "Hourly weather conditions as a strip of colored spans with temperatures",
};

/// Resolved display window, in hours and native forecast entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StripRequest {
    pub num_hours: usize,
    pub offset: usize,
}

impl Default for StripRequest {
    fn default() -> Self {
        Self {
            num_hours: 12,
            offset: 0,
        }
    }
}

/// Non-fatal findings shown next to a best-effort strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Advisory {
    DailyForecast,
    HoursNotMultiple {
        num_hours: usize,
        hours_per_segment: usize,
    },
    NonUniformSpacing {
        hours_per_segment: usize,
    },
    InvalidColors(Vec<String>),
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DailyForecast => write!(
                f,
                "The forecast seems to be daily. Consider switching to an hourly forecast."
            ),
            Advisory::HoursNotMultiple {
                num_hours,
                hours_per_segment,
            } => write!(
                f,
                "num_hours ({num_hours}) is not a multiple of the forecast segment length ({hours_per_segment} hours)"
            ),
            Advisory::NonUniformSpacing { hours_per_segment } => write!(
                f,
                "Forecast entries are not evenly spaced; assuming {hours_per_segment}-hour segments"
            ),
            Advisory::InvalidColors(entries) => {
                write!(f, "Invalid colors: {}", entries.join(", "))
            }
        }
    }
}

impl From<Advisory> for String {
    fn from(advisory: Advisory) -> Self {
        advisory.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripData {
    pub hours_per_segment: usize,
    pub spans: Vec<ConditionSpan>,
    pub temperatures: Vec<HourTemperature>,
    pub is_daily: bool,
    pub colors: ColorSettings,
    pub advisories: Vec<Advisory>,
}

pub mod resolution {
    use super::*;

    /// Hours covered by each forecast entry, taken from the first gap.
    pub fn hours_per_segment(forecast: &[ForecastSegment]) -> usize {
        if forecast.len() < 2 {
            return 1;
        }
        let delta = forecast[1].datetime - forecast[0].datetime;
        let hours = (delta.num_seconds() as f64 / 3600.0).round();
        if hours < 1.0 {
            1
        } else {
            hours as usize
        }
    }

    /// True when every gap rounds to `hours_per_segment` hours.
    pub fn is_uniform(forecast: &[ForecastSegment], hours_per_segment: usize) -> bool {
        forecast.windows(2).all(|pair| {
            let delta = pair[1].datetime - pair[0].datetime;
            (delta.num_seconds() as f64 / 3600.0).round() == hours_per_segment as f64
        })
    }
}

pub mod conditions {
    use super::*;

    /// Run-length encodes the conditions of the display window.
    ///
    /// Counts are in forecast entries; callers scale them by
    /// `hours_per_segment` to get hour widths.
    pub fn condition_spans(
        forecast: &[ForecastSegment],
        num_hours: usize,
        hours_per_segment: usize,
        offset: usize,
    ) -> Vec<ConditionSpan> {
        let window_end = num_hours.saturating_add(offset.saturating_mul(hours_per_segment));
        forecast
            .iter()
            .enumerate()
            .skip(offset)
            .take_while(|(i, _)| i.saturating_mul(hours_per_segment) < window_end)
            .fold(Vec::new(), |mut spans: Vec<ConditionSpan>, (_, segment)| {
                match spans.last_mut() {
                    Some(last) if last.condition == segment.condition => last.run_length += 1,
                    _ => spans.push(ConditionSpan::new(segment.condition.clone(), 1)),
                }
                spans
            })
    }
}

pub mod temperatures {
    use super::*;

    /// One label pair per whole segment in the window.
    pub fn hour_temperatures(
        forecast: &[ForecastSegment],
        num_hours: usize,
        hours_per_segment: usize,
        offset: usize,
        formatter: &impl LabelFormatter,
    ) -> Vec<HourTemperature> {
        forecast
            .iter()
            .skip(offset)
            .take(num_hours / hours_per_segment)
            .map(|segment| HourTemperature {
                hour_label: formatter.hour_label(&segment.datetime),
                temperature_label: formatter.temperature_label(segment.temperature),
            })
            .collect()
    }
}

pub mod daily {
    use std::collections::HashSet;

    use super::*;

    /// Heuristic: almost every entry lands on its own calendar day.
    pub fn is_daily(forecast: &[ForecastSegment]) -> bool {
        let days: HashSet<_> = forecast.iter().map(|s| s.datetime.date_naive()).collect();
        days.len() >= forecast.len().saturating_sub(1)
    }
}

/// Hours of forecast available after skipping `offset` entries.
pub fn available_hours(
    forecast: &[ForecastSegment],
    hours_per_segment: usize,
    offset: usize,
) -> usize {
    forecast
        .len()
        .saturating_sub(offset)
        .saturating_mul(hours_per_segment)
}

/// Runs one refresh pass.
///
/// An empty window or a request reaching past the end of the forecast fails
/// before any span or temperature is computed.
pub fn build(
    forecast: &[ForecastSegment],
    request: &StripRequest,
    colors: Option<&ColorConfig>,
    formatter: &impl LabelFormatter,
) -> Result<StripData, RequestError> {
    let StripRequest { num_hours, offset } = *request;
    if num_hours == 0 {
        return Err(RequestError::EmptyWindow);
    }
    let hours_per_segment = resolution::hours_per_segment(forecast);

    let available = available_hours(forecast, hours_per_segment, offset);
    if num_hours > available {
        return Err(RequestError::TooManyHours {
            requested: num_hours,
            available,
        });
    }

    let spans = conditions::condition_spans(forecast, num_hours, hours_per_segment, offset);
    let temperatures =
        temperatures::hour_temperatures(forecast, num_hours, hours_per_segment, offset, formatter);
    let is_daily = daily::is_daily(forecast);
    let colors = validate_colors(colors);

    let mut advisories = Vec::new();
    if is_daily {
        advisories.push(Advisory::DailyForecast);
    }
    if num_hours % hours_per_segment != 0 {
        advisories.push(Advisory::HoursNotMultiple {
            num_hours,
            hours_per_segment,
        });
    }
    if !resolution::is_uniform(forecast, hours_per_segment) {
        advisories.push(Advisory::NonUniformSpacing { hours_per_segment });
    }
    if !colors.warnings.is_empty() {
        advisories.push(Advisory::InvalidColors(colors.warnings.clone()));
    }

    debug!(
        "Built strip: entries={} hours_per_segment={} spans={} temperatures={} advisories={}",
        forecast.len(),
        hours_per_segment,
        spans.len(),
        temperatures.len(),
        advisories.len()
    );

    Ok(StripData {
        hours_per_segment,
        spans,
        temperatures,
        is_daily,
        colors,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset};

    use super::*;
    use crate::format::ClockFormatter;

    fn start() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-01T00:00:00+00:00").unwrap()
    }

    fn forecast(step_hours: i64, conditions: &[(&str, usize)]) -> Vec<ForecastSegment> {
        conditions
            .iter()
            .flat_map(|(condition, count)| std::iter::repeat(*condition).take(*count))
            .enumerate()
            .map(|(i, condition)| ForecastSegment {
                datetime: start() + Duration::hours(step_hours * i as i64),
                condition: condition.to_string(),
                temperature: 10.0 + i as f64,
            })
            .collect()
    }

    fn expand(spans: &[ConditionSpan]) -> Vec<String> {
        spans
            .iter()
            .flat_map(|s| std::iter::repeat(s.condition.clone()).take(s.run_length))
            .collect()
    }

    #[test]
    fn test_resolution_detection() {
        for step in [1, 2, 3, 6, 24] {
            let fc = forecast(step, &[("sunny", 8)]);
            assert_eq!(resolution::hours_per_segment(&fc), step as usize);
            assert!(resolution::is_uniform(&fc, step as usize));
        }
        assert_eq!(resolution::hours_per_segment(&[]), 1);
        assert_eq!(resolution::hours_per_segment(&forecast(3, &[("sunny", 1)])), 1);
    }

    #[test]
    fn test_resolution_rounds_and_clamps() {
        let mut fc = forecast(1, &[("sunny", 3)]);
        fc[1].datetime = fc[0].datetime + Duration::minutes(100);
        assert_eq!(resolution::hours_per_segment(&fc), 2);

        fc[1].datetime = fc[0].datetime + Duration::minutes(15);
        assert_eq!(resolution::hours_per_segment(&fc), 1);
        assert!(!resolution::is_uniform(&fc, 1));
    }

    #[test]
    fn test_spans_end_to_end_example() {
        let fc = forecast(1, &[("sunny", 6), ("cloudy", 3), ("rainy", 15)]);
        let spans = conditions::condition_spans(&fc, 12, 1, 0);
        assert_eq!(
            spans,
            vec![
                ConditionSpan::new("sunny", 6),
                ConditionSpan::new("cloudy", 3),
                ConditionSpan::new("rainy", 3),
            ]
        );
    }

    #[test]
    fn test_spans_reproduce_window() {
        let fc = forecast(
            1,
            &[("sunny", 2), ("cloudy", 1), ("sunny", 1), ("fog", 4), ("rainy", 2)],
        );
        for offset in 0..4 {
            for num_hours in 1..=(fc.len() - offset) {
                let spans = conditions::condition_spans(&fc, num_hours, 1, offset);
                let window: Vec<String> = fc[offset..offset + num_hours]
                    .iter()
                    .map(|s| s.condition.clone())
                    .collect();
                assert_eq!(expand(&spans), window);
                assert!(spans.windows(2).all(|w| w[0].condition != w[1].condition));
                assert!(spans.iter().all(|s| s.run_length >= 1));
            }
        }
    }

    #[test]
    fn test_spans_with_coarse_resolution() {
        let fc = forecast(3, &[("sunny", 2), ("rainy", 4)]);
        let spans = conditions::condition_spans(&fc, 12, 3, 1);
        assert_eq!(
            spans,
            vec![ConditionSpan::new("sunny", 1), ConditionSpan::new("rainy", 3)]
        );
        let total: usize = spans.iter().map(|s| s.run_length).sum();
        assert_eq!(total, 12 / 3);
    }

    #[test]
    fn test_temperature_count() {
        let fc = forecast(3, &[("sunny", 8)]);
        let formatter = ClockFormatter::default();
        for num_hours in 1..=24 {
            let temps = temperatures::hour_temperatures(&fc, num_hours, 3, 0, &formatter);
            assert_eq!(temps.len(), num_hours / 3);
        }
        let temps = temperatures::hour_temperatures(&fc, 6, 3, 2, &formatter);
        assert_eq!(
            temps,
            vec![
                HourTemperature {
                    hour_label: "06:00".to_string(),
                    temperature_label: "12".to_string(),
                },
                HourTemperature {
                    hour_label: "09:00".to_string(),
                    temperature_label: "13".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_daily_classification() {
        assert!(daily::is_daily(&forecast(24, &[("sunny", 7)])));
        assert!(!daily::is_daily(&forecast(1, &[("sunny", 48)])));
        assert!(!daily::is_daily(&forecast(3, &[("sunny", 16)])));

        // one same-day pair among otherwise distinct days
        let mut fc = forecast(24, &[("sunny", 7)]);
        fc[1].datetime = fc[0].datetime + Duration::hours(12);
        assert!(daily::is_daily(&fc));

        // two pairs is too many
        fc[3].datetime = fc[2].datetime + Duration::hours(1);
        assert!(!daily::is_daily(&fc));
    }

    #[test]
    fn test_build_rejects_too_many_hours() {
        let fc = forecast(1, &[("sunny", 10)]);
        let request = StripRequest {
            num_hours: 9,
            offset: 2,
        };
        let err = build(&fc, &request, None, &ClockFormatter::default()).unwrap_err();
        assert_eq!(
            err,
            RequestError::TooManyHours {
                requested: 9,
                available: 8
            }
        );

        let request = StripRequest {
            num_hours: 1,
            offset: 0,
        };
        assert!(build(&[], &request, None, &ClockFormatter::default()).is_err());

        let request = StripRequest {
            num_hours: 1,
            offset: 20,
        };
        assert!(build(&fc, &request, None, &ClockFormatter::default()).is_err());
    }

    #[test]
    fn test_build_collects_advisories() {
        let fc = forecast(3, &[("sunny", 4), ("snowy", 4)]);
        let request = StripRequest {
            num_hours: 10,
            offset: 0,
        };
        let colors: ColorConfig = [("sunny".to_string(), "nope".to_string())]
            .into_iter()
            .collect();
        let strip = build(&fc, &request, Some(&colors), &ClockFormatter::default()).unwrap();

        assert_eq!(strip.hours_per_segment, 3);
        assert_eq!(strip.temperatures.len(), 3);
        assert!(!strip.is_daily);
        assert_eq!(
            strip.advisories,
            vec![
                Advisory::HoursNotMultiple {
                    num_hours: 10,
                    hours_per_segment: 3
                },
                Advisory::InvalidColors(vec!["sunny: nope".to_string()]),
            ]
        );
    }

    #[test]
    fn test_build_rejects_empty_window() {
        let fc = forecast(1, &[("sunny", 5)]);
        let request = StripRequest {
            num_hours: 0,
            offset: 0,
        };
        assert_eq!(
            build(&fc, &request, None, &ClockFormatter::default()),
            Err(RequestError::EmptyWindow)
        );
    }

    #[test]
    fn test_spans_with_huge_offset() {
        let fc = forecast(3, &[("sunny", 4)]);
        assert!(conditions::condition_spans(&fc, 12, 3, usize::MAX).is_empty());
        assert!(conditions::condition_spans(&fc, 12, usize::MAX, 2).is_empty());
        assert_eq!(available_hours(&fc, usize::MAX, 0), usize::MAX);
    }

    #[test]
    fn test_build_flags_irregular_spacing() {
        let mut fc = forecast(3, &[("sunny", 4), ("rainy", 4)]);
        // one 4-hour gap among 3-hour steps
        for segment in fc.iter_mut().skip(5) {
            segment.datetime = segment.datetime + Duration::hours(1);
        }
        let request = StripRequest {
            num_hours: 10,
            offset: 0,
        };
        let strip = build(&fc, &request, None, &ClockFormatter::default()).unwrap();

        assert_eq!(strip.hours_per_segment, 3);
        assert_eq!(
            strip.advisories,
            vec![
                Advisory::HoursNotMultiple {
                    num_hours: 10,
                    hours_per_segment: 3
                },
                Advisory::NonUniformSpacing {
                    hours_per_segment: 3
                },
            ]
        );
        assert_eq!(
            strip.advisories[1].to_string(),
            "Forecast entries are not evenly spaced; assuming 3-hour segments"
        );
    }

    #[test]
    fn test_build_clean_hourly_forecast() {
        let fc = forecast(1, &[("sunny", 24)]);
        let strip = build(&fc, &StripRequest::default(), None, &ClockFormatter::default()).unwrap();
        assert_eq!(strip.spans, vec![ConditionSpan::new("sunny", 12)]);
        assert!(strip.advisories.is_empty());
        assert!(strip.colors.valid_colors.is_none());
    }

    #[test]
    fn test_advisory_serializes_as_message() {
        let json = serde_json::to_string(&Advisory::InvalidColors(vec![
            "sunny: nope".to_string(),
            "bogus: red".to_string(),
        ]))
        .unwrap();
        assert_eq!(json, r#""Invalid colors: sunny: nope, bogus: red""#);
    }
}
