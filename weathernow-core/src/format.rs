//! Pure display formatters.
//!
//! Every function here is total: absent or odd inputs produce the [`PLACEHOLDER`]
//! instead of an error, so callers can render any snapshot the upstream sends.

use chrono::DateTime;
use std::fmt;

use crate::model::TemperatureUnit;

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.34;
const KMH_PER_MPS: f64 = 3.6;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    /// Clockwise from north in 45° steps.
    const CLOCKWISE: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nearest compass point for a wind bearing. Absent bearings count as 0°.
pub fn wind_direction(degrees: Option<f64>) -> CompassPoint {
    let degrees = degrees.unwrap_or(0.0);
    // Half-up rounding; non-finite input saturates or becomes 0.
    let step = (degrees / 45.0 + 0.5).floor() as i64;
    CompassPoint::CLOCKWISE[step.rem_euclid(8) as usize]
}

/// One decimal place, or the placeholder.
pub fn format_magnitude(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Visibility in kilometers (metric) or miles (imperial).
pub fn visibility_display(meters: Option<f64>, unit: TemperatureUnit) -> String {
    format_magnitude(meters.map(|m| match unit {
        TemperatureUnit::Metric => m / METERS_PER_KILOMETER,
        TemperatureUnit::Imperial => m / METERS_PER_MILE,
    }))
}

/// Wind speed in km/h (metric, delivered as m/s) or mph (imperial, delivered as mph).
pub fn wind_speed_display(speed: Option<f64>, unit: TemperatureUnit) -> String {
    format_magnitude(speed.map(|s| match unit {
        TemperatureUnit::Metric => s * KMH_PER_MPS,
        TemperatureUnit::Imperial => s,
    }))
}

/// Wall-clock time at the location, e.g. `02:13 PM`.
///
/// The offset alone performs the localization; the result is rendered as UTC.
pub fn local_time_label(unix_seconds: Option<i64>, timezone_offset: Option<i64>) -> String {
    shifted(unix_seconds, timezone_offset)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Abbreviated weekday at the location, or an empty string when unknown.
pub fn local_weekday_label(unix_seconds: Option<i64>, timezone_offset: Option<i64>) -> String {
    shifted(unix_seconds, timezone_offset)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_default()
}

/// `Mon · 02:13 PM`, or the placeholder.
pub fn local_clock_label(unix_seconds: Option<i64>, timezone_offset: Option<i64>) -> String {
    match shifted(unix_seconds, timezone_offset) {
        Some(dt) => dt.format("%a · %I:%M %p").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn shifted(unix_seconds: Option<i64>, timezone_offset: Option<i64>) -> Option<DateTime<chrono::Utc>> {
    let ts = unix_seconds.filter(|ts| *ts != 0)?;
    let offset = timezone_offset?;
    DateTime::from_timestamp(ts.checked_add(offset)?, 0)
}

pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@4x.png")
}

/// Night variants of the condition icons carry an `n`.
pub fn is_night_icon(icon_code: &str) -> bool {
    icon_code.contains('n')
}

pub fn temperature_suffix(unit: TemperatureUnit) -> &'static str {
    match unit {
        TemperatureUnit::Metric => "°C",
        TemperatureUnit::Imperial => "°F",
    }
}

pub fn speed_suffix(unit: TemperatureUnit) -> &'static str {
    match unit {
        TemperatureUnit::Metric => "km/h",
        TemperatureUnit::Imperial => "mph",
    }
}

pub fn visibility_suffix(unit: TemperatureUnit) -> &'static str {
    match unit {
        TemperatureUnit::Metric => "km",
        TemperatureUnit::Imperial => "mi",
    }
}
