//! Display-ready projections of a [`WeatherSnapshot`].
//!
//! Computed fresh each time something is rendered; nothing here is stored back
//! into the snapshot.

use crate::format::{
    PLACEHOLDER, icon_url, is_night_icon, local_clock_label, local_time_label, speed_suffix,
    temperature_suffix, visibility_display, visibility_suffix, wind_direction, wind_speed_display,
};
use crate::model::{TemperatureUnit, WeatherSnapshot};

/// The headline panel: temperature, condition and place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentConditions {
    pub temperature: String,
    pub temperature_suffix: &'static str,
    pub description: String,
    pub location: String,
    pub local_time: String,
    pub high_low: String,
    pub sunrise: String,
    pub sunset: String,
    pub icon_url: Option<String>,
    pub is_night: bool,
}

impl CurrentConditions {
    pub fn from_snapshot(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        let condition = snapshot.condition();
        let icon = condition.map(|c| c.icon.as_str());
        let offset = Some(snapshot.timezone);

        Self {
            temperature: round(snapshot.main.temp),
            temperature_suffix: temperature_suffix(unit),
            description: condition
                .map(|c| capitalize(&c.description))
                .unwrap_or_else(|| "Weather".to_string()),
            location: location_label(&snapshot.name, &snapshot.sys.country),
            local_time: local_clock_label(Some(snapshot.dt), offset),
            high_low: format!(
                "{}° / {}°",
                round(snapshot.main.temp_max),
                round(snapshot.main.temp_min)
            ),
            sunrise: local_time_label(snapshot.sys.sunrise, offset),
            sunset: local_time_label(snapshot.sys.sunset, offset),
            icon_url: icon.filter(|i| !i.is_empty()).map(icon_url),
            is_night: icon.is_some_and(is_night_icon),
        }
    }
}

/// One highlight card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub value: String,
    pub unit: Option<&'static str>,
    pub subtitle: String,
}

impl Highlight {
    fn new(title: &'static str, value: String, unit: Option<&'static str>, subtitle: &str) -> Self {
        Self { title, value, unit, subtitle: subtitle.to_string() }
    }
}

/// The highlight grid, in display order.
pub fn highlights(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Vec<Highlight> {
    let main = &snapshot.main;
    let direction = wind_direction(snapshot.wind.deg);

    vec![
        Highlight::new(
            "Wind",
            wind_speed_display(Some(snapshot.wind.speed), unit),
            Some(speed_suffix(unit)),
            &format!("Direction: {direction}"),
        ),
        Highlight::new("Humidity", main.humidity.to_string(), Some("%"), "Relative humidity"),
        Highlight::new(
            "Feels Like",
            round(main.feels_like),
            Some(temperature_suffix(unit)),
            "Perceived temperature",
        ),
        Highlight::new(
            "Visibility",
            visibility_display(snapshot.visibility, unit),
            Some(visibility_suffix(unit)),
            "Clear distance",
        ),
        Highlight::new("Pressure", whole(Some(main.pressure)), Some("hPa"), "Barometric pressure"),
        Highlight::new("Cloud Cover", snapshot.clouds.all.to_string(), Some("%"), "Sky coverage"),
        Highlight::new("Sea Level", whole(main.sea_level), Some("hPa"), "Sea level pressure"),
        Highlight::new("Ground Level", whole(main.grnd_level), Some("hPa"), "Ground level pressure"),
        Highlight::new(
            "Sunrise",
            local_time_label(snapshot.sys.sunrise, Some(snapshot.timezone)),
            None,
            "Sunrise time",
        ),
    ]
}

fn round(value: f64) -> String {
    // -0 would print as "-0".
    let rounded = (value + 0.5).floor();
    format!("{}", if rounded == 0.0 { 0.0 } else { rounded })
}

fn location_label(name: &str, country: &str) -> String {
    match (name.is_empty(), country.is_empty()) {
        (false, false) => format!("{name}, {country}"),
        (false, true) => name.to_string(),
        (true, false) => country.to_string(),
        (true, true) => PLACEHOLDER.to_string(),
    }
}

fn whole(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clouds, Condition, Coordinates, MainReadings, Sys, Wind};

    fn london() -> WeatherSnapshot {
        WeatherSnapshot {
            coord: Coordinates::new(51.5074, -0.1278),
            weather: vec![Condition {
                id: 500,
                main: "Rain".into(),
                description: "light rain".into(),
                icon: "10n".into(),
            }],
            base: "stations".into(),
            main: MainReadings {
                temp: 7.6,
                feels_like: 4.4,
                temp_min: 6.2,
                temp_max: 8.9,
                pressure: 1009.0,
                humidity: 87,
                sea_level: Some(1009.0),
                grnd_level: None,
            },
            visibility: Some(10000.0),
            wind: Wind { speed: 5.0, deg: Some(230.0), gust: None },
            clouds: Clouds { all: 75 },
            dt: 1_640_000_000,
            sys: Sys {
                kind: Some(2),
                id: Some(2_019_646),
                country: "GB".into(),
                sunrise: Some(1_639_987_485),
                sunset: Some(1_640_015_642),
            },
            timezone: 0,
            id: 2_643_743,
            name: "London".into(),
            cod: 200,
        }
    }

    #[test]
    fn current_conditions_projection() {
        let current = CurrentConditions::from_snapshot(&london(), TemperatureUnit::Metric);

        assert_eq!(current.temperature, "8");
        assert_eq!(current.temperature_suffix, "°C");
        assert_eq!(current.description, "Light Rain");
        assert_eq!(current.location, "London, GB");
        assert_eq!(current.local_time, "Mon · 11:33 AM");
        assert_eq!(current.high_low, "9° / 6°");
        assert_eq!(current.sunrise, "08:04 AM");
        assert_eq!(current.sunset, "03:54 PM");
        assert_eq!(current.icon_url.as_deref(), Some("https://openweathermap.org/img/wn/10n@4x.png"));
        assert!(current.is_night);
    }

    #[test]
    fn current_conditions_without_condition_entry() {
        let mut snapshot = london();
        snapshot.weather.clear();

        let current = CurrentConditions::from_snapshot(&snapshot, TemperatureUnit::Imperial);
        assert_eq!(current.description, "Weather");
        assert_eq!(current.icon_url, None);
        assert!(!current.is_night);
        assert_eq!(current.temperature_suffix, "°F");
    }

    #[test]
    fn current_conditions_at_sea() {
        let mut snapshot = london();
        snapshot.name = "Gulf of Guinea".into();
        snapshot.sys.country = String::new();
        snapshot.sys.sunset = None;

        let current = CurrentConditions::from_snapshot(&snapshot, TemperatureUnit::Metric);
        assert_eq!(current.location, "Gulf of Guinea");
        assert_eq!(current.sunrise, "08:04 AM");
        assert_eq!(current.sunset, PLACEHOLDER);

        snapshot.name = String::new();
        let current = CurrentConditions::from_snapshot(&snapshot, TemperatureUnit::Metric);
        assert_eq!(current.location, PLACEHOLDER);
    }

    #[test]
    fn highlight_grid_order_and_values() {
        let cards = highlights(&london(), TemperatureUnit::Metric);
        let titles: Vec<_> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            [
                "Wind", "Humidity", "Feels Like", "Visibility", "Pressure", "Cloud Cover",
                "Sea Level", "Ground Level", "Sunrise"
            ]
        );

        assert_eq!(cards[0].value, "18.0");
        assert_eq!(cards[0].unit, Some("km/h"));
        assert_eq!(cards[0].subtitle, "Direction: SW");
        assert_eq!(cards[1].value, "87");
        assert_eq!(cards[2].value, "4");
        assert_eq!(cards[3].value, "10.0");
        assert_eq!(cards[4].value, "1009");
        assert_eq!(cards[6].value, "1009");
        assert_eq!(cards[7].value, PLACEHOLDER);
        assert_eq!(cards[8].value, "08:04 AM");
        assert_eq!(cards[8].unit, None);
    }

    #[test]
    fn highlight_grid_imperial_units() {
        let cards = highlights(&london(), TemperatureUnit::Imperial);
        assert_eq!(cards[0].unit, Some("mph"));
        assert_eq!(cards[0].value, "5.0");
        assert_eq!(cards[3].value, "6.2");
        assert_eq!(cards[3].unit, Some("mi"));
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round(2.5), "3");
        assert_eq!(round(-2.5), "-2");
        assert_eq!(round(-0.4), "0");
    }
}
