use weathernow_core::{
    Phase, TemperatureUnit, ViewState, WeatherSnapshot,
    display::{CurrentConditions, highlights},
};

/// Current-conditions panel followed by the highlight grid.
pub fn snapshot(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let current = CurrentConditions::from_snapshot(snapshot, unit);

    let mut lines = vec![
        current.location.clone(),
        format!(
            "  {}{}  {}{}",
            current.temperature,
            current.temperature_suffix,
            current.description,
            if current.is_night { " (night)" } else { "" },
        ),
        format!("  Local time   {}", current.local_time),
        format!("  High / Low   {}", current.high_low),
        format!("  Sunrise      {}", current.sunrise),
        format!("  Sunset       {}", current.sunset),
    ];
    if let Some(icon) = &current.icon_url {
        lines.push(format!("  Icon         {icon}"));
    }

    lines.push(String::new());
    lines.push("Highlights".to_string());
    lines.extend(highlights(snapshot, unit).into_iter().map(|card| {
        let value = match card.unit {
            Some(suffix) => format!("{} {suffix}", card.value),
            None => card.value,
        };
        format!("  {:<13}{:<12}{}", card.title, value, card.subtitle)
    }));

    terminated(lines)
}

/// Whole screen for the interactive session.
pub fn view(view: &ViewState) -> String {
    let header = match view.phase() {
        Phase::Loading => Some("Loading...".to_string()),
        Phase::Error(message) => Some(format!("! {message}")),
        Phase::Idle => {
            Some("No weather loaded yet. Search for a city or use your location.".to_string())
        }
        Phase::Loaded => None,
    };

    let mut out = header.map(|line| line + "\n").unwrap_or_default();
    if let Some(current) = &view.snapshot {
        out.push('\n');
        out.push_str(&snapshot(current, view.unit));
    }

    out
}

/// Joins lines, each ending in a newline.
fn terminated(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
