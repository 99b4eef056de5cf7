use std::fmt::Display;

use chrono::{Local, TimeZone};
use weather_core::{Units, ViewState, WeatherReport, format::format_timestamp};

/// Text for whatever the client is currently showing, in the local time zone.
pub fn view(state: &ViewState, units: Units) -> String {
    view_in(state, units, &Local)
}

pub fn view_in<Tz>(state: &ViewState, units: Units, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match state {
        ViewState::Idle => "Please search for a city".to_string(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Loaded(report) => report_in(report, units, tz),
        ViewState::Error(msg) => msg.clone(),
    }
}

/// Label of the unit toggle, as the opposite of the active units.
pub fn switch_hint(units: Units) -> &'static str {
    match units {
        Units::Metric => "switch to °F with :units",
        Units::Imperial => "switch to °C with :units",
    }
}

fn when<Tz>(ts: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_timestamp(ts, tz).unwrap_or_else(|| ts.to_string())
}

/// `"London, GB"`, dropping whichever part the provider left empty.
fn place(name: &str, country: &str) -> String {
    match (name.is_empty(), country.is_empty()) {
        (false, false) => format!("{name}, {country}"),
        (false, true) => name.to_string(),
        (true, false) => country.to_string(),
        (true, true) => "Unknown location".to_string(),
    }
}

fn report_in<Tz>(report: &WeatherReport, units: Units, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let current = &report.current;
    let temp_label = units.temperature_label();
    let description = current.primary().map(|c| c.description.as_str()).unwrap_or("Unknown");

    let mut lines = vec![
        when(current.dt, tz),
        place(&current.name, &current.sys.country),
        format!("  {}{temp_label}  {description}", current.main.temp),
    ];
    if let Some(condition) = current.primary() {
        lines.push(format!("  icon: {}", condition.icon_url()));
    }
    lines.push(format!("  Wind: {} {}", current.wind.speed, units.wind_label()));
    lines.push(format!("  Humidity: {}%", current.main.humidity));

    let periods = report.forecast.as_ref().map(|f| f.next_periods()).unwrap_or_default();
    if !periods.is_empty() {
        lines.push(String::new());
        lines.push(format!("Next {} periods:", periods.len()));
        lines.extend(periods.iter().map(|entry| {
            let description = entry.primary().map(|c| c.description.as_str()).unwrap_or("Unknown");
            format!("  {}  {}{temp_label}  {description}", when(entry.dt, tz), entry.main.temp)
        }));
    }

    lines.join("\n")
}
