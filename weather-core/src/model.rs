use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// Number of forecast periods requested from the provider.
pub const FORECAST_COUNT: u8 = 4;

/// Unit-of-measure preference sent to the provider as the `units` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// Geographic position resolved from a by-name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Extract `coord.lat` / `coord.lon` from a current-weather body.
    pub fn from_body(body: &Value) -> Result<Self, WeatherError> {
        let coord = body
            .get("coord")
            .ok_or_else(|| WeatherError::malformed("response has no `coord` object"))?;

        let lat = coord
            .get("lat")
            .and_then(Value::as_f64)
            .ok_or_else(|| WeatherError::malformed("`coord.lat` is missing or not a number"))?;
        let lon = coord
            .get("lon")
            .and_then(Value::as_f64)
            .ok_or_else(|| WeatherError::malformed("`coord.lon` is missing or not a number"))?;

        Ok(Self { lat, lon })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// One condition descriptor, e.g. `{"description": "light rain", "icon": "10d"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Image URL for a provider icon identifier.
pub fn icon_url(icon: &str) -> String {
    format!("http://openweathermap.org/img/wn/{icon}@4x.png")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SysInfo {
    /// Empty for coordinates outside any country, e.g. open sea.
    #[serde(default)]
    pub country: String,
}

/// Typed view of a current-weather body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: SysInfo,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    /// Observation time, epoch seconds.
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
}

impl CurrentConditions {
    pub fn from_body(body: &Value) -> Result<Self, WeatherError> {
        Self::deserialize(body)
            .map_err(|e| WeatherError::malformed(format!("current conditions: {e}")))
    }

    /// Primary condition descriptor; the provider lists the most relevant first.
    pub fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReadings {
    pub temp: f64,
}

/// One period of a forecast list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastReadings,
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// Typed view of a forecast body. Periods keep the provider's order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn from_body(body: &Value) -> Result<Self, WeatherError> {
        Self::deserialize(body).map_err(|e| WeatherError::malformed(format!("forecast: {e}")))
    }

    /// The "next 3 periods": positions 1..4, skipping the period covering now.
    pub fn next_periods(&self) -> &[ForecastEntry] {
        let end = self.list.len().min(1 + 3);
        self.list.get(1..end).unwrap_or(&[])
    }
}

/// Result of one successful aggregation. Raw bodies are kept as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Option<Forecast>,
    pub current_raw: Value,
    pub forecast_raw: Option<Value>,
}

/// What the client currently shows. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(Box<WeatherReport>),
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            ViewState::Loaded(report) => Some(&**report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(dt: i64) -> Value {
        json!({
            "dt": dt,
            "main": { "temp": 10.0 + dt as f64, "humidity": 50 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        })
    }

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = "kelvin".parse::<Units>().unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn units_toggle_and_labels() {
        assert_eq!(Units::Metric.toggle(), Units::Imperial);
        assert_eq!(Units::Imperial.toggle(), Units::Metric);
        assert_eq!(Units::Metric.temperature_label(), "°C");
        assert_eq!(Units::Imperial.temperature_label(), "°F");
        assert_eq!(Units::default(), Units::Metric);
    }

    #[test]
    fn coordinates_from_body() {
        let body = json!({ "coord": { "lat": 51.5, "lon": -0.1 }, "name": "London" });
        let coords = Coordinates::from_body(&body).unwrap();
        assert_eq!(coords, Coordinates { lat: 51.5, lon: -0.1 });
    }

    #[test]
    fn coordinates_missing_coord_is_malformed() {
        let err = Coordinates::from_body(&json!({ "name": "London" })).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));

        let err = Coordinates::from_body(&json!({ "coord": { "lat": "north" } })).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[test]
    fn current_conditions_parse_provider_shape() {
        let body = json!({
            "coord": { "lat": 51.5, "lon": -0.1 },
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
            "main": { "temp": 12.3, "feels_like": 11.0, "humidity": 81 },
            "wind": { "speed": 4.1, "deg": 240 },
            "dt": 1_730_815_389,
            "sys": { "country": "GB" },
            "name": "London"
        });

        let current = CurrentConditions::from_body(&body).unwrap();
        assert_eq!(current.name, "London");
        assert_eq!(current.sys.country, "GB");
        assert_eq!(current.main.humidity, 81);
        assert_eq!(current.primary().map(|c| c.icon.as_str()), Some("10d"));
        assert_eq!(
            current.primary().unwrap().icon_url(),
            "http://openweathermap.org/img/wn/10d@4x.png"
        );
    }

    #[test]
    fn current_conditions_tolerate_open_sea_body() {
        let body = json!({
            "coord": { "lat": 0.0, "lon": -30.0 },
            "weather": [{ "description": "clear sky", "icon": "01d" }],
            "main": { "temp": 26.1, "humidity": 74 },
            "wind": { "speed": 6.2 },
            "dt": 1_730_815_389,
            "sys": {},
            "name": ""
        });

        let current = CurrentConditions::from_body(&body).unwrap();
        assert_eq!(current.name, "");
        assert_eq!(current.sys.country, "");

        let mut trimmed = body;
        if let Some(fields) = trimmed.as_object_mut() {
            fields.remove("name");
            fields.remove("sys");
        }
        let current = CurrentConditions::from_body(&trimmed).unwrap();
        assert_eq!(current.sys, SysInfo::default());
        assert_eq!(current.main.humidity, 74);
    }

    #[test]
    fn current_conditions_missing_fields_is_malformed() {
        let err = CurrentConditions::from_body(&json!({ "name": "London" })).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[test]
    fn next_periods_skips_first_and_keeps_order() {
        let body = json!({ "list": [entry(0), entry(1), entry(2), entry(3), entry(4)] });
        let forecast = Forecast::from_body(&body).unwrap();

        let dts: Vec<i64> = forecast.next_periods().iter().map(|e| e.dt).collect();
        assert_eq!(dts, vec![1, 2, 3]);
    }

    #[test]
    fn next_periods_handles_short_lists() {
        let forecast = Forecast::from_body(&json!({ "list": [entry(0), entry(1)] })).unwrap();
        assert_eq!(forecast.next_periods().len(), 1);

        let forecast = Forecast::from_body(&json!({ "list": [entry(0)] })).unwrap();
        assert!(forecast.next_periods().is_empty());

        assert!(Forecast::default().next_periods().is_empty());
    }

    #[test]
    fn view_state_accessors() {
        assert!(ViewState::Loading.is_loading());
        assert!(!ViewState::Idle.is_loading());
        assert_eq!(ViewState::Error("boom".into()).error(), Some("boom"));
        assert!(ViewState::Idle.report().is_none());
    }
}
