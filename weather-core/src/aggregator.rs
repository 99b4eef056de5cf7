//! Sequential city lookup: name → coordinates → current conditions → forecast.
//!
//! The aggregator owns the client's [`ViewState`] and publishes every change on
//! a `watch` channel. Each search takes a new attempt token; writes from a
//! search that has been superseded by a newer one are dropped.

use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicU64, Ordering},
};

use tokio::sync::watch;

use crate::{
    error::{FETCH_FAILED_MESSAGE, WeatherError},
    model::{
        Coordinates, CurrentConditions, FORECAST_COUNT, Forecast, Units, ViewState, WeatherReport,
    },
    provider::WeatherSource,
};

/// What happened to a call to [`Aggregator::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query; nothing was requested and the state is unchanged.
    Ignored,
    /// The search finished and its result is now the current state.
    Applied(ViewState),
    /// A newer search started while this one was in flight; its result was dropped.
    Superseded,
}

#[derive(Debug)]
pub struct Aggregator {
    source: Arc<dyn WeatherSource>,
    units: AtomicU8,
    attempt: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl Aggregator {
    pub fn new(source: Arc<dyn WeatherSource>, units: Units) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);

        Self {
            source,
            units: AtomicU8::new(units_to_u8(units)),
            attempt: AtomicU64::new(0),
            state,
        }
    }

    /// Units the next search will request.
    pub fn units(&self) -> Units {
        units_from_u8(self.units.load(Ordering::SeqCst))
    }

    /// Change the unit preference. Does not re-run any search.
    pub fn set_units(&self, units: Units) {
        self.units.store(units_to_u8(units), Ordering::SeqCst);
    }

    /// Flip between metric and imperial, returning the new preference.
    pub fn toggle_units(&self) -> Units {
        let next = self.units().toggle();
        self.set_units(next);
        next
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Run one full lookup for `city`.
    ///
    /// Blank input is a no-op. Otherwise the state goes to `Loading` before the
    /// first request and always leaves it once the chain resolves, including
    /// when this future is dropped before completing.
    pub async fn search(&self, city: &str) -> SearchOutcome {
        let city = city.trim();
        if city.is_empty() {
            return SearchOutcome::Ignored;
        }

        let units = self.units();
        let attempt = self.begin_attempt();
        let mut guard = AttemptGuard { aggregator: self, attempt, armed: true };
        tracing::info!(city, %units, attempt, "searching");

        let next = match self.fetch_report(city, units).await {
            Ok(report) => ViewState::Loaded(Box::new(report)),
            Err(err) => {
                tracing::warn!(city, attempt, error = %err, "weather lookup failed");
                ViewState::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };

        guard.armed = false;
        if self.publish(attempt, next.clone()) {
            SearchOutcome::Applied(next)
        } else {
            tracing::debug!(city, attempt, "discarding result of superseded search");
            SearchOutcome::Superseded
        }
    }

    async fn fetch_report(&self, city: &str, units: Units) -> Result<WeatherReport, WeatherError> {
        let located = self.source.current_by_name(city).await?;
        let coords = Coordinates::from_body(&located)?;
        tracing::debug!(city, %coords, "resolved coordinates");

        let current_raw = self.source.current_by_coords(coords, units).await?;
        let current = CurrentConditions::from_body(&current_raw)?;

        let forecast_raw = self.source.forecast_by_coords(coords, units, FORECAST_COUNT).await?;
        let forecast = Forecast::from_body(&forecast_raw)?;

        Ok(WeatherReport {
            current,
            forecast: Some(forecast),
            current_raw,
            forecast_raw: Some(forecast_raw),
        })
    }

    /// Take a fresh token and enter `Loading` under the channel lock, so no
    /// older attempt can write between the two.
    fn begin_attempt(&self) -> u64 {
        let mut attempt = 0;
        self.state.send_modify(|state| {
            attempt = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ViewState::Loading;
        });
        attempt
    }

    fn publish(&self, attempt: u64, next: ViewState) -> bool {
        self.state.send_if_modified(|state| {
            if self.attempt.load(Ordering::SeqCst) != attempt {
                return false;
            }
            *state = next;
            true
        })
    }
}

/// Leaves `Loading` if a search future is dropped mid-chain (timeout, abort).
struct AttemptGuard<'a> {
    aggregator: &'a Aggregator,
    attempt: u64,
    armed: bool,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let attempt = self.attempt;
        let cleared = self.aggregator.state.send_if_modified(|state| {
            if self.aggregator.attempt.load(Ordering::SeqCst) != attempt || !state.is_loading() {
                return false;
            }
            *state = ViewState::Error(FETCH_FAILED_MESSAGE.to_string());
            true
        });

        if cleared {
            tracing::warn!(attempt, "search cancelled before completing");
        }
    }
}

fn units_to_u8(units: Units) -> u8 {
    match units {
        Units::Metric => 0,
        Units::Imperial => 1,
    }
}

fn units_from_u8(raw: u8) -> Units {
    if raw == 1 { Units::Imperial } else { Units::Metric }
}
