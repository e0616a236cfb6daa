//! The [`Calculator`] ties a fixed location and civil clock to the position model and the
//! horizon searches.

use crate::diagnostics::{Crossing, DiagnosticSink, NoDiagnostics};
use crate::position::{self, SolarGeometry};
use crate::sunrise::{self, HorizonCrossing, SearchConfig, SearchWindow};
use crate::time::CalendarTime;
use crate::{Location, Result, SolarAngles, UtcOffset};

/// Sun position calculator for one tracker installation.
///
/// Holds the location, the UTC offset of the civil clock that supplies [`CalendarTime`]s, the
/// sunrise/sunset search windows and a diagnostic sink. All of it is fixed after construction,
/// so a calculator can be shared freely and queried repeatedly.
///
/// # Example
/// ```
/// use sun_tracker::{CalendarTime, Calculator, Location};
///
/// let calculator = Calculator::new(Location::new(25.0, 121.5));
///
/// let now = CalendarTime::new(2024, 1, 1, 0, 0, 0).unwrap();
/// let sunrise = calculator.find_sunrise_time(&now).unwrap();
///
/// assert_eq!(sunrise.time().to_string(), "2024-01-02 06:55:18");
/// assert!(sunrise.position().elevation().abs() < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator<S = NoDiagnostics> {
    location: Location,
    utc_offset: UtcOffset,
    sunrise_search: SearchConfig,
    sunset_search: SearchConfig,
    diagnostics: S,
}

impl Calculator {
    /// Creates a calculator for UTC+8 civil time with the default search windows.
    #[must_use]
    pub const fn new(location: Location) -> Self {
        Self {
            location,
            utc_offset: UtcOffset::UTC_PLUS_8,
            sunrise_search: SearchConfig::SUNRISE,
            sunset_search: SearchConfig::SUNSET,
            diagnostics: NoDiagnostics,
        }
    }

    /// Creates a calculator from raw coordinates in degrees, without validating them.
    #[must_use]
    pub const fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::new(Location::new(latitude, longitude))
    }
}

impl<S: DiagnosticSink> Calculator<S> {
    /// Sets the UTC offset of the civil clock.
    #[must_use]
    pub const fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Sets the sunrise search window.
    #[must_use]
    pub const fn with_sunrise_search(mut self, config: SearchConfig) -> Self {
        self.sunrise_search = config;
        self
    }

    /// Sets the sunset search window.
    #[must_use]
    pub const fn with_sunset_search(mut self, config: SearchConfig) -> Self {
        self.sunset_search = config;
        self
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics<T: DiagnosticSink>(self, diagnostics: T) -> Calculator<T> {
        Calculator {
            location: self.location,
            utc_offset: self.utc_offset,
            sunrise_search: self.sunrise_search,
            sunset_search: self.sunset_search,
            diagnostics,
        }
    }

    /// Gets the location.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Gets the UTC offset of the civil clock.
    #[must_use]
    pub const fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    /// Gets the sunrise search window.
    #[must_use]
    pub const fn sunrise_search(&self) -> SearchConfig {
        self.sunrise_search
    }

    /// Gets the sunset search window.
    #[must_use]
    pub const fn sunset_search(&self) -> SearchConfig {
        self.sunset_search
    }

    /// Gets the diagnostic sink.
    #[must_use]
    pub const fn diagnostics(&self) -> &S {
        &self.diagnostics
    }

    /// Calculates the sun's azimuth and elevation at `time`.
    ///
    /// Always returns a value; see [`position::solar_position`].
    #[must_use]
    pub fn calculate_position(&self, time: &CalendarTime) -> SolarAngles {
        position::solar_position_with_diagnostics(
            self.location,
            self.utc_offset,
            time,
            &self.diagnostics,
        )
    }

    /// Calculates the intermediate solar geometry at `time`.
    #[must_use]
    pub fn solar_geometry(&self, time: &CalendarTime) -> SolarGeometry {
        position::solar_geometry(self.location.longitude(), self.utc_offset, time)
    }

    /// Builds tomorrow's sunrise search window without bisecting it.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if tomorrow is outside the supported calendar range.
    pub fn sunrise_window(&self, today: &CalendarTime) -> Result<SearchWindow> {
        self.sunrise_search.window_after(today)
    }

    /// Builds tomorrow's sunset search window without bisecting it.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if tomorrow is outside the supported calendar range.
    pub fn sunset_window(&self, today: &CalendarTime) -> Result<SearchWindow> {
        self.sunset_search.window_after(today)
    }

    /// Checks that the sun is below the horizon at the start of `window` and at or above it at
    /// the end.
    #[must_use]
    pub fn brackets_sunrise(&self, window: &SearchWindow) -> bool {
        sunrise::brackets_crossing(self.location, self.utc_offset, window, Crossing::Sunrise)
    }

    /// Checks that the sun is at or above the horizon at the start of `window` and below it at
    /// the end.
    #[must_use]
    pub fn brackets_sunset(&self, window: &SearchWindow) -> bool {
        sunrise::brackets_crossing(self.location, self.utc_offset, window, Crossing::Sunset)
    }

    /// Finds the sunrise on the civil day after `today` and the solar angles at that instant.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the search window cannot be built, or `NoHorizonCrossing`
    /// if the sun does not rise within the configured window.
    pub fn find_sunrise_time(&self, today: &CalendarTime) -> Result<HorizonCrossing> {
        let window = self.sunrise_window(today)?;
        sunrise::find_crossing(
            self.location,
            self.utc_offset,
            window,
            Crossing::Sunrise,
            self.sunrise_search.resolution_seconds(),
            &self.diagnostics,
        )
    }

    /// Finds the sunset on the civil day after `today` and the solar angles just after it.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the search window cannot be built, or `NoHorizonCrossing`
    /// if the sun does not set within the configured window.
    pub fn find_sunset_time(&self, today: &CalendarTime) -> Result<HorizonCrossing> {
        let window = self.sunset_window(today)?;
        sunrise::find_crossing(
            self.location,
            self.utc_offset,
            window,
            Crossing::Sunset,
            self.sunset_search.resolution_seconds(),
            &self.diagnostics,
        )
    }
}

#[cfg(feature = "chrono")]
impl<S: DiagnosticSink> Calculator<S> {
    /// Calculates the sun's position at a timezone-aware instant.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the instant is outside the supported calendar range.
    pub fn calculate_position_at<Tz: chrono::TimeZone>(
        &self,
        datetime: &chrono::DateTime<Tz>,
    ) -> Result<SolarAngles> {
        let time = CalendarTime::from_datetime(datetime, self.utc_offset)?;
        Ok(self.calculate_position(&time))
    }

    /// Finds the sunrise on the civil day (at this calculator's offset) after `datetime`.
    ///
    /// # Errors
    /// See [`find_sunrise_time`](Self::find_sunrise_time).
    pub fn find_sunrise_after<Tz: chrono::TimeZone>(
        &self,
        datetime: &chrono::DateTime<Tz>,
    ) -> Result<HorizonCrossing> {
        let today = CalendarTime::from_datetime(datetime, self.utc_offset)?;
        self.find_sunrise_time(&today)
    }
}
