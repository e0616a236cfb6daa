//! Horizon crossing search.
//!
//! Finds tomorrow's sunrise (or sunset) by bisecting a fixed civil-time window with repeated
//! evaluations of the [position model](crate::position). The window must bracket the crossing:
//! for a sunrise the sun has to be below the horizon at the start and at or above it at the end.
//! This is checked before bisecting, so an unsuitable window (polar day or night, or a location
//! whose sunrise falls outside the configured hours) fails with
//! [`Error::NoHorizonCrossing`] instead of silently converging onto a window edge.

use crate::diagnostics::{Crossing, Diagnostic, DiagnosticSink};
use crate::position::{solar_position, solar_position_with_diagnostics};
use crate::time::{CalendarTime, Timestamp};
use crate::{Error, Location, Result, SolarAngles, UtcOffset};

/// Civil hours searched for a horizon crossing, and the resolution to bisect down to.
///
/// # Example
/// ```
/// # use sun_tracker::SearchConfig;
/// let sunrise = SearchConfig::SUNRISE;
/// assert_eq!((sunrise.start_hour(), sunrise.end_hour()), (4, 8));
/// assert_eq!(sunrise.max_iterations(), 8);
///
/// let wide = SearchConfig::new(3, 10, 30).unwrap();
/// assert_eq!(wide.resolution_seconds(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    start_hour: u32,
    end_hour: u32,
    resolution_seconds: i64,
}

impl SearchConfig {
    /// Tomorrow 04:00 to 08:00, one-minute resolution.
    pub const SUNRISE: Self = Self {
        start_hour: 4,
        end_hour: 8,
        resolution_seconds: 60,
    };

    /// Tomorrow 16:00 to 20:00, one-minute resolution.
    pub const SUNSET: Self = Self {
        start_hour: 16,
        end_hour: 20,
        resolution_seconds: 60,
    };

    /// Creates a search configuration.
    ///
    /// # Arguments
    /// * `start_hour` - First civil hour of the window (0-23)
    /// * `end_hour` - Civil hour closing the window (`start_hour + 1` to 24)
    /// * `resolution_seconds` - Bisection stops once the window is this narrow (at least 1)
    ///
    /// # Errors
    /// Returns `InvalidSearchWindow` for an empty window or a non-positive resolution.
    pub fn new(start_hour: u32, end_hour: u32, resolution_seconds: i64) -> Result<Self> {
        if end_hour > 24 {
            return Err(Error::invalid_search_window("end hour must be at most 24"));
        }
        if start_hour >= end_hour {
            return Err(Error::invalid_search_window(
                "start hour must be before end hour",
            ));
        }
        if resolution_seconds < 1 {
            return Err(Error::invalid_search_window(
                "resolution must be at least one second",
            ));
        }
        Ok(Self {
            start_hour,
            end_hour,
            resolution_seconds,
        })
    }

    /// Gets the first civil hour of the window.
    #[must_use]
    pub const fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Gets the civil hour closing the window.
    #[must_use]
    pub const fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Gets the bisection resolution in seconds.
    #[must_use]
    pub const fn resolution_seconds(&self) -> i64 {
        self.resolution_seconds
    }

    /// Upper bound on the number of position evaluations spent bisecting.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        let mut width = (self.end_hour - self.start_hour) as i64 * 3600;
        let mut iterations = 0;
        while width > self.resolution_seconds {
            width -= width / 2;
            iterations += 1;
        }
        iterations
    }

    /// Builds the window on the civil day after `today`.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if tomorrow is outside the supported calendar range.
    pub fn window_after(&self, today: &CalendarTime) -> Result<SearchWindow> {
        let tomorrow = today.add_days(1)?;
        let start = tomorrow.at_time(self.start_hour, 0, 0)?;
        let end = if self.end_hour == 24 {
            tomorrow.add_days(1)?.at_time(0, 0, 0)?
        } else {
            tomorrow.at_time(self.end_hour, 0, 0)?
        };
        SearchWindow::new(start.timestamp(), end.timestamp())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::SUNRISE
    }
}

/// Absolute time interval bracketing a horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchWindow {
    start: Timestamp,
    end: Timestamp,
}

impl SearchWindow {
    /// Creates a window.
    ///
    /// # Errors
    /// Returns `InvalidSearchWindow` unless `start` is before `end` and the width fits in
    /// an `i64` number of seconds.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        if start >= end {
            return Err(Error::invalid_search_window("start must be before end"));
        }
        if start.seconds_until(end).is_err() {
            return Err(Error::invalid_search_window("window is too wide"));
        }
        Ok(Self { start, end })
    }

    /// Gets the window start.
    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Gets the window end.
    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    /// Gets the window width in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        // Checked in `new`; bisection only narrows the window
        self.end.seconds() - self.start.seconds()
    }

    /// Gets the midpoint, rounded towards the start.
    #[must_use]
    pub const fn midpoint(&self) -> Timestamp {
        Timestamp::from_seconds(self.start.seconds() + self.duration_seconds() / 2)
    }

    /// Keeps the half of the window still containing the crossing.
    ///
    /// `crossed_at_midpoint` tells whether the crossing already happened at the midpoint.
    #[must_use]
    pub const fn bisect(self, crossed_at_midpoint: bool) -> Self {
        let mid = self.midpoint();
        if crossed_at_midpoint {
            Self {
                start: self.start,
                end: mid,
            }
        } else {
            Self {
                start: mid,
                end: self.end,
            }
        }
    }
}

/// A resolved horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonCrossing {
    crossing: Crossing,
    time: CalendarTime,
    timestamp: Timestamp,
    position: SolarAngles,
    iterations: u32,
}

impl HorizonCrossing {
    /// Direction of the crossing.
    #[must_use]
    pub const fn crossing(&self) -> Crossing {
        self.crossing
    }

    /// Civil time of the crossing, to within the search resolution.
    ///
    /// This is the first sampled instant after the crossing, so for a sunrise the sun is at or
    /// just above the horizon and for a sunset just below it.
    #[must_use]
    pub const fn time(&self) -> CalendarTime {
        self.time
    }

    /// Absolute time of the crossing.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Solar angles at [`time`](Self::time).
    #[must_use]
    pub const fn position(&self) -> SolarAngles {
        self.position
    }

    /// Number of bisection steps taken.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Converts the crossing time to a chrono `DateTime` at the given offset.
    ///
    /// # Errors
    /// Returns an error if chrono cannot represent the time or the offset.
    #[cfg(feature = "chrono")]
    pub fn to_datetime(&self, offset: UtcOffset) -> Result<chrono::DateTime<chrono::FixedOffset>> {
        use chrono::TimeZone;

        offset
            .to_fixed_offset()?
            .from_local_datetime(&self.time.to_naive()?)
            .single()
            .ok_or(Error::invalid_datetime("ambiguous local time"))
    }
}

/// Returns `true` if the sun crosses the horizon in the given direction between the window
/// edges.
#[must_use]
pub fn brackets_crossing(
    location: Location,
    offset: UtcOffset,
    window: &SearchWindow,
    crossing: Crossing,
) -> bool {
    edge_elevations(location, offset, window)
        .is_ok_and(|(start, end)| crossed(crossing, start) != crossed(crossing, end))
}

/// Bisects `window` down to `resolution_seconds` to locate the horizon crossing.
///
/// Every position evaluation is reported to `sink`, followed by a
/// [`Diagnostic::Resolved`] event on success.
///
/// # Errors
/// Returns `InvalidSearchWindow` if `resolution_seconds` is below one second,
/// `InvalidDateTime` if a window instant cannot be converted to civil time, or
/// `NoHorizonCrossing` if the window does not bracket the crossing.
pub fn find_crossing<S: DiagnosticSink + ?Sized>(
    location: Location,
    offset: UtcOffset,
    mut window: SearchWindow,
    crossing: Crossing,
    resolution_seconds: i64,
    sink: &S,
) -> Result<HorizonCrossing> {
    // A one-second window has its midpoint at the start and never shrinks
    if resolution_seconds < 1 {
        return Err(Error::invalid_search_window(
            "resolution must be at least one second",
        ));
    }

    let (start_elevation, end_elevation) = edge_elevations(location, offset, &window)?;
    if crossed(crossing, start_elevation) || !crossed(crossing, end_elevation) {
        return Err(Error::no_horizon_crossing(start_elevation, end_elevation));
    }

    sink.record(&Diagnostic::SearchWindow {
        crossing,
        start: window.start().to_calendar()?,
        end: window.end().to_calendar()?,
    });

    let mut iterations = 0;
    while window.duration_seconds() > resolution_seconds {
        let mid = window.midpoint().to_calendar()?;
        let elevation = solar_position_with_diagnostics(location, offset, &mid, sink).elevation();
        window = window.bisect(crossed(crossing, elevation));
        iterations += 1;
    }

    let time = window.end().to_calendar()?;
    let position = solar_position_with_diagnostics(location, offset, &time, sink);
    sink.record(&Diagnostic::Resolved { crossing, time });

    Ok(HorizonCrossing {
        crossing,
        time,
        timestamp: window.end(),
        position,
        iterations,
    })
}

/// Whether the sun is already past the crossing at the given elevation.
fn crossed(crossing: Crossing, elevation: f64) -> bool {
    match crossing {
        Crossing::Sunrise => elevation >= 0.0,
        Crossing::Sunset => elevation < 0.0,
    }
}

fn edge_elevations(
    location: Location,
    offset: UtcOffset,
    window: &SearchWindow,
) -> Result<(f64, f64)> {
    let start = window.start().to_calendar()?;
    let end = window.end().to_calendar()?;
    Ok((
        solar_position(location, offset, &start).elevation(),
        solar_position(location, offset, &end).elevation(),
    ))
}
