//! Diagnostic output from the position model and horizon searches.
//!
//! Calculations report their intermediate values as [`Diagnostic`] events to a
//! [`DiagnosticSink`] chosen when the [`Calculator`](crate::Calculator) is built. Sinks only
//! observe; nothing they do can change a returned value.
//!
//! ```
//! use core::cell::RefCell;
//! use sun_tracker::{CalendarTime, Calculator, Diagnostic, Location};
//!
//! let seen = RefCell::new(0);
//! let calculator = Calculator::new(Location::new(25.0, 121.5))
//!     .with_diagnostics(|_: &Diagnostic| *seen.borrow_mut() += 1);
//!
//! calculator.calculate_position(&CalendarTime::new(2024, 6, 21, 12, 0, 0).unwrap());
//! assert!(*seen.borrow() > 0);
//! ```

use crate::time::CalendarTime;
use core::fmt;

/// Which way the sun crosses the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// Below to above the horizon.
    Sunrise,
    /// Above to below the horizon.
    Sunset,
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunrise => f.write_str("sunrise"),
            Self::Sunset => f.write_str("sunset"),
        }
    }
}

/// A single diagnostic event.
///
/// `Display` renders one prefixed, human-readable line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// Position evaluation started.
    Evaluating {
        /// Civil time being evaluated.
        time: CalendarTime,
    },
    /// Calendar decomposition of the evaluation time.
    DayOfYear {
        /// Day of year (1-based).
        day_of_year: u32,
        /// Hour of day including minutes and seconds.
        fractional_hour: f64,
    },
    /// Seasonal terms.
    SolarDeclination {
        /// Equation of time in minutes.
        equation_of_time: f64,
        /// Solar declination in degrees.
        declination: f64,
    },
    /// Diurnal terms.
    HourAngle {
        /// True solar time in minutes.
        true_solar_time: f64,
        /// Hour angle in degrees.
        hour_angle: f64,
    },
    /// Final angles of a position evaluation.
    Result {
        /// Azimuth in degrees.
        azimuth: f64,
        /// Elevation in degrees.
        elevation: f64,
    },
    /// A horizon search bracket was established.
    SearchWindow {
        /// Direction being searched.
        crossing: Crossing,
        /// Window start.
        start: CalendarTime,
        /// Window end.
        end: CalendarTime,
    },
    /// A horizon search converged.
    Resolved {
        /// Direction that was searched.
        crossing: Crossing,
        /// Civil time of the crossing.
        time: CalendarTime,
    },
}

impl Diagnostic {
    /// Returns `true` for events that summarize a search rather than a single evaluation.
    #[must_use]
    pub const fn is_search_event(&self) -> bool {
        matches!(self, Self::SearchWindow { .. } | Self::Resolved { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluating { time } => write!(f, "[position] evaluating sun position at {time}"),
            Self::DayOfYear {
                day_of_year,
                fractional_hour,
            } => write!(
                f,
                "[position] day of year {day_of_year}, hour {fractional_hour:.3}"
            ),
            Self::SolarDeclination {
                equation_of_time,
                declination,
            } => write!(
                f,
                "[position] equation of time {equation_of_time:.3} min, declination {declination:.3}°"
            ),
            Self::HourAngle {
                true_solar_time,
                hour_angle,
            } => write!(
                f,
                "[position] true solar time {true_solar_time:.3} min, hour angle {hour_angle:.3}°"
            ),
            Self::Result { azimuth, elevation } => write!(
                f,
                "[position] azimuth {azimuth:.3}°, elevation {elevation:.3}°"
            ),
            Self::SearchWindow {
                crossing,
                start,
                end,
            } => write!(f, "[{crossing}] searching between {start} and {end}"),
            Self::Resolved { crossing, time } => {
                write!(f, "[{crossing}] calculated {crossing} time: {time}")
            }
        }
    }
}

/// Receiver of diagnostic events.
///
/// Implemented for [`NoDiagnostics`], [`LogDiagnostics`] (feature `log`) and any
/// `Fn(&Diagnostic)` closure.
pub trait DiagnosticSink {
    /// Records one event.
    fn record(&self, diagnostic: &Diagnostic);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    #[inline]
    fn record(&self, _diagnostic: &Diagnostic) {}
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn record(&self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}

/// Sink that forwards events to the `log` facade under the `sun_tracker` target.
///
/// Per-evaluation detail is logged at `debug`, search summaries at `info`.
#[cfg(feature = "log")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogDiagnostics;

#[cfg(feature = "log")]
impl DiagnosticSink for LogDiagnostics {
    fn record(&self, diagnostic: &Diagnostic) {
        if diagnostic.is_search_event() {
            log::info!(target: "sun_tracker", "{diagnostic}");
        } else {
            log::debug!(target: "sun_tracker", "{diagnostic}");
        }
    }
}
