//! Error types for the sun tracker.

use crate::math::normalize_degrees_0_to_360;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while configuring the tracker or searching for horizon crossings.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid UTC offset (must be between -12:00 and +14:00).
    InvalidUtcOffset {
        /// The invalid offset in minutes east of UTC.
        minutes: i32,
    },
    /// Invalid elevation angle.
    InvalidElevationAngle {
        /// The invalid elevation angle value provided.
        value: f64,
    },
    /// Invalid civil date/time, or a calendar conversion that left the supported range.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// Invalid search window configuration.
    InvalidSearchWindow {
        /// Description of the window constraint violation.
        message: &'static str,
    },
    /// The search window does not bracket a horizon crossing in the requested direction.
    NoHorizonCrossing {
        /// Solar elevation at the start of the window, in degrees.
        start_elevation: f64,
        /// Solar elevation at the end of the window, in degrees.
        end_elevation: f64,
    },
    /// Numerical computation error.
    ComputationError {
        /// Description of the computation error.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidUtcOffset { minutes } => {
                write!(
                    f,
                    "invalid UTC offset {minutes} min (must be between -720 and +840)"
                )
            }
            Self::InvalidElevationAngle { value } => {
                write!(
                    f,
                    "invalid elevation angle {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::InvalidSearchWindow { message } => {
                write!(f, "invalid search window: {message}")
            }
            Self::NoHorizonCrossing {
                start_elevation,
                end_elevation,
            } => {
                write!(
                    f,
                    "no horizon crossing in search window (elevation {start_elevation:.3}° at start, {end_elevation:.3}° at end)"
                )
            }
            Self::ComputationError { message } => {
                write!(f, "computation error: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid UTC offset error.
    #[must_use]
    pub const fn invalid_utc_offset(minutes: i32) -> Self {
        Self::InvalidUtcOffset { minutes }
    }

    /// Creates an invalid elevation angle error.
    #[must_use]
    pub const fn invalid_elevation_angle(value: f64) -> Self {
        Self::InvalidElevationAngle { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an invalid search window error.
    #[must_use]
    pub const fn invalid_search_window(message: &'static str) -> Self {
        Self::InvalidSearchWindow { message }
    }

    /// Creates a missing horizon crossing error.
    #[must_use]
    pub const fn no_horizon_crossing(start_elevation: f64, end_elevation: f64) -> Self {
        Self::NoHorizonCrossing {
            start_elevation,
            end_elevation,
        }
    }

    /// Creates a computation error.
    #[must_use]
    pub const fn computation_error(message: &'static str) -> Self {
        Self::ComputationError { message }
    }

    /// Returns `true` if this error came from calendar conversion.
    #[must_use]
    pub const fn is_calendar_failure(&self) -> bool {
        matches!(self, Self::InvalidDateTime { .. })
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a UTC offset in minutes (-12:00 to +14:00).
///
/// # Errors
/// Returns `InvalidUtcOffset` if the offset is outside -720 to +840 minutes.
pub fn check_utc_offset(minutes: i32) -> Result<()> {
    if !(-720..=840).contains(&minutes) {
        return Err(Error::invalid_utc_offset(minutes));
    }
    Ok(())
}

/// Validates and normalizes an azimuth angle to the range [0, 360) degrees.
///
/// # Errors
/// Returns `ComputationError` if azimuth is not finite.
pub fn check_azimuth(azimuth: f64) -> Result<f64> {
    if !azimuth.is_finite() {
        return Err(Error::computation_error("azimuth is not finite"));
    }
    Ok(normalize_degrees_0_to_360(azimuth))
}

/// Validates an elevation angle to be within the range [-90, 90] degrees.
///
/// # Errors
/// Returns `InvalidElevationAngle` if elevation is not finite or outside the valid range.
pub fn check_elevation_angle(elevation: f64) -> Result<f64> {
    if !(-90.0..=90.0).contains(&elevation) {
        return Err(Error::invalid_elevation_angle(elevation));
    }
    Ok(elevation)
}
