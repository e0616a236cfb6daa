//! Core data types for solar tracking calculations.

use crate::error::{check_azimuth, check_coordinates, check_elevation_angle, check_utc_offset};
use crate::math::normalize_degrees_0_to_360;
use crate::Result;

/// Geographic location of the tracker.
///
/// Latitude and longitude are in degrees, north and east positive.
///
/// # Example
/// ```
/// # use sun_tracker::Location;
/// let taipei = Location::new(25.0, 121.5);
/// assert_eq!(taipei.latitude(), 25.0);
///
/// assert!(Location::checked(95.0, 121.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location without validating the coordinates.
    ///
    /// Latitudes outside ±90° or longitudes outside ±180° produce meaningless angles.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a location, validating the coordinate ranges.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Offset of the tracker's civil clock from UTC, in minutes.
///
/// All [`CalendarTime`](crate::CalendarTime) values handed to a
/// [`Calculator`](crate::Calculator) are interpreted as wall-clock time at this offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// UTC+8, the default deployment zone.
    pub const UTC_PLUS_8: Self = Self(480);

    /// Coordinated Universal Time.
    pub const UTC: Self = Self(0);

    /// Creates an offset from minutes east of UTC.
    ///
    /// # Errors
    /// Returns `InvalidUtcOffset` if the offset is outside -12:00 to +14:00.
    pub fn from_minutes(minutes: i32) -> Result<Self> {
        check_utc_offset(minutes)?;
        Ok(Self(minutes))
    }

    /// Creates an offset from whole hours east of UTC.
    ///
    /// # Errors
    /// Returns `InvalidUtcOffset` if the offset is outside -12:00 to +14:00.
    pub fn from_hours(hours: i32) -> Result<Self> {
        Self::from_minutes(hours.saturating_mul(60))
    }

    /// Gets the offset in minutes east of UTC.
    #[must_use]
    pub const fn minutes(&self) -> i32 {
        self.0
    }

    /// Converts to a chrono `FixedOffset`.
    ///
    /// # Errors
    /// Returns `InvalidUtcOffset` if chrono rejects the offset.
    #[cfg(feature = "chrono")]
    pub fn to_fixed_offset(&self) -> Result<chrono::FixedOffset> {
        chrono::FixedOffset::east_opt(self.0 * 60).ok_or(crate::Error::invalid_utc_offset(self.0))
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::UTC_PLUS_8
    }
}

/// Apparent position of the sun as seen from the tracker.
///
/// - Azimuth: 0° = North, measured clockwise, in [0°, 360°)
/// - Elevation: 0° = horizon, 90° = directly overhead, negative below the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAngles {
    azimuth: f64,
    elevation: f64,
}

impl SolarAngles {
    /// Creates solar angles from azimuth and elevation, normalizing azimuth into [0°, 360°).
    ///
    /// # Errors
    /// Returns an error if azimuth is not finite or elevation is outside ±90°.
    ///
    /// # Example
    /// ```
    /// # use sun_tracker::SolarAngles;
    /// let angles = SolarAngles::new(-90.0, 30.0).unwrap();
    /// assert_eq!(angles.azimuth(), 270.0);
    /// assert_eq!(angles.zenith_angle(), 60.0);
    /// ```
    pub fn new(azimuth: f64, elevation: f64) -> Result<Self> {
        let azimuth = check_azimuth(azimuth)?;
        let elevation = check_elevation_angle(elevation)?;
        Ok(Self { azimuth, elevation })
    }

    /// Builds angles straight from the position model, which never fails.
    pub(crate) fn from_model(azimuth: f64, elevation: f64) -> Self {
        Self {
            azimuth: normalize_degrees_0_to_360(azimuth),
            elevation,
        }
    }

    /// Gets the azimuth in degrees (0° to 360°, 0° = North, increasing clockwise).
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the elevation in degrees above the horizon.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Gets the zenith angle in degrees (90° - elevation).
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.elevation
    }

    /// Checks if the sun is at or above the horizon.
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.elevation >= 0.0
    }

    /// Checks if the sun is below the horizon.
    #[must_use]
    pub fn is_sun_down(&self) -> bool {
        self.elevation < 0.0
    }
}
