//! Solar position model.
//!
//! Closed-form approximation of solar geometry after the NOAA General Solar Position
//! calculations: the equation of time and the solar declination are truncated Fourier series in
//! the fractional year. Accuracy is about ±0.1° in declination and a few seconds in the equation
//! of time, which is plenty for pointing a panel but not for ephemeris work.
//!
//! The time-dependent terms are exposed through [`SolarGeometry`] so the intermediate values can
//! be inspected independently of the final angles.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]

use crate::diagnostics::{Diagnostic, DiagnosticSink, NoDiagnostics};
use crate::math::{
    PI, acos, asin, clamp_unit, cos, degrees_to_radians, normalize_degrees_pm_180,
    radians_to_degrees, sin,
};
use crate::time::CalendarTime;
use crate::{Location, SolarAngles, UtcOffset};

/// Minutes of time per radian of Earth rotation (1440 / 2π).
const MINUTES_PER_RADIAN: f64 = 229.18;

/// Degrees the sun moves along the hour circle per minute of time.
const DEGREES_PER_MINUTE: f64 = 0.25;

/// Intermediate values of a position evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    day_of_year: u32,
    fractional_hour: f64,
    fractional_year: f64,
    equation_of_time: f64,
    declination: f64,
    true_solar_time: f64,
    hour_angle: f64,
}

impl SolarGeometry {
    /// Day of year (1-based).
    #[must_use]
    pub const fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    /// Hour of day including minutes and seconds.
    #[must_use]
    pub const fn fractional_hour(&self) -> f64 {
        self.fractional_hour
    }

    /// Fractional year γ in radians.
    #[must_use]
    pub const fn fractional_year(&self) -> f64 {
        self.fractional_year
    }

    /// Equation of time in minutes.
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }

    /// Solar declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }

    /// True solar time in minutes.
    #[must_use]
    pub const fn true_solar_time(&self) -> f64 {
        self.true_solar_time
    }

    /// Hour angle in degrees, in [-180°, 180°). Negative before solar noon.
    #[must_use]
    pub const fn hour_angle(&self) -> f64 {
        self.hour_angle
    }
}

/// Calculate the sun's azimuth and elevation.
///
/// # Arguments
/// * `location` - Observer location
/// * `offset` - UTC offset of the civil clock `time` is read from
/// * `time` - Civil date and time
///
/// # Returns
/// Solar angles. Never fails; out-of-range coordinates yield meaningless angles.
///
/// # Example
/// ```rust
/// use sun_tracker::{position, CalendarTime, Location, UtcOffset};
///
/// let time = CalendarTime::new(2024, 6, 21, 12, 0, 0).unwrap();
/// let angles = position::solar_position(Location::new(25.0, 121.5), UtcOffset::UTC_PLUS_8, &time);
///
/// assert!(angles.elevation() > 85.0);
/// ```
#[must_use]
pub fn solar_position(location: Location, offset: UtcOffset, time: &CalendarTime) -> SolarAngles {
    solar_position_with_diagnostics(location, offset, time, &NoDiagnostics)
}

/// Calculate the sun's azimuth and elevation, reporting intermediate values to `sink`.
#[must_use]
pub fn solar_position_with_diagnostics<S: DiagnosticSink + ?Sized>(
    location: Location,
    offset: UtcOffset,
    time: &CalendarTime,
    sink: &S,
) -> SolarAngles {
    sink.record(&Diagnostic::Evaluating { time: *time });

    let geometry = solar_geometry(location.longitude(), offset, time);
    sink.record(&Diagnostic::DayOfYear {
        day_of_year: geometry.day_of_year,
        fractional_hour: geometry.fractional_hour,
    });
    sink.record(&Diagnostic::SolarDeclination {
        equation_of_time: geometry.equation_of_time,
        declination: geometry.declination,
    });
    sink.record(&Diagnostic::HourAngle {
        true_solar_time: geometry.true_solar_time,
        hour_angle: geometry.hour_angle,
    });

    let angles = solar_angles(location.latitude(), &geometry);
    sink.record(&Diagnostic::Result {
        azimuth: angles.azimuth(),
        elevation: angles.elevation(),
    });
    angles
}

/// Calculate the time-dependent solar geometry for an observer at `longitude`.
#[must_use]
pub fn solar_geometry(longitude: f64, offset: UtcOffset, time: &CalendarTime) -> SolarGeometry {
    let day_of_year = time.day_of_year();
    let fractional_hour = time.fractional_hour();

    let gamma = fractional_year(day_of_year, fractional_hour);
    let eqtime = equation_of_time(gamma);
    let decl = declination(gamma);

    // 4 minutes of time per degree of longitude
    let time_offset = eqtime - 4.0 * longitude + f64::from(offset.minutes());
    let tst = fractional_hour * 60.0 + time_offset;
    let ha = normalize_degrees_pm_180(tst * DEGREES_PER_MINUTE - 180.0);

    SolarGeometry {
        day_of_year,
        fractional_hour,
        fractional_year: gamma,
        equation_of_time: eqtime,
        declination: decl,
        true_solar_time: tst,
        hour_angle: ha,
    }
}

/// Fractional year γ in radians for a 1-based day of year and an hour of day.
#[must_use]
pub fn fractional_year(day_of_year: u32, fractional_hour: f64) -> f64 {
    2.0 * PI / 365.0 * (f64::from(day_of_year) - 1.0 + (fractional_hour - 12.0) / 24.0)
}

/// Equation of time in minutes for fractional year `gamma` (radians).
#[must_use]
pub fn equation_of_time(gamma: f64) -> f64 {
    MINUTES_PER_RADIAN
        * (0.000075 + 0.001868 * cos(gamma)
            - 0.032077 * sin(gamma)
            - 0.014615 * cos(2.0 * gamma)
            - 0.040849 * sin(2.0 * gamma))
}

/// Solar declination in degrees for fractional year `gamma` (radians).
#[must_use]
pub fn declination(gamma: f64) -> f64 {
    let decl = 0.006918 - 0.399912 * cos(gamma) + 0.070257 * sin(gamma)
        - 0.006758 * cos(2.0 * gamma)
        + 0.000907 * sin(2.0 * gamma)
        - 0.002697 * cos(3.0 * gamma)
        + 0.00148 * sin(3.0 * gamma);
    radians_to_degrees(decl)
}

fn solar_angles(latitude: f64, geometry: &SolarGeometry) -> SolarAngles {
    let lat_rad = degrees_to_radians(latitude);
    let decl_rad = degrees_to_radians(geometry.declination);
    let ha_rad = degrees_to_radians(geometry.hour_angle);

    let sin_elevation =
        sin(lat_rad) * sin(decl_rad) + cos(lat_rad) * cos(decl_rad) * cos(ha_rad);
    let elevation = radians_to_degrees(asin(clamp_unit(sin_elevation)));

    // Degenerate at the poles and at the zenith, where azimuth is undefined
    let cos_azimuth = (sin(decl_rad) - sin(lat_rad) * sin_elevation)
        / (cos(lat_rad) * cos(degrees_to_radians(elevation)));
    let cos_azimuth = if cos_azimuth.is_nan() {
        1.0
    } else {
        clamp_unit(cos_azimuth)
    };

    let mut azimuth = radians_to_degrees(acos(cos_azimuth));
    if geometry.hour_angle > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    SolarAngles::from_model(azimuth, elevation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAIPEI: Location = Location::new(25.0, 121.5);

    fn civil(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> CalendarTime {
        CalendarTime::new(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn test_solstice_noon_geometry() {
        let time = civil(2024, 6, 21, 12, 0, 0);
        let geometry = solar_geometry(TAIPEI.longitude(), UtcOffset::UTC_PLUS_8, &time);

        assert_eq!(geometry.day_of_year(), 173);
        assert_eq!(geometry.fractional_hour(), 12.0);
        assert!((geometry.fractional_year() - 2.0 * PI / 365.0 * 172.0).abs() < 1e-12);
        assert!((geometry.equation_of_time() - (-1.5474)).abs() < 1e-3);
        assert!((geometry.declination() - 23.4556).abs() < 1e-3);
        assert!((geometry.true_solar_time() - 712.4526).abs() < 1e-3);
        assert!((geometry.hour_angle() - (-1.8869)).abs() < 1e-3);
    }

    #[test]
    fn test_solstice_noon_angles() {
        let angles = solar_position(TAIPEI, UtcOffset::UTC_PLUS_8, &civil(2024, 6, 21, 12, 0, 0));

        assert!((angles.elevation() - 87.6879).abs() < 1e-3);
        assert!((angles.azimuth() - 131.5198).abs() < 1e-3);
    }

    #[test]
    fn test_hour_angle_wraps_before_midnight() {
        // True solar time is slightly negative just after civil midnight
        let time = civil(2024, 6, 21, 0, 0, 0);
        let geometry = solar_geometry(TAIPEI.longitude(), UtcOffset::UTC_PLUS_8, &time);
        assert!((geometry.hour_angle() - 178.1405).abs() < 1e-3);

        let angles = solar_position(TAIPEI, UtcOffset::UTC_PLUS_8, &time);
        assert!((angles.azimuth() - 357.7218).abs() < 1e-3);
        assert!((angles.elevation() - (-41.5118)).abs() < 1e-3);
    }

    #[test]
    fn test_hour_angle_wraps_after_solar_midnight() {
        // Early November the equation of time pushes true solar time past 1440 min before 24:00
        let time = civil(2024, 11, 3, 23, 55, 0);
        let geometry = solar_geometry(TAIPEI.longitude(), UtcOffset::UTC_PLUS_8, &time);
        assert!((geometry.true_solar_time() - 1445.3193).abs() < 1e-3);
        assert!((geometry.hour_angle() - (-178.6702)).abs() < 1e-3);

        // Past solar midnight the sun is just east of north, so no afternoon mirror
        let angles = solar_position(TAIPEI, UtcOffset::UTC_PLUS_8, &time);
        assert!((angles.azimuth() - 7.5723).abs() < 1e-3);
        assert!((angles.elevation() - (-80.2196)).abs() < 1e-3);
    }

    #[test]
    fn test_hour_angle_range_for_any_offset() {
        for offset_hours in -12..=14 {
            let offset = UtcOffset::from_hours(offset_hours).unwrap();
            for hour in 0..24 {
                let time = civil(2024, 3, 20, hour, 30, 0);
                let ha = solar_geometry(-75.0, offset, &time).hour_angle();
                assert!((-180.0..180.0).contains(&ha), "hour angle {ha}");
            }
        }
    }

    #[test]
    fn test_declination_extremes() {
        // Maximum near the June solstice, minimum near the December solstice
        let june = declination(fractional_year(172, 12.0));
        let december = declination(fractional_year(355, 12.0));
        assert!((june - 23.44).abs() < 0.1);
        assert!((december + 23.44).abs() < 0.1);

        // Close to zero at the March equinox
        assert!(declination(fractional_year(80, 12.0)).abs() < 0.5);
    }

    #[test]
    fn test_equation_of_time_extremes() {
        // About -14 minutes in mid February, about +16 minutes in early November
        assert!((equation_of_time(fractional_year(42, 12.0)) + 14.2).abs() < 0.5);
        assert!((equation_of_time(fractional_year(307, 12.0)) - 16.4).abs() < 0.5);
    }

    #[test]
    fn test_afternoon_mirrors_azimuth() {
        let morning = solar_position(TAIPEI, UtcOffset::UTC_PLUS_8, &civil(2024, 3, 20, 9, 0, 0));
        let afternoon =
            solar_position(TAIPEI, UtcOffset::UTC_PLUS_8, &civil(2024, 3, 20, 15, 30, 0));

        assert!(morning.azimuth() < 180.0);
        assert!(afternoon.azimuth() > 180.0);
    }

    #[test]
    fn test_zenith_geometry_keeps_azimuth_finite() {
        // Equator, equinox, solar noon: the sun is within a fraction of a degree of the zenith
        let equator = Location::new(0.0, 120.0);
        let angles = solar_position(equator, UtcOffset::UTC_PLUS_8, &civil(2024, 3, 20, 12, 8, 0));

        assert!(angles.azimuth().is_finite());
        assert!((0.0..360.0).contains(&angles.azimuth()));
        assert!(angles.elevation() > 89.0);
    }

    #[test]
    fn test_pole_keeps_angles_in_range() {
        for latitude in [90.0, -90.0] {
            let angles = solar_position(
                Location::new(latitude, 0.0),
                UtcOffset::UTC,
                &civil(2024, 6, 21, 6, 0, 0),
            );
            assert!((0.0..360.0).contains(&angles.azimuth()));
            assert!((-90.0..=90.0).contains(&angles.elevation()));
        }
    }
}
