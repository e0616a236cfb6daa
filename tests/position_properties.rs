//! Properties of the solar position model over a grid of locations and times.

use sun_tracker::{CalendarTime, Calculator, Location, UtcOffset, position};

fn civil(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> CalendarTime {
    CalendarTime::new(year, month, day, hour, minute, second).unwrap()
}

#[test]
fn angles_stay_in_range() {
    for latitude in (-90..=90).step_by(15) {
        for longitude in (-180..=180).step_by(30) {
            let location = Location::new(f64::from(latitude), f64::from(longitude));
            for month in 1..=12 {
                for hour in (0..24).step_by(3) {
                    let time = civil(2024, month, 10, hour, 17, 42);
                    let angles = position::solar_position(location, UtcOffset::UTC_PLUS_8, &time);

                    assert!(
                        (0.0..360.0).contains(&angles.azimuth()),
                        "azimuth {} at {location:?} {time}",
                        angles.azimuth()
                    );
                    assert!(
                        (-90.0..=90.0).contains(&angles.elevation()),
                        "elevation {} at {location:?} {time}",
                        angles.elevation()
                    );
                }
            }
        }
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let calculator = Calculator::from_coordinates(25.0, 121.5);
    let time = civil(2024, 9, 3, 14, 22, 7);

    let first = calculator.calculate_position(&time);
    let second = calculator.calculate_position(&time);

    assert_eq!(first.azimuth().to_bits(), second.azimuth().to_bits());
    assert_eq!(first.elevation().to_bits(), second.elevation().to_bits());
}

#[test]
fn equator_equinox_noon_is_overhead() {
    // Longitude 120° sits on the UTC+8 meridian, so solar noon is clock noon plus the
    // equation of time (about +8 minutes on March 20th)
    let calculator = Calculator::from_coordinates(0.0, 120.0);
    let time = civil(2024, 3, 20, 12, 8, 0);

    let geometry = calculator.solar_geometry(&time);
    assert!(geometry.hour_angle().abs() < 0.5);
    assert!(geometry.declination().abs() < 0.5);

    let angles = calculator.calculate_position(&time);
    assert!((angles.elevation() - 90.0).abs() < 1.0);
}

#[test]
fn equinox_noon_elevation_tracks_latitude() {
    for latitude in [-40.0, -20.0, 10.0, 35.0, 50.0] {
        let calculator = Calculator::from_coordinates(latitude, 120.0);
        let angles = calculator.calculate_position(&civil(2024, 3, 20, 12, 8, 0));

        assert!(
            (angles.elevation() - (90.0 - f64::abs(latitude))).abs() < 1.0,
            "latitude {latitude}: elevation {}",
            angles.elevation()
        );
    }
}

#[test]
fn summer_solstice_noon_near_zenith() {
    let calculator = Calculator::from_coordinates(25.0, 121.5);
    let time = civil(2024, 6, 21, 12, 0, 0);

    let geometry = calculator.solar_geometry(&time);
    assert!((geometry.declination() - 23.4).abs() < 0.1);

    // 90° - |latitude - declination| is about 88.4°; at clock noon the sun is still a couple of
    // degrees short of transit
    let angles = calculator.calculate_position(&time);
    assert!((angles.elevation() - 88.0).abs() < 1.0);

    // South of the zenith, still in the morning half of the sky
    assert!(angles.azimuth() > 90.0 && angles.azimuth() < 180.0);
}

#[test]
fn solar_noon_azimuth_points_south() {
    let calculator = Calculator::from_coordinates(40.0, 120.0);
    let angles = calculator.calculate_position(&civil(2024, 3, 20, 12, 8, 0));

    assert!((angles.azimuth() - 180.0).abs() < 1.0);
}

#[test]
fn leap_day_maps_to_day_sixty() {
    let calculator = Calculator::from_coordinates(25.0, 121.5);

    let leap_day = calculator.solar_geometry(&civil(2024, 2, 29, 12, 0, 0));
    assert_eq!(leap_day.day_of_year(), 60);

    let common_year = calculator.solar_geometry(&civil(2023, 3, 1, 12, 0, 0));
    assert_eq!(common_year.day_of_year(), 60);

    let leap_year = calculator.solar_geometry(&civil(2024, 3, 1, 12, 0, 0));
    assert_eq!(leap_year.day_of_year(), 61);
    assert_eq!(
        calculator
            .solar_geometry(&civil(2024, 12, 31, 12, 0, 0))
            .day_of_year(),
        366
    );
}

#[test]
fn utc_offset_shifts_solar_time() {
    let location = Location::new(25.0, 121.5);
    let time = civil(2024, 6, 21, 12, 0, 0);

    let plus_8 = position::solar_geometry(location.longitude(), UtcOffset::UTC_PLUS_8, &time);
    let plus_9 = position::solar_geometry(
        location.longitude(),
        UtcOffset::from_hours(9).unwrap(),
        &time,
    );

    assert!((plus_9.true_solar_time() - plus_8.true_solar_time() - 60.0).abs() < 1e-9);
    assert!((plus_9.hour_angle() - plus_8.hour_angle() - 15.0).abs() < 1e-9);
}
