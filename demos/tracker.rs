//! Simulates one day of a solar tracker controller.
//!
//! Run with `RUST_LOG=sun_tracker=info` to see the search diagnostics, or
//! `RUST_LOG=sun_tracker=debug` for every position evaluation.

use sun_tracker::{CalendarTime, Calculator, Location, LogDiagnostics, UtcOffset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let calculator = Calculator::new(Location::checked(25.0, 121.5)?)
        .with_utc_offset(UtcOffset::from_hours(8)?)
        .with_diagnostics(LogDiagnostics);

    let today = CalendarTime::new(2024, 6, 20, 21, 0, 0)?;
    let sunrise = calculator.find_sunrise_time(&today)?;
    let sunset = calculator.find_sunset_time(&today)?;

    println!(
        "Park facing {:.1}° until {}",
        sunrise.position().azimuth(),
        sunrise.time()
    );

    // Re-aim every 30 minutes while the sun is up
    let quiet = calculator.clone().with_diagnostics(|_: &sun_tracker::Diagnostic| {});
    let mut instant = sunrise.timestamp();
    while instant < sunset.timestamp() {
        let time = instant.to_calendar()?;
        let angles = quiet.calculate_position(&time);
        println!(
            "{time}  azimuth {:7.2}°  elevation {:6.2}°",
            angles.azimuth(),
            angles.elevation()
        );
        instant = instant.add_seconds(30 * 60)?;
    }

    println!("Stop tracking at {}", sunset.time());
    Ok(())
}
