//! # Sun Tracker
//!
//! Sun position and next-sunrise calculations for solar-tracking controllers.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! A tracker periodically re-aims a panel or sensor at the sun and parks overnight. This crate
//! answers the two questions it needs for that:
//! - **Where is the sun?** A closed-form approximation (NOAA fractional-year Fourier series for
//!   the equation of time and the declination) gives azimuth and elevation for a fixed location
//!   at any civil time.
//! - **When does tracking resume?** Tomorrow's sunrise is located by bisecting a civil-time window
//!   (04:00 to 08:00 by default) on the sign of the solar elevation, to one-minute resolution.
//!   The matching sunset search tells the tracker when to park.
//!
//! Everything is synchronous and allocation-free. A [`Calculator`] holds only immutable
//! configuration, so it can be reused from a periodic scheduler.
//!
//! ## Features
//!
//! - `std` (default): Use standard library for native math functions
//! - `chrono` (default): Conversions between [`CalendarTime`] and chrono date/time types
//! - `log` (default): [`LogDiagnostics`] sink writing to the `log` facade
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono + log
//! sun-tracker = "0.1"
//!
//! # Embedded controller: no_std, pure numeric API
//! sun-tracker = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sun_tracker::{CalendarTime, Calculator, Location};
//!
//! // Taipei, civil time at UTC+8
//! let calculator = Calculator::new(Location::new(25.0, 121.5));
//!
//! let noon = CalendarTime::new(2024, 6, 21, 12, 0, 0).unwrap();
//! let angles = calculator.calculate_position(&noon);
//! println!("Azimuth: {:.3}°", angles.azimuth());
//! println!("Elevation: {:.3}°", angles.elevation());
//!
//! let sunrise = calculator.find_sunrise_time(&noon).unwrap();
//! println!("Resume tracking at {} facing {:.1}°", sunrise.time(), sunrise.position().azimuth());
//! ```
//!
//! ## Civil time
//!
//! [`CalendarTime`] values are wall-clock readings at the calculator's [`UtcOffset`] (UTC+8
//! unless configured otherwise). No time zone database is consulted; daylight saving changes
//! must be applied by the caller through the offset.
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Elevation**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//!
//! ## Reference
//!
//! NOAA Global Monitoring Division, *General Solar Position Calculations*.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::diagnostics::{Crossing, Diagnostic, DiagnosticSink, NoDiagnostics};
#[cfg(feature = "log")]
pub use crate::diagnostics::LogDiagnostics;
pub use crate::error::{Error, Result};
pub use crate::position::SolarGeometry;
pub use crate::sunrise::{HorizonCrossing, SearchConfig, SearchWindow};
pub use crate::time::{CalendarTime, Timestamp};
pub use crate::tracker::Calculator;
pub use crate::types::{Location, SolarAngles, UtcOffset};

// Algorithm modules
pub mod position;
pub mod sunrise;

// Core modules
pub mod diagnostics;
pub mod error;
pub mod types;

// Internal modules
mod math;
mod tracker;

// Public modules
pub mod time;
