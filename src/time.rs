//! Civil calendar arithmetic for solar tracking.
//!
//! A [`CalendarTime`] is a wall-clock timestamp in the tracker's configured civil time zone.
//! [`Timestamp`] is the matching absolute time scale: whole seconds since
//! 1970-01-01 00:00:00 *of the same civil zone*. Converting between the two never involves
//! a time zone database, so the arithmetic is exact, allocation-free and `no_std` friendly.
//!
//! Dates use the proleptic Gregorian calendar.

use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};

/// Earliest supported calendar year.
pub const MIN_YEAR: i32 = -9999;

/// Latest supported calendar year.
pub const MAX_YEAR: i32 = 9999;

/// Seconds per day (86,400)
const SECONDS_PER_DAY: i64 = 86_400;

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_DAY_OFFSET: i64 = 719_468;

/// Days in a 400-year Gregorian cycle.
const DAYS_PER_ERA: i64 = 146_097;

/// Civil date and time of day, to whole seconds.
///
/// Fields are validated on construction, so every `CalendarTime` names an existing instant.
/// Ordering is chronological.
///
/// # Example
/// ```
/// # use sun_tracker::CalendarTime;
/// let time = CalendarTime::new(2024, 2, 29, 6, 30, 0).unwrap();
/// assert_eq!(time.day_of_year(), 60);
/// assert_eq!(time.add_days(1).unwrap().to_string(), "2024-03-01 06:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl CalendarTime {
    /// Creates a civil timestamp from its components.
    ///
    /// # Arguments
    /// * `year` - Year ([`MIN_YEAR`] to [`MAX_YEAR`])
    /// * `month` - Month (1-12)
    /// * `day` - Day of month (1 to the length of the month)
    /// * `hour` - Hour (0-23)
    /// * `minute` - Minute (0-59)
    /// * `second` - Second (0-59)
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if any component is outside its valid range.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::invalid_datetime("year outside supported range"));
        }
        if day == 0 || day > days_in_month(year, month)? {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }
        check_time_of_day(hour, minute, second)?;

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Gets the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Gets the month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Gets the day of month (1-31).
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Gets the hour (0-23).
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Gets the minute (0-59).
    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    /// Gets the second (0-59).
    #[must_use]
    pub const fn second(&self) -> u32 {
        self.second
    }

    /// Day of year, 1-based (January 1st is day 1, December 31st is day 365 or 366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        let mut day_of_year = self.day;
        for month in 1..self.month {
            day_of_year += month_length(self.year, month);
        }
        day_of_year
    }

    /// Hour of day including the fractional minutes and seconds.
    #[must_use]
    pub fn fractional_hour(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + f64::from(self.second) / 3600.0
    }

    /// Returns the same calendar date at a different time of day.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the time of day is out of range.
    pub fn at_time(&self, hour: u32, minute: u32, second: u32) -> Result<Self> {
        check_time_of_day(hour, minute, second)?;
        Ok(Self {
            hour,
            minute,
            second,
            ..*self
        })
    }

    /// Returns this timestamp shifted by whole calendar days, keeping the time of day.
    ///
    /// Month and year boundaries roll over as on a wall calendar.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the result leaves the supported year range.
    pub fn add_days(&self, days: i64) -> Result<Self> {
        let day_number = days_from_civil(self.year, self.month, self.day)
            .checked_add(days)
            .ok_or(Error::invalid_datetime("day offset overflow"))?;
        let (year, month, day) = civil_from_days(day_number)?;
        Ok(Self {
            year,
            month,
            day,
            ..*self
        })
    }

    /// Converts to the absolute time scale.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        let days = days_from_civil(self.year, self.month, self.day);
        let seconds_of_day =
            i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second);
        Timestamp(days * SECONDS_PER_DAY + seconds_of_day)
    }
}

impl core::fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Absolute time in whole seconds since 1970-01-01 00:00:00 of the tracker's civil zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from seconds since the civil epoch.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Gets the seconds since the civil epoch.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.0
    }

    /// Returns the instant `seconds` later (or earlier, if negative).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the result does not fit in an `i64`.
    pub fn add_seconds(self, seconds: i64) -> Result<Self> {
        self.0
            .checked_add(seconds)
            .map(Self)
            .ok_or(Error::invalid_datetime("timestamp overflow"))
    }

    /// Seconds from `self` until `later` (negative if `later` is earlier).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the difference does not fit in an `i64`.
    pub fn seconds_until(self, later: Self) -> Result<i64> {
        later
            .0
            .checked_sub(self.0)
            .ok_or(Error::invalid_datetime("timestamp overflow"))
    }

    /// Converts back to civil date and time.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the instant falls outside the supported year range.
    pub fn to_calendar(self) -> Result<CalendarTime> {
        let days = self.0.div_euclid(SECONDS_PER_DAY);
        let seconds_of_day = self.0.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days)?;

        // rem_euclid keeps seconds_of_day in 0..86_400
        #[allow(clippy::cast_sign_loss)]
        let seconds_of_day = seconds_of_day as u32;

        Ok(CalendarTime {
            year,
            month,
            day,
            hour: seconds_of_day / 3600,
            minute: seconds_of_day % 3600 / 60,
            second: seconds_of_day % 60,
        })
    }
}

#[cfg(feature = "chrono")]
impl CalendarTime {
    /// Creates a civil timestamp from a chrono `NaiveDateTime`, dropping sub-second precision.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the year is outside the supported range.
    pub fn from_naive(datetime: &NaiveDateTime) -> Result<Self> {
        Self::new(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            datetime.second(),
        )
    }

    /// Creates a civil timestamp from a timezone-aware chrono `DateTime`, expressed as wall-clock
    /// time at the given UTC offset.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the year is outside the supported range.
    pub fn from_datetime<Tz: TimeZone>(
        datetime: &chrono::DateTime<Tz>,
        offset: crate::UtcOffset,
    ) -> Result<Self> {
        let local = datetime.with_timezone(&offset.to_fixed_offset()?);
        Self::from_naive(&local.naive_local())
    }

    /// Converts to a chrono `NaiveDateTime`.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if chrono cannot represent the date.
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or(Error::invalid_datetime("date not representable by chrono"))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<NaiveDateTime> for CalendarTime {
    type Error = Error;

    fn try_from(datetime: NaiveDateTime) -> Result<Self> {
        Self::from_naive(&datetime)
    }
}

/// Checks whether a year is a leap year in the Gregorian calendar.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month.
///
/// # Errors
/// Returns `InvalidDateTime` if month is not between 1 and 12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_datetime("month must be between 1 and 12"));
    }
    Ok(month_length(year, month))
}

const fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn check_time_of_day(hour: u32, minute: u32, second: u32) -> Result<()> {
    if hour > 23 {
        return Err(Error::invalid_datetime("hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(Error::invalid_datetime("minute must be between 0 and 59"));
    }
    if second > 59 {
        return Err(Error::invalid_datetime("second must be between 0 and 59"));
    }
    Ok(())
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
///
/// Counts in 400-year eras starting on March 1st so that the leap day is the last day of
/// each computational year.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let year_of_era = y - era * 400;
    let shifted_month = (i64::from(month) + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - UNIX_EPOCH_DAY_OFFSET
}

/// Inverse of [`days_from_civil`].
#[allow(clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> Result<(i32, u32, u32)> {
    let z = days + UNIX_EPOCH_DAY_OFFSET;
    let era = z.div_euclid(DAYS_PER_ERA);
    let day_of_era = z - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    let year = i32::try_from(year)
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or(Error::invalid_datetime("year outside supported range"))?;
    Ok((year, month as u32, day as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> CalendarTime {
        CalendarTime::new(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn test_calendar_time_validation() {
        assert!(CalendarTime::new(2024, 13, 1, 0, 0, 0).is_err()); // Invalid month
        assert!(CalendarTime::new(2024, 0, 1, 0, 0, 0).is_err()); // Invalid month
        assert!(CalendarTime::new(2024, 1, 32, 0, 0, 0).is_err()); // Invalid day
        assert!(CalendarTime::new(2024, 1, 0, 0, 0, 0).is_err()); // Invalid day
        assert!(CalendarTime::new(2024, 1, 1, 24, 0, 0).is_err()); // Invalid hour
        assert!(CalendarTime::new(2024, 1, 1, 0, 60, 0).is_err()); // Invalid minute
        assert!(CalendarTime::new(2024, 1, 1, 0, 0, 60).is_err()); // Invalid second
        assert!(CalendarTime::new(10_000, 1, 1, 0, 0, 0).is_err()); // Unsupported year
        assert!(CalendarTime::new(2024, 4, 30, 23, 59, 59).is_ok());
    }

    #[test]
    fn test_february_validation() {
        assert!(CalendarTime::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(CalendarTime::new(2024, 2, 30, 0, 0, 0).is_err());
        assert!(CalendarTime::new(2023, 2, 29, 0, 0, 0).is_err());
        assert!(CalendarTime::new(1900, 2, 29, 0, 0, 0).is_err());
        assert!(CalendarTime::new(2000, 2, 29, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2023, 4).unwrap(), 30);
        assert_eq!(days_in_month(2023, 12).unwrap(), 31);
        assert!(days_in_month(2023, 13).is_err());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(civil(2024, 1, 1, 0, 0, 0).day_of_year(), 1);
        assert_eq!(civil(2024, 2, 29, 0, 0, 0).day_of_year(), 60);
        assert_eq!(civil(2024, 3, 1, 0, 0, 0).day_of_year(), 61);
        assert_eq!(civil(2023, 3, 1, 0, 0, 0).day_of_year(), 60);
        assert_eq!(civil(2024, 6, 21, 12, 0, 0).day_of_year(), 173);
        assert_eq!(civil(2023, 12, 31, 0, 0, 0).day_of_year(), 365);
        assert_eq!(civil(2024, 12, 31, 0, 0, 0).day_of_year(), 366);
    }

    #[test]
    fn test_fractional_hour() {
        assert_eq!(civil(2024, 1, 1, 12, 0, 0).fractional_hour(), 12.0);
        assert!((civil(2024, 1, 1, 6, 30, 36).fractional_hour() - 6.51).abs() < 1e-12);
    }

    #[test]
    fn test_add_days_rollover() {
        let cases = [
            ((2024, 1, 31), (2024, 2, 1)),
            ((2024, 2, 28), (2024, 2, 29)),
            ((2024, 2, 29), (2024, 3, 1)),
            ((2023, 2, 28), (2023, 3, 1)),
            ((2023, 12, 31), (2024, 1, 1)),
            ((2100, 2, 28), (2100, 3, 1)),
        ];
        for ((y, m, d), (ey, em, ed)) in cases {
            let next = civil(y, m, d, 7, 15, 30).add_days(1).unwrap();
            assert_eq!(next, civil(ey, em, ed, 7, 15, 30), "{y}-{m}-{d} + 1 day");
        }

        assert_eq!(
            civil(2024, 3, 1, 0, 0, 0).add_days(-1).unwrap(),
            civil(2024, 2, 29, 0, 0, 0)
        );
        assert_eq!(
            civil(2024, 1, 1, 0, 0, 0).add_days(366).unwrap(),
            civil(2025, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_add_days_leaves_supported_range() {
        let last = civil(MAX_YEAR, 12, 31, 12, 0, 0);
        let err = last.add_days(1).unwrap_err();
        assert!(err.is_calendar_failure());
        assert!(last.add_days(i64::MAX).is_err());
    }

    #[test]
    fn test_at_time() {
        let date = civil(2024, 6, 21, 12, 34, 56);
        assert_eq!(date.at_time(4, 0, 0).unwrap(), civil(2024, 6, 21, 4, 0, 0));
        assert!(date.at_time(24, 0, 0).is_err());
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(civil(1970, 1, 1, 0, 0, 0).timestamp().seconds(), 0);
        assert_eq!(civil(2000, 3, 1, 0, 0, 0).timestamp().seconds(), 951_868_800);
        assert_eq!(
            civil(2024, 1, 1, 0, 0, 0).timestamp().seconds(),
            1_704_067_200
        );
        assert_eq!(
            Timestamp::from_seconds(-1).to_calendar().unwrap(),
            civil(1969, 12, 31, 23, 59, 59)
        );

        let time = civil(2024, 2, 29, 6, 55, 18);
        assert_eq!(time.timestamp().to_calendar().unwrap(), time);

        let start = civil(2024, 1, 2, 4, 0, 0).timestamp();
        let end = civil(2024, 1, 2, 8, 0, 0).timestamp();
        assert_eq!(start.seconds_until(end).unwrap(), 4 * 3600);
        assert_eq!(end.seconds_until(start).unwrap(), -4 * 3600);
        assert_eq!(start.add_seconds(4 * 3600).unwrap(), end);
    }

    #[test]
    fn test_timestamp_arithmetic_overflow() {
        let latest = Timestamp::from_seconds(i64::MAX);
        let earliest = Timestamp::from_seconds(i64::MIN);

        assert!(latest.add_seconds(1).unwrap_err().is_calendar_failure());
        assert!(earliest.add_seconds(-1).unwrap_err().is_calendar_failure());
        assert_eq!(latest.add_seconds(-1).unwrap().seconds(), i64::MAX - 1);

        assert!(earliest.seconds_until(latest).unwrap_err().is_calendar_failure());
        assert!(latest.seconds_until(earliest).is_err());
        assert_eq!(latest.seconds_until(latest).unwrap(), 0);
    }

    #[test]
    fn test_timestamp_outside_supported_range() {
        assert!(Timestamp::from_seconds(i64::MAX / 2).to_calendar().is_err());
        assert!(Timestamp::from_seconds(i64::MIN / 2).to_calendar().is_err());
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_display() {
        assert_eq!(civil(2024, 1, 2, 6, 5, 9).to_string(), "2024-01-02 06:05:09");
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_chrono_roundtrip() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let time = CalendarTime::try_from(naive).unwrap();
        assert_eq!(time, civil(2024, 6, 21, 12, 0, 0));
        assert_eq!(time.to_naive().unwrap(), naive);
    }
}
