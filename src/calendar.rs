/*!
The rules of the calendar underlying every [`DateTime`](crate::DateTime).

The calendar is a proleptic calendar with a simplified leap year rule: every
year whose absolute value is divisible by `4` is a leap year. There is no
century correction, so `1900` *is* a leap year here. Years are never `0`:
year `1` is directly preceded by year `-1`.

Time is counted in ticks of 100 nanoseconds. An
[`Instant`](crate::Instant) is an unsigned 64-bit count of ticks where
[`HALF_VALUE`] corresponds to `0001-01-01T00:00:00`. This puts the
representable range at [`MIN_COMPONENTS`]..=[`MAX_COMPONENTS`], which is a
little more than 29,228 years in either direction.

# Example

```
use hnstime::calendar;

assert!(calendar::is_leap_year(2016));
assert!(calendar::is_leap_year(1900));
assert!(calendar::is_leap_year(-4));
assert!(!calendar::is_leap_year(-1));

assert_eq!(calendar::days_in_month(2, 2016)?, 29);
assert_eq!(calendar::days_in_month(2, 2015)?, 28);
assert!(calendar::days_in_month(13, 2015).is_err());

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::error::Error;

/// The number of ticks in a single microsecond.
pub const TICKS_PER_MICROSECOND: u64 = 10;
/// The number of ticks in a single millisecond.
pub const TICKS_PER_MILLISECOND: u64 = 1_000 * TICKS_PER_MICROSECOND;
/// The number of ticks in a single second.
pub const TICKS_PER_SECOND: u64 = 1_000 * TICKS_PER_MILLISECOND;
/// The number of ticks in a single minute.
pub const TICKS_PER_MINUTE: u64 = 60 * TICKS_PER_SECOND;
/// The number of ticks in a single hour.
pub const TICKS_PER_HOUR: u64 = 60 * TICKS_PER_MINUTE;
/// The number of ticks in a single day.
pub const TICKS_PER_DAY: u64 = 24 * TICKS_PER_HOUR;
/// The number of ticks in a year with 365 days.
pub const TICKS_PER_COMMON_YEAR: u64 = 365 * TICKS_PER_DAY;
/// The number of ticks in a year with 366 days.
pub const TICKS_PER_LEAP_YEAR: u64 = 366 * TICKS_PER_DAY;
/// The number of ticks in a group of three common years and one leap year.
pub const TICKS_PER_FOUR_YEARS: u64 =
    3 * TICKS_PER_COMMON_YEAR + TICKS_PER_LEAP_YEAR;

/// The tick count corresponding to `0001-01-01T00:00:00`.
///
/// Every tick count at or above this value is on or after that date. Every
/// tick count below it (except for `0`, which is reserved for
/// [`Instant::UNDEFINED`](crate::Instant::UNDEFINED)) is before it.
pub const HALF_VALUE: u64 = 1 << 63;

/// The latest representable date and time.
///
/// This corresponds to an [`Instant`](crate::Instant) of `u64::MAX`.
pub const MAX_COMPONENTS: Components =
    Components::new(29228, 2, 8, 2, 48, 5, 477, 580, 7);

/// The earliest representable date and time.
///
/// This corresponds to an [`Instant`](crate::Instant) of `1`.
pub const MIN_COMPONENTS: Components =
    Components::new(-29228, 11, 23, 21, 11, 54, 522, 419, 3);

/// The number of days in each month of a common year.
const DAYS_IN_MONTH: [u8; 12] =
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns true if and only if the given year is a leap year.
///
/// A year is a leap year when its absolute value is divisible by `4`. Unlike
/// the Gregorian calendar, there is no exception for centuries.
///
/// # Example
///
/// ```
/// use hnstime::calendar::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(1900));
/// assert!(is_leap_year(-29228));
/// assert!(!is_leap_year(2015));
/// ```
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year.unsigned_abs() % 4 == 0
}

/// Returns the number of days in the given month of the given year.
///
/// # Errors
///
/// This returns an error when `month` is not in the range `1..=12`.
///
/// # Example
///
/// ```
/// use hnstime::calendar::days_in_month;
///
/// assert_eq!(days_in_month(1, 2015)?, 31);
/// assert_eq!(days_in_month(2, -5)?, 28);
/// assert_eq!(days_in_month(2, -8)?, 29);
/// assert!(days_in_month(0, 2015).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn days_in_month(month: u8, year: i32) -> Result<u8, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::range("month", month, 1, 12));
    }
    Ok(days_in_month_unchecked(month, year))
}

/// Like `days_in_month`, but assumes `1 <= month <= 12`.
#[inline]
pub(crate) const fn days_in_month_unchecked(month: u8, year: i32) -> u8 {
    let days = DAYS_IN_MONTH[(month - 1) as usize];
    if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// The calendar fields of a date and time, down to the 100 nanosecond tick.
///
/// A `Components` value is not validated on construction. It is checked
/// when converted into a [`DateTime`](crate::DateTime), which rejects year
/// `0`, months outside `1..=12`, days that don't exist in the month and any
/// time field that is out of range.
///
/// The derived ordering is lexicographic on the fields in declaration
/// order, which is chronological order for valid values.
///
/// # Example
///
/// ```
/// use hnstime::{Components, DateTime};
///
/// let c = Components::new(2015, 1, 8, 23, 1, 59, 0, 12, 9);
/// let dt = DateTime::from_components(c)?;
/// assert_eq!(dt.components()?, c);
/// assert_eq!(dt.to_string(), "+2015-01-08T23:01:59.0000129Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Components {
    /// The year. Never `0` for a valid value.
    pub year: i32,
    /// The month, in the range `1..=12`.
    pub month: u8,
    /// The day of the month, starting at `1`.
    pub day: u8,
    /// The hour, in the range `0..=23`.
    pub hour: u8,
    /// The minute, in the range `0..=59`.
    pub minute: u8,
    /// The second, in the range `0..=59`.
    pub second: u8,
    /// The millisecond, in the range `0..=999`.
    pub millisecond: u16,
    /// The microsecond within the millisecond, in the range `0..=999`.
    pub microsecond: u16,
    /// The hundreds of nanoseconds within the microsecond, in the range
    /// `0..=9`.
    pub hundred_nanosecond: u8,
}

impl Components {
    /// Creates a new set of calendar fields.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        hundred_nanosecond: u8,
    ) -> Components {
        Components {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            hundred_nanosecond,
        }
    }

    /// Creates calendar fields for midnight at the start of the given date.
    #[inline]
    pub const fn date(year: i32, month: u8, day: u8) -> Components {
        Components::new(year, month, day, 0, 0, 0, 0, 0, 0)
    }

    /// Creates calendar fields for the given time on `0001-01-01`.
    #[inline]
    pub const fn time(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        hundred_nanosecond: u8,
    ) -> Components {
        Components::new(
            1,
            1,
            1,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            hundred_nanosecond,
        )
    }

    /// Returns the sub-second part of these fields as a number of ticks in
    /// the range `0..=9_999_999`.
    #[inline]
    pub(crate) const fn subsec_ticks(&self) -> u32 {
        (self.millisecond as u32) * (TICKS_PER_MILLISECOND as u32)
            + (self.microsecond as u32) * (TICKS_PER_MICROSECOND as u32)
            + (self.hundred_nanosecond as u32)
    }

    /// Returns the time of day as the number of ticks since midnight.
    ///
    /// This assumes every time field is in range.
    #[inline]
    pub(crate) const fn time_ticks(&self) -> u64 {
        (self.hour as u64) * TICKS_PER_HOUR
            + (self.minute as u64) * TICKS_PER_MINUTE
            + (self.second as u64) * TICKS_PER_SECOND
            + (self.subsec_ticks() as u64)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Components {
    fn arbitrary(g: &mut quickcheck::Gen) -> Components {
        // Stay one year away from each end so that no generated value is
        // subject to saturation.
        let span = u32::try_from(MAX_COMPONENTS.year - 1).unwrap();
        let magnitude = i32::try_from(1 + u32::arbitrary(g) % span).unwrap();
        let year = if bool::arbitrary(g) { magnitude } else { -magnitude };
        let month = 1 + u8::arbitrary(g) % 12;
        let day = 1 + u8::arbitrary(g) % days_in_month_unchecked(month, year);
        Components::new(
            year,
            month,
            day,
            u8::arbitrary(g) % 24,
            u8::arbitrary(g) % 60,
            u8::arbitrary(g) % 60,
            u16::arbitrary(g) % 1000,
            u16::arbitrary(g) % 1000,
            u8::arbitrary(g) % 10,
        )
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Components>> {
        let c = *self;
        let reduced = [
            Components { hundred_nanosecond: 0, ..c },
            Components { microsecond: 0, hundred_nanosecond: 0, ..c },
            Components::date(c.year, c.month, c.day),
            Components::date(c.year, c.month, 1),
            Components::date(c.year, 1, 1),
        ];
        alloc::boxed::Box::new(
            reduced.into_iter().filter(move |&r| r != c),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        for year in [-2000, -8, -4, 4, 8, 1900, 2000, 2016, 29228] {
            assert!(is_leap_year(year), "{year} should be a leap year");
        }
        for year in [-29227, -5, -3, -2, -1, 1, 2, 3, 5, 1901, 2015] {
            assert!(!is_leap_year(year), "{year} should not be a leap year");
        }
    }

    #[test]
    fn february() {
        for year in -40..=40 {
            if year == 0 {
                continue;
            }
            let expected = if year % 4 == 0 { 29 } else { 28 };
            assert_eq!(days_in_month(2, year).unwrap(), expected, "{year}");
        }
    }

    #[test]
    fn days_in_month_invalid() {
        insta::assert_snapshot!(
            days_in_month(0, 2015).unwrap_err(),
            @"parameter 'month' with value 0 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            days_in_month(13, 2015).unwrap_err(),
            @"parameter 'month' with value 13 is not in the required range of 1..=12",
        );
    }

    #[test]
    fn constants() {
        assert_eq!(TICKS_PER_DAY, 864_000_000_000);
        assert_eq!(TICKS_PER_FOUR_YEARS, 1461 * TICKS_PER_DAY);
        assert_eq!(HALF_VALUE, 9_223_372_036_854_775_808);
    }

    #[test]
    fn components_order_is_chronological() {
        assert!(Components::date(-2, 12, 31) < Components::date(-1, 1, 1));
        assert!(Components::date(-1, 12, 31) < Components::date(1, 1, 1));
        assert!(MIN_COMPONENTS < MAX_COMPONENTS);
        assert!(
            Components::time(23, 59, 59, 999, 999, 9)
                < Components::date(1, 1, 2)
        );
    }

    #[test]
    fn time_ticks() {
        let c = Components::time(23, 1, 59, 0, 12, 9);
        assert_eq!(
            c.time_ticks(),
            23 * TICKS_PER_HOUR
                + TICKS_PER_MINUTE
                + 59 * TICKS_PER_SECOND
                + 129,
        );
    }
}
