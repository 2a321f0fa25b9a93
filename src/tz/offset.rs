use crate::{
    calendar::TICKS_PER_SECOND, error::Error, instant::Instant,
    span::TimeSpan,
};

/// The largest magnitude of an offset in hours.
const MAX_HOURS: i8 = 25;
/// The largest magnitude of an offset in minutes, i.e., `25:59`.
const MAX_MINUTES: i16 = 1_559;

/// A signed offset from UTC, with a precision of one minute.
///
/// Positive offsets correspond to time zones east of the prime meridian,
/// while negative offsets correspond to time zones west of it. In all cases,
/// `local time - offset = UTC`.
///
/// Offsets are limited to the range `-25:59..=25:59`. Every offset can be
/// written as `±hh:mm`, which is the form used by the timestamp format.
///
/// # Example
///
/// ```
/// use hnstime::tz::Offset;
///
/// let offset = Offset::new(-5, 0)?;
/// assert!(offset.is_negative());
/// assert_eq!(offset.to_string(), "-05:00");
///
/// let offset = Offset::new(0, -30)?;
/// assert_eq!(offset.seconds(), -1800);
/// assert_eq!(offset.to_string(), "-00:30");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// The minimum possible offset, `-25:59`.
    pub const MIN: Offset = Offset { seconds: -(MAX_MINUTES as i32) * 60 };

    /// The maximum possible offset, `+25:59`.
    pub const MAX: Offset = Offset { seconds: (MAX_MINUTES as i32) * 60 };

    /// The offset of UTC, which is zero.
    pub const UTC: Offset = Offset { seconds: 0 };

    /// Creates an offset in a `const` context from a number of hours.
    ///
    /// The fallible non-const version of this constructor is
    /// [`Offset::hours`].
    ///
    /// # Panics
    ///
    /// This panics when `hours` is not in the range `-25..=25`.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::tz::Offset;
    ///
    /// const EST: Offset = Offset::constant(-5);
    /// assert_eq!(EST.seconds(), -18_000);
    /// ```
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        if hours < -MAX_HOURS || hours > MAX_HOURS {
            panic!("invalid time zone offset hours")
        }
        Offset { seconds: (hours as i32) * 60 * 60 }
    }

    /// Creates an offset from a number of hours.
    ///
    /// # Errors
    ///
    /// This returns an error when `hours` is not in the range `-25..=25`.
    #[inline]
    pub fn hours(hours: i8) -> Result<Offset, Error> {
        Offset::new(hours, 0)
    }

    /// Creates an offset from a number of hours and minutes.
    ///
    /// Both parts carry the sign of the offset. When `hours` is zero, the
    /// sign of `minutes` alone determines the sign of the offset. So `-00:30`
    /// is `Offset::new(0, -30)` and `-05:30` is `Offset::new(-5, -30)`.
    ///
    /// # Errors
    ///
    /// This returns an error when `hours` is not in the range `-25..=25`,
    /// when `minutes` is not in the range `-59..=59` or when `minutes` has a
    /// sign opposite to `hours`.
    pub fn new(hours: i8, minutes: i8) -> Result<Offset, Error> {
        if !(-MAX_HOURS..=MAX_HOURS).contains(&hours) {
            return Err(Error::range(
                "offset-hours",
                hours,
                -MAX_HOURS,
                MAX_HOURS,
            ));
        }
        let (min, max) = match hours.signum() {
            1 => (0, 59),
            -1 => (-59, 0),
            _ => (-59, 59),
        };
        if !(min..=max).contains(&minutes) {
            return Err(Error::range("offset-minutes", minutes, min, max));
        }
        let seconds = i32::from(hours) * 3600 + i32::from(minutes) * 60;
        Ok(Offset { seconds })
    }

    /// Creates an offset from a signed number of minutes.
    ///
    /// # Errors
    ///
    /// This returns an error when `minutes` is not in the range
    /// `-1_559..=1_559`.
    pub fn from_minutes(minutes: i16) -> Result<Offset, Error> {
        if !(-MAX_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(Error::range(
                "offset-total-minutes",
                minutes,
                -MAX_MINUTES,
                MAX_MINUTES,
            ));
        }
        Ok(Offset { seconds: i32::from(minutes) * 60 })
    }

    /// Returns the total number of seconds in this offset.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the signed number of 100 nanosecond ticks in this offset.
    #[inline]
    pub const fn ticks(self) -> i64 {
        (self.seconds as i64) * (TICKS_PER_SECOND as i64)
    }

    /// Returns true if this offset is west of UTC.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Returns the absolute length of this offset.
    #[inline]
    pub const fn magnitude(self) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks().unsigned_abs())
    }

    /// Returns the signed hours part of this offset.
    #[inline]
    pub const fn part_hours(self) -> i8 {
        (self.seconds / 3600) as i8
    }

    /// Returns the signed minutes part of this offset, in the range
    /// `-59..=59`.
    #[inline]
    pub const fn part_minutes(self) -> i8 {
        ((self.seconds / 60) % 60) as i8
    }

    /// Converts a UTC instant to local time in this offset.
    #[inline]
    pub(crate) fn to_local(self, utc: Instant) -> Instant {
        utc.saturating_shift(self.ticks())
    }

    /// Converts a local instant in this offset to UTC.
    #[inline]
    pub(crate) fn to_utc(self, local: Instant) -> Instant {
        local.saturating_shift(-self.ticks())
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({})", self)
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "+" };
        let hours = self.part_hours().unsigned_abs();
        let minutes = self.part_minutes().unsigned_abs();
        write!(f, "{sign}{hours:02}:{minutes:02}")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn construct() {
        assert_eq!(Offset::constant(-5).seconds(), -18_000);
        assert_eq!(Offset::hours(5).unwrap().seconds(), 18_000);
        assert_eq!(Offset::new(5, 30).unwrap().seconds(), 19_800);
        assert_eq!(Offset::new(-5, -30).unwrap().seconds(), -19_800);
        assert_eq!(Offset::new(0, -30).unwrap().seconds(), -1_800);
        assert_eq!(Offset::from_minutes(-1_559).unwrap(), Offset::MIN);
        assert_eq!(Offset::from_minutes(1_559).unwrap(), Offset::MAX);
        assert_eq!(Offset::new(25, 59).unwrap(), Offset::MAX);
    }

    #[test]
    fn construct_invalid() {
        insta::assert_snapshot!(
            Offset::hours(26).unwrap_err(),
            @"parameter 'offset-hours' with value 26 is not in the required range of -25..=25",
        );
        insta::assert_snapshot!(
            Offset::new(5, -30).unwrap_err(),
            @"parameter 'offset-minutes' with value -30 is not in the required range of 0..=59",
        );
        insta::assert_snapshot!(
            Offset::new(-5, 60).unwrap_err(),
            @"parameter 'offset-minutes' with value 60 is not in the required range of -59..=0",
        );
        insta::assert_snapshot!(
            Offset::from_minutes(1_560).unwrap_err(),
            @"parameter 'offset-total-minutes' with value 1560 is not in the required range of -1559..=1559",
        );
    }

    #[test]
    fn parts() {
        let offset = Offset::from_minutes(-(5 * 60 + 30)).unwrap();
        assert_eq!(offset.part_hours(), -5);
        assert_eq!(offset.part_minutes(), -30);
        assert_eq!(
            offset.magnitude().ticks(),
            (5 * 3600 + 30 * 60) * TICKS_PER_SECOND
        );
    }

    #[test]
    fn display() {
        assert_eq!(Offset::UTC.to_string(), "+00:00");
        assert_eq!(Offset::constant(9).to_string(), "+09:00");
        assert_eq!(Offset::new(-3, -30).unwrap().to_string(), "-03:30");
        let offset = Offset::from_minutes(-1).unwrap();
        assert_eq!(offset.to_string(), "-00:01");
    }

    #[test]
    fn local_and_utc() {
        let offset = Offset::constant(-5);
        let utc = Instant::REFERENCE;
        let local = offset.to_local(utc);
        assert_eq!(utc.ticks() - local.ticks(), 5 * 3600 * TICKS_PER_SECOND);
        assert_eq!(offset.to_utc(local), utc);
    }
}
