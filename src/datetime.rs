use core::cmp::Ordering;

use crate::{
    calendar::{self, Components},
    codec,
    error::{datetime::Error as E, Error},
    fmt::{
        self,
        timestamp::{DateTimeParser, DateTimePrinter},
    },
    instant::Instant,
    span::TimeSpan,
    tz::{Offset, TimeZone},
};

/// A date and time with 100 nanosecond precision, and an optional time zone.
///
/// A `DateTime` is an [`Instant`] in UTC paired with an optional
/// [`TimeZone`]. Calendar fields are always computed in local time, that is,
/// with the offset of the time zone applied. Without a time zone, local time
/// is UTC.
///
/// The calendar fields of a `DateTime` are not stored. Every accessor
/// computes them from the instant, so it's usually better to call
/// [`DateTime::components`] once when more than one field is needed.
///
/// # Undefined
///
/// [`DateTime::UNDEFINED`] is a special value that corresponds to no point
/// in time at all. Every accessor returns an error for it, printing it fails
/// and adding or subtracting a [`TimeSpan`] leaves it undefined. It compares
/// equal only to itself, and is unordered relative to any defined value.
///
/// # Range
///
/// The representable range is `-29228-11-23T21:11:54.5224193` up to
/// `+29228-02-08T02:48:05.4775807`, available as [`DateTime::MIN`] and
/// [`DateTime::MAX`]. Constructing a value outside this range, or doing
/// arithmetic that would leave it, saturates to the nearest end instead of
/// failing.
///
/// # Parsing and printing
///
/// A `DateTime` can be parsed from and printed to the timestamp format
/// described in [`fmt::timestamp`](crate::fmt::timestamp) via its
/// `FromStr` and `Display` trait implementations.
///
/// ```
/// use hnstime::DateTime;
///
/// let dt: DateTime = "2015-01-08T23:01:59.0000129Z".parse()?;
/// assert_eq!(dt.year()?, 2015);
/// assert_eq!(dt.microsecond()?, 12);
/// assert_eq!(dt.hundred_nanosecond()?, 9);
/// assert_eq!(dt.to_string(), "+2015-01-08T23:01:59.0000129Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Equality and ordering
///
/// Two date/times are equal when they refer to the same instant, regardless
/// of their time zones. Ordering is also by instant.
///
/// ```
/// use hnstime::DateTime;
///
/// let a: DateTime = "2015-01-09T04:01:59Z".parse()?;
/// let b: DateTime = "2015-01-08T23:01:59-05:00".parse()?;
/// assert_eq!(a, b);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct DateTime {
    instant: Instant,
    tz: Option<TimeZone>,
}

impl DateTime {
    /// The undefined date/time.
    pub const UNDEFINED: DateTime = DateTime::from_instant(Instant::UNDEFINED);

    /// The earliest representable date/time, in UTC.
    pub const MIN: DateTime = DateTime::from_instant(Instant::MIN);

    /// The latest representable date/time, in UTC.
    pub const MAX: DateTime = DateTime::from_instant(Instant::MAX);

    /// Creates a new date/time in UTC from its calendar fields.
    ///
    /// # Errors
    ///
    /// This returns an error when `year` is `0`, `month` is not in the range
    /// `1..=12`, `day` does not exist in the given month of the given year,
    /// `hour` is greater than `23`, `minute` or `second` are greater than
    /// `59`, `millisecond` or `microsecond` are greater than `999` or
    /// `hundred_nanosecond` is greater than `9`.
    ///
    /// A date/time that is otherwise valid but outside the representable
    /// range is not an error. It saturates to [`DateTime::MIN`] or
    /// [`DateTime::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// let dt = DateTime::new(2015, 1, 8, 23, 1, 59, 0, 12, 9)?;
    /// assert_eq!(dt.to_string(), "+2015-01-08T23:01:59.0000129Z");
    ///
    /// let dt = DateTime::new(29229, 1, 1, 0, 0, 0, 0, 0, 0)?;
    /// assert_eq!(dt, DateTime::MAX);
    ///
    /// assert!(DateTime::new(2015, 1, 8, 24, 0, 0, 0, 0, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        hundred_nanosecond: u8,
    ) -> Result<DateTime, Error> {
        DateTime::from_components(Components::new(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            hundred_nanosecond,
        ))
    }

    /// Creates a new date/time in UTC at midnight at the start of the given
    /// date.
    ///
    /// # Errors
    ///
    /// This returns an error under the same conditions as [`DateTime::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// let dt = DateTime::from_date(-1, 2, 1)?;
    /// assert_eq!(dt.to_string(), "-0000-02-01T00:00:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_date(
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<DateTime, Error> {
        DateTime::from_components(Components::date(year, month, day))
    }

    /// Creates a new date/time in UTC at the given time on `0001-01-01`.
    ///
    /// # Errors
    ///
    /// This returns an error under the same conditions as [`DateTime::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// let dt = DateTime::from_time(23, 1, 0, 0, 0, 0)?;
    /// assert_eq!(dt.to_string(), "+0001-01-01T23:01:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_time(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        hundred_nanosecond: u8,
    ) -> Result<DateTime, Error> {
        DateTime::from_components(Components::time(
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            hundred_nanosecond,
        ))
    }

    /// Creates a new date/time in UTC from calendar fields.
    ///
    /// # Errors
    ///
    /// This returns an error under the same conditions as [`DateTime::new`].
    #[inline]
    pub fn from_components(c: Components) -> Result<DateTime, Error> {
        let instant = codec::encode(&c)?;
        Ok(DateTime::from_instant(instant))
    }

    /// Creates a new date/time from calendar fields in the local time of the
    /// given time zone.
    ///
    /// The offset of the time zone is removed before storing the instant, and
    /// the time zone is attached to the date/time returned. So the calendar
    /// fields of the result are the ones given.
    ///
    /// # Errors
    ///
    /// This returns an error under the same conditions as [`DateTime::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{tz::{Offset, TimeZone}, Components, DateTime};
    ///
    /// let tz = TimeZone::fixed(Offset::constant(-5));
    /// let c = Components::new(2015, 1, 8, 23, 1, 59, 0, 0, 0);
    /// let dt = DateTime::from_local(c, tz)?;
    /// assert_eq!(dt.components()?, c);
    /// assert_eq!(dt.to_utc().to_string(), "+2015-01-09T04:01:59Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_local(c: Components, tz: TimeZone) -> Result<DateTime, Error> {
        let local = codec::encode(&c)?;
        let instant = tz.to_utc(local);
        Ok(DateTime { instant, tz: Some(tz) })
    }

    /// Creates a new date/time in UTC from an instant.
    #[inline]
    pub const fn from_instant(instant: Instant) -> DateTime {
        DateTime { instant, tz: None }
    }

    /// Returns the same instant with the given time zone attached.
    ///
    /// This replaces any time zone previously attached.
    #[inline]
    pub fn with_time_zone(&self, tz: TimeZone) -> DateTime {
        DateTime { instant: self.instant, tz: Some(tz) }
    }

    /// Returns the same instant without any time zone attached.
    #[inline]
    pub fn to_utc(&self) -> DateTime {
        DateTime::from_instant(self.instant)
    }

    /// Returns the instant of this date/time, in UTC.
    #[inline]
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns the time zone attached to this date/time, if any.
    #[inline]
    pub fn time_zone(&self) -> Option<&TimeZone> {
        self.tz.as_ref()
    }

    /// Returns the offset from UTC in effect for this date/time.
    ///
    /// This returns `None` when no time zone is attached or when this
    /// date/time is undefined.
    #[inline]
    pub fn offset(&self) -> Option<Offset> {
        if self.is_undefined() {
            return None;
        }
        self.tz.as_ref().map(|tz| tz.to_offset(self.instant))
    }

    /// Returns true if this is [`DateTime::UNDEFINED`].
    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.instant.is_undefined()
    }

    /// Returns true if this date/time, in local time, is on or after
    /// `0001-01-01T00:00:00`.
    ///
    /// This returns false for an undefined date/time.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.local_instant().is_positive()
    }

    /// Returns true if this date/time, in local time, is before
    /// `0001-01-01T00:00:00`.
    ///
    /// This returns false for an undefined date/time.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.local_instant().is_negative()
    }

    /// Returns the calendar fields of this date/time in local time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{Components, DateTime};
    ///
    /// let dt: DateTime = "-0000-02-01".parse()?;
    /// assert_eq!(dt.components()?, Components::date(-1, 2, 1));
    /// assert!(DateTime::UNDEFINED.components().unwrap_err().is_undefined());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn components(&self) -> Result<Components, Error> {
        self.components_for("components")
    }

    /// Returns the year of this date/time in local time. It is never `0`.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn year(&self) -> Result<i32, Error> {
        self.components_for("year").map(|c| c.year)
    }

    /// Returns the month of this date/time in local time, in the range
    /// `1..=12`.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn month(&self) -> Result<u8, Error> {
        self.components_for("month").map(|c| c.month)
    }

    /// Returns the day of the month of this date/time in local time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn day(&self) -> Result<u8, Error> {
        self.components_for("day").map(|c| c.day)
    }

    /// Returns the hour of this date/time in local time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn hour(&self) -> Result<u8, Error> {
        self.components_for("hour").map(|c| c.hour)
    }

    /// Returns the minute of this date/time in local time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn minute(&self) -> Result<u8, Error> {
        self.components_for("minute").map(|c| c.minute)
    }

    /// Returns the second of this date/time in local time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn second(&self) -> Result<u8, Error> {
        self.components_for("second").map(|c| c.second)
    }

    /// Returns the millisecond of this date/time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn millisecond(&self) -> Result<u16, Error> {
        self.components_for("millisecond").map(|c| c.millisecond)
    }

    /// Returns the microsecond within the millisecond of this date/time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn microsecond(&self) -> Result<u16, Error> {
        self.components_for("microsecond").map(|c| c.microsecond)
    }

    /// Returns the hundreds of nanoseconds within the microsecond of this
    /// date/time.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn hundred_nanosecond(&self) -> Result<u8, Error> {
        self.components_for("hundred-nanosecond")
            .map(|c| c.hundred_nanosecond)
    }

    /// Returns true when the year of this date/time, in local time, is a
    /// leap year.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn is_leap_year(&self) -> Result<bool, Error> {
        self.components_for("leap year")
            .map(|c| calendar::is_leap_year(c.year))
    }

    /// Adds the given span to this date/time, saturating at
    /// [`DateTime::MAX`].
    ///
    /// The time zone, if any, is preserved.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{DateTime, TimeSpan};
    ///
    /// let dt = DateTime::from_date(2015, 12, 31)?;
    /// let next = dt.checked_add(TimeSpan::from_days(1))?;
    /// assert_eq!(next, DateTime::from_date(2016, 1, 1)?);
    /// assert!(DateTime::UNDEFINED.checked_add(TimeSpan::ZERO).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(&self, span: TimeSpan) -> Result<DateTime, Error> {
        if self.is_undefined() {
            return Err(Error::from(E::UndefinedArithmetic));
        }
        Ok(self.with_instant(self.instant.saturating_add(span)))
    }

    /// Subtracts the given span from this date/time, saturating at
    /// [`DateTime::MIN`].
    ///
    /// The time zone, if any, is preserved.
    ///
    /// # Errors
    ///
    /// This returns an error when this date/time is undefined.
    #[inline]
    pub fn checked_sub(&self, span: TimeSpan) -> Result<DateTime, Error> {
        if self.is_undefined() {
            return Err(Error::from(E::UndefinedArithmetic));
        }
        Ok(self.with_instant(self.instant.saturating_sub(span)))
    }

    /// Returns the absolute amount of time between this date/time and the
    /// one given.
    ///
    /// # Errors
    ///
    /// This returns an error when either date/time is undefined.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{DateTime, TimeSpan};
    ///
    /// let a = DateTime::from_date(-1, 12, 31)?;
    /// let b = DateTime::from_date(1, 1, 1)?;
    /// assert_eq!(a.duration_until(&b)?, TimeSpan::from_days(1));
    /// assert_eq!(b.duration_until(&a)?, TimeSpan::from_days(1));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn duration_until(&self, other: &DateTime) -> Result<TimeSpan, Error> {
        if self.is_undefined() || other.is_undefined() {
            return Err(Error::from(E::UndefinedDifference));
        }
        Ok(self.instant.abs_diff(other.instant))
    }

    /// Returns the instant of this date/time in local time.
    ///
    /// This is also the instant given to the offset rule of the time zone
    /// when converting back to UTC.
    pub(crate) fn local_instant(&self) -> Instant {
        match self.tz {
            None => self.instant,
            Some(ref tz) => tz.to_local(self.instant),
        }
    }

    fn components_for(&self, what: &'static str) -> Result<Components, Error> {
        codec::decode(self.local_instant())
            .ok_or_else(|| Error::from(E::UndefinedComponent { what }))
    }

    fn with_instant(&self, instant: Instant) -> DateTime {
        DateTime { instant, tz: self.tz.clone() }
    }
}

impl Default for DateTime {
    /// Returns [`DateTime::UNDEFINED`].
    fn default() -> DateTime {
        DateTime::UNDEFINED
    }
}

impl From<Instant> for DateTime {
    fn from(instant: Instant) -> DateTime {
        DateTime::from_instant(instant)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Prints this date/time in the canonical timestamp format.
///
/// An undefined date/time is printed as `undefined`. Use
/// [`DateTimePrinter::print_datetime`] to get an error instead.
impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static P: DateTimePrinter = DateTimePrinter::new();

        if self.is_undefined() {
            return f.write_str("undefined");
        }
        P.print_datetime(self, fmt::FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        static P: DateTimeParser = DateTimeParser::new();
        P.parse_datetime(s)
    }
}

impl Eq for DateTime {}

impl PartialEq for DateTime {
    #[inline]
    fn eq(&self, rhs: &DateTime) -> bool {
        self.instant == rhs.instant
    }
}

/// Orders date/times by instant.
///
/// An undefined date/time is unordered relative to any defined one, so all of
/// `<`, `<=`, `>` and `>=` are `false` between them. Two undefined
/// date/times are equal.
impl PartialOrd for DateTime {
    #[inline]
    fn partial_cmp(&self, rhs: &DateTime) -> Option<Ordering> {
        match (self.is_undefined(), rhs.is_undefined()) {
            (true, true) => Some(Ordering::Equal),
            (false, false) => Some(self.instant.cmp(&rhs.instant)),
            _ => None,
        }
    }
}

impl core::hash::Hash for DateTime {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

/// Adds a span, saturating at [`DateTime::MAX`]. An undefined date/time
/// stays undefined.
///
/// For an error on undefined operands, see [`DateTime::checked_add`].
impl core::ops::Add<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn add(mut self, rhs: TimeSpan) -> DateTime {
        self += rhs;
        self
    }
}

impl core::ops::AddAssign<TimeSpan> for DateTime {
    #[inline]
    fn add_assign(&mut self, rhs: TimeSpan) {
        self.instant = self.instant.saturating_add(rhs);
    }
}

/// Subtracts a span, saturating at [`DateTime::MIN`]. An undefined date/time
/// stays undefined.
///
/// For an error on undefined operands, see [`DateTime::checked_sub`].
impl core::ops::Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn sub(mut self, rhs: TimeSpan) -> DateTime {
        self -= rhs;
        self
    }
}

impl core::ops::SubAssign<TimeSpan> for DateTime {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeSpan) {
        self.instant = self.instant.saturating_sub(rhs);
    }
}

/// Returns the absolute amount of time between two date/times, or
/// [`TimeSpan::ZERO`] when either is undefined.
///
/// For an error on undefined operands, see [`DateTime::duration_until`].
impl core::ops::Sub for DateTime {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: DateTime) -> TimeSpan {
        &self - &rhs
    }
}

impl<'a> core::ops::Sub<&'a DateTime> for &'a DateTime {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: &'a DateTime) -> TimeSpan {
        self.duration_until(rhs).unwrap_or(TimeSpan::ZERO)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        static P: DateTimePrinter = DateTimePrinter::new();

        let mut buf = alloc::string::String::new();
        P.print_datetime(self, &mut buf).map_err(S::Error::custom)?;
        serializer.serialize_str(&buf)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        use serde::de;

        struct DateTimeVisitor;

        impl<'de> de::Visitor<'de> for DateTimeVisitor {
            type Value = DateTime;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a timestamp string")
            }

            #[inline]
            fn visit_bytes<E: de::Error>(
                self,
                value: &[u8],
            ) -> Result<DateTime, E> {
                static P: DateTimeParser = DateTimeParser::new();
                P.parse_datetime(value).map_err(de::Error::custom)
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<DateTime, E> {
                self.visit_bytes(value.as_bytes())
            }
        }

        deserializer.deserialize_str(DateTimeVisitor)
    }
}
