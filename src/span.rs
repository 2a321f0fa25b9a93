use crate::calendar::{
    TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MICROSECOND,
    TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

/// An unsigned amount of elapsed time, in ticks of 100 nanoseconds.
///
/// A `TimeSpan` is what gets added to or subtracted from a
/// [`DateTime`](crate::DateTime), and it is what is returned when
/// subtracting two date/times from one another.
///
/// All arithmetic on a `TimeSpan` saturates. Adding never wraps past
/// [`TimeSpan::MAX`] and subtracting never goes below [`TimeSpan::ZERO`].
///
/// # Example
///
/// ```
/// use hnstime::TimeSpan;
///
/// let span = TimeSpan::from_hours(5) + TimeSpan::from_minutes(30);
/// assert_eq!(span.total_minutes(), 330);
/// assert_eq!(span.total_hours(), 5);
/// let negative = TimeSpan::from_seconds(1) - TimeSpan::from_days(1);
/// assert_eq!(negative, TimeSpan::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeSpan {
    ticks: u64,
}

impl TimeSpan {
    /// A span of no time at all.
    pub const ZERO: TimeSpan = TimeSpan { ticks: 0 };

    /// The largest possible span.
    pub const MAX: TimeSpan = TimeSpan { ticks: u64::MAX };

    /// Creates a span from a number of 100 nanosecond ticks.
    #[inline]
    pub const fn from_ticks(ticks: u64) -> TimeSpan {
        TimeSpan { ticks }
    }

    /// Creates a span of the given number of days, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_days(days: u64) -> TimeSpan {
        TimeSpan::from_ticks(days.saturating_mul(TICKS_PER_DAY))
    }

    /// Creates a span of the given number of hours, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_hours(hours: u64) -> TimeSpan {
        TimeSpan::from_ticks(hours.saturating_mul(TICKS_PER_HOUR))
    }

    /// Creates a span of the given number of minutes, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_minutes(minutes: u64) -> TimeSpan {
        TimeSpan::from_ticks(minutes.saturating_mul(TICKS_PER_MINUTE))
    }

    /// Creates a span of the given number of seconds, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_seconds(seconds: u64) -> TimeSpan {
        TimeSpan::from_ticks(seconds.saturating_mul(TICKS_PER_SECOND))
    }

    /// Creates a span of the given number of milliseconds, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_milliseconds(milliseconds: u64) -> TimeSpan {
        TimeSpan::from_ticks(milliseconds.saturating_mul(TICKS_PER_MILLISECOND))
    }

    /// Creates a span of the given number of microseconds, saturating at
    /// [`TimeSpan::MAX`].
    #[inline]
    pub const fn from_microseconds(microseconds: u64) -> TimeSpan {
        TimeSpan::from_ticks(microseconds.saturating_mul(TICKS_PER_MICROSECOND))
    }

    /// Returns the number of 100 nanosecond ticks in this span.
    #[inline]
    pub const fn ticks(self) -> u64 {
        self.ticks
    }

    /// Returns the number of whole hours in this span.
    #[inline]
    pub const fn total_hours(self) -> u64 {
        self.ticks / TICKS_PER_HOUR
    }

    /// Returns the number of whole minutes in this span.
    #[inline]
    pub const fn total_minutes(self) -> u64 {
        self.ticks / TICKS_PER_MINUTE
    }

    /// Returns true if this span is empty.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.ticks == 0
    }

    /// Adds two spans together, saturating at [`TimeSpan::MAX`].
    #[inline]
    pub const fn saturating_add(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks.saturating_add(rhs.ticks))
    }

    /// Subtracts `rhs` from this span, saturating at [`TimeSpan::ZERO`].
    #[inline]
    pub const fn saturating_sub(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks.saturating_sub(rhs.ticks))
    }
}

impl core::ops::Add for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn add(self, rhs: TimeSpan) -> TimeSpan {
        self.saturating_add(rhs)
    }
}

impl core::ops::AddAssign for TimeSpan {
    #[inline]
    fn add_assign(&mut self, rhs: TimeSpan) {
        *self = *self + rhs;
    }
}

impl core::ops::Sub for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        self.saturating_sub(rhs)
    }
}

impl core::ops::SubAssign for TimeSpan {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeSpan) {
        *self = *self - rhs;
    }
}

impl From<core::time::Duration> for TimeSpan {
    /// Converts a standard duration to a span, truncating anything finer
    /// than 100 nanoseconds and saturating at [`TimeSpan::MAX`].
    fn from(duration: core::time::Duration) -> TimeSpan {
        let ticks = duration.as_nanos() / 100;
        TimeSpan::from_ticks(u64::try_from(ticks).unwrap_or(u64::MAX))
    }
}

impl From<TimeSpan> for core::time::Duration {
    fn from(span: TimeSpan) -> core::time::Duration {
        let secs = span.ticks / TICKS_PER_SECOND;
        let nanos = (span.ticks % TICKS_PER_SECOND) * 100;
        // OK because `nanos` is always less than 1_000_000_000.
        core::time::Duration::new(secs, nanos as u32)
    }
}
