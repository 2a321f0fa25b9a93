use crate::{calendar::HALF_VALUE, span::TimeSpan};

/// A point in time, represented as a count of 100 nanosecond ticks.
///
/// The tick count [`HALF_VALUE`](crate::calendar::HALF_VALUE) (`2^63`)
/// corresponds to `0001-01-01T00:00:00`, which is available as
/// [`Instant::REFERENCE`]. Tick counts above it are later than that date and
/// tick counts below it are earlier. A tick count of `0` is reserved for
/// [`Instant::UNDEFINED`], so the earliest valid instant is
/// [`Instant::MIN`].
///
/// An `Instant` has no notion of time zones. When it belongs to a
/// [`DateTime`](crate::DateTime), it is always the instant in UTC.
///
/// The `Ord` implementation on this type orders tick counts numerically,
/// which puts `UNDEFINED` before every other instant. Comparisons on
/// [`DateTime`](crate::DateTime) treat undefined values specially.
///
/// # Example
///
/// ```
/// use hnstime::{DateTime, Instant};
///
/// let dt = DateTime::from_instant(Instant::REFERENCE);
/// assert_eq!(dt.to_string(), "+0001-01-01T00:00:00Z");
/// assert_eq!(Instant::REFERENCE.ticks(), 1 << 63);
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    ticks: u64,
}

impl Instant {
    /// The undefined instant. No calendar fields can be computed from it.
    pub const UNDEFINED: Instant = Instant { ticks: 0 };

    /// The earliest representable instant,
    /// `-29228-11-23T21:11:54.5224193` in calendar terms.
    pub const MIN: Instant = Instant { ticks: 1 };

    /// The latest representable instant,
    /// `+29228-02-08T02:48:05.4775807` in calendar terms.
    pub const MAX: Instant = Instant { ticks: u64::MAX };

    /// The instant corresponding to `0001-01-01T00:00:00`.
    pub const REFERENCE: Instant = Instant { ticks: HALF_VALUE };

    /// Creates an instant from a raw tick count.
    ///
    /// A tick count of `0` results in [`Instant::UNDEFINED`].
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Instant {
        Instant { ticks }
    }

    /// Returns the raw tick count of this instant.
    #[inline]
    pub const fn ticks(self) -> u64 {
        self.ticks
    }

    /// Returns true if this is [`Instant::UNDEFINED`].
    #[inline]
    pub const fn is_undefined(self) -> bool {
        self.ticks == 0
    }

    /// Returns true if this instant is defined and strictly before
    /// [`Instant::REFERENCE`].
    #[inline]
    pub const fn is_negative(self) -> bool {
        !self.is_undefined() && self.ticks < HALF_VALUE
    }

    /// Returns true if this instant is on or after [`Instant::REFERENCE`].
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.ticks >= HALF_VALUE
    }

    /// Adds the given span, saturating at [`Instant::MAX`].
    ///
    /// An undefined instant stays undefined.
    #[inline]
    pub(crate) fn saturating_add(self, span: TimeSpan) -> Instant {
        if self.is_undefined() {
            return self;
        }
        Instant::from_ticks(self.ticks.saturating_add(span.ticks()))
    }

    /// Subtracts the given span, saturating at [`Instant::MIN`].
    ///
    /// An undefined instant stays undefined.
    #[inline]
    pub(crate) fn saturating_sub(self, span: TimeSpan) -> Instant {
        if self.is_undefined() {
            return self;
        }
        Instant::from_ticks(self.ticks.saturating_sub(span.ticks()).max(1))
    }

    /// Moves this instant by a signed number of ticks, saturating at either
    /// end of the representable range.
    #[inline]
    pub(crate) fn saturating_shift(self, ticks: i64) -> Instant {
        let span = TimeSpan::from_ticks(ticks.unsigned_abs());
        if ticks < 0 {
            self.saturating_sub(span)
        } else {
            self.saturating_add(span)
        }
    }

    /// Returns the absolute amount of time between two instants.
    #[inline]
    pub(crate) fn abs_diff(self, other: Instant) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks.abs_diff(other.ticks))
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.is_undefined() {
            return f.write_str("Instant(undefined)");
        }
        f.debug_tuple("Instant").field(&self.ticks).finish()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        Instant::from_ticks(u64::arbitrary(g).max(1))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Instant>> {
        // Shrink towards the reference point instead of towards zero, since
        // the latter would just produce ever earlier dates.
        let ticks = self.ticks;
        let toward = if ticks >= HALF_VALUE {
            HALF_VALUE + (ticks - HALF_VALUE) / 2
        } else {
            HALF_VALUE - (HALF_VALUE - ticks) / 2
        };
        if toward == ticks {
            return alloc::boxed::Box::new(core::iter::empty());
        }
        alloc::boxed::Box::new(core::iter::once(Instant::from_ticks(toward)))
    }
}
