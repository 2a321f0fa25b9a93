/*!
Routines for attaching a UTC offset to a [`DateTime`](crate::DateTime).

This crate does not ship a time zone database. A [`TimeZone`] is either a
fixed [`Offset`] or a user supplied [`OffsetRule`] that computes the offset
for any given instant. A `DateTime` always stores its instant in UTC. Its
time zone is used to compute calendar fields in local time, and to print
the offset suffix of a timestamp.

# Example

This shows how to implement a simple rule that switches offsets at a fixed
point in time:

```
use hnstime::{tz::{Offset, OffsetRule, TimeZone}, DateTime, Instant};

#[derive(Debug)]
struct Switch {
    at: Instant,
}

impl OffsetRule for Switch {
    fn offset(&self, instant: Instant) -> Offset {
        if instant < self.at {
            Offset::constant(1)
        } else {
            Offset::constant(2)
        }
    }
}

let at = DateTime::from_date(2015, 6, 1)?.instant();
let tz = TimeZone::new(Switch { at });

let dt = DateTime::from_date(2015, 1, 1)?.with_time_zone(tz.clone());
assert_eq!(dt.to_string(), "+2015-01-01T01:00:00+01:00");
let dt = DateTime::from_date(2015, 7, 1)?.with_time_zone(tz);
assert_eq!(dt.to_string(), "+2015-07-01T02:00:00+02:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::sync::Arc;

use crate::instant::Instant;

pub use self::offset::Offset;

mod offset;

/// Computes the offset from UTC in effect at a given instant.
///
/// The instant given is the one being converted. When a
/// [`DateTime`](crate::DateTime) is built from local calendar fields, this is
/// the naive local instant (the fields encoded as if they were UTC). When
/// calendar fields are computed for a stored date/time, this is the stored
/// UTC instant.
///
/// `Offset` implements this trait by always returning itself.
pub trait OffsetRule: core::fmt::Debug + Send + Sync + 'static {
    /// Returns the offset in effect at the given instant.
    fn offset(&self, instant: Instant) -> Offset;
}

impl OffsetRule for Offset {
    fn offset(&self, _instant: Instant) -> Offset {
        *self
    }
}

/// A shared, immutable handle to the offset rules of a time zone.
///
/// Cloning a `TimeZone` is cheap.
#[derive(Clone)]
pub struct TimeZone {
    kind: TimeZoneKind,
}

#[derive(Clone)]
enum TimeZoneKind {
    Fixed(Offset),
    Rule(Arc<dyn OffsetRule>),
}

impl TimeZone {
    /// The UTC time zone, with an offset of zero at all times.
    pub const UTC: TimeZone = TimeZone::fixed(Offset::UTC);

    /// Creates a time zone that always has the given offset.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{tz::{Offset, TimeZone}, DateTime};
    ///
    /// let tz = TimeZone::fixed(Offset::constant(-5));
    /// let dt = "2015-01-09T04:01:59Z".parse::<DateTime>()?.with_time_zone(tz);
    /// assert_eq!(dt.hour()?, 23);
    /// assert_eq!(dt.to_string(), "+2015-01-08T23:01:59-05:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub const fn fixed(offset: Offset) -> TimeZone {
        TimeZone { kind: TimeZoneKind::Fixed(offset) }
    }

    /// Creates a time zone from an arbitrary offset rule.
    pub fn new<R: OffsetRule>(rule: R) -> TimeZone {
        TimeZone { kind: TimeZoneKind::Rule(Arc::new(rule)) }
    }

    /// Returns the offset in effect at the given instant.
    #[inline]
    pub fn to_offset(&self, instant: Instant) -> Offset {
        match self.kind {
            TimeZoneKind::Fixed(offset) => offset,
            TimeZoneKind::Rule(ref rule) => rule.offset(instant),
        }
    }

    /// Converts a UTC instant to local time in this time zone.
    pub(crate) fn to_local(&self, utc: Instant) -> Instant {
        if utc.is_undefined() {
            return utc;
        }
        let offset = self.to_offset(utc);
        let local = offset.to_local(utc);
        debug!(
            "applied offset {offset} to UTC instant {utc:?} \
             to get local instant {local:?}",
        );
        local
    }

    /// Converts a local instant in this time zone to UTC.
    pub(crate) fn to_utc(&self, local: Instant) -> Instant {
        if local.is_undefined() {
            return local;
        }
        let offset = self.to_offset(local);
        let utc = offset.to_utc(local);
        debug!(
            "removed offset {offset} from local instant {local:?} \
             to get UTC instant {utc:?}",
        );
        utc
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let field: &dyn core::fmt::Debug = match self.kind {
            TimeZoneKind::Fixed(ref offset) => offset,
            TimeZoneKind::Rule(ref rule) => rule,
        };
        f.debug_tuple("TimeZone").field(field).finish()
    }
}

impl From<Offset> for TimeZone {
    fn from(offset: Offset) -> TimeZone {
        TimeZone::fixed(offset)
    }
}
