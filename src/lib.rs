/*!
A calendar engine with 100 nanosecond precision, built on a single `u64`.

A point in time in this crate is an [`Instant`]: a count of 100 nanosecond
ticks where `2^63` is `0001-01-01T00:00:00` (the
[`REFERENCE`](Instant::REFERENCE) instant). This gives about 29,228 years on
either side of the reference date, from November 23 of the year `-29228` to
`+29228-02-08T02:48:05.4775807`. A count of `0` is reserved as
[`Instant::UNDEFINED`]. Since there is no year `0`, negative years are
printed shifted by one, so the earliest instant is printed as
`-29227-11-23T21:11:54.5224193Z`.

A [`DateTime`] pairs an instant with an optional [time zone](tz::TimeZone)
and maps it to and from calendar fields ([`Components`]). It can be parsed
from, and printed to, a permissive [ISO 8601-like
format](fmt::timestamp).

# The calendar

This crate uses its own proleptic calendar. It has twelve months of the usual
lengths and no year `0`: year `-1` directly precedes year `1`. A year is a
leap year when it is divisible by 4, with no century exceptions, so
`1900` is a leap year. On both sides of the reference date, years are grouped
into runs of four where the fourth year is the leap year. See the
[`calendar`] module for details.

Values beyond either end of the representable range are never an error. They
saturate to [`DateTime::MIN`] or [`DateTime::MAX`].

# Example

```
use hnstime::{tz::{Offset, TimeZone}, DateTime, TimeSpan};

let dt: DateTime = "2015-01-08T23:01:59.0000129Z".parse()?;
assert_eq!(dt.year()?, 2015);
assert_eq!(dt.instant().ticks(), 9_858_948_546_044_775_937);

let later = dt.clone() + TimeSpan::from_hours(1);
assert_eq!(later.to_string(), "+2015-01-09T00:01:59.0000129Z");
assert_eq!((later - dt).total_minutes(), 60);

let tz = TimeZone::fixed(Offset::constant(-5));
let dt = "20150108T230159-0500".parse::<DateTime>()?.with_time_zone(tz);
assert_eq!(dt.to_string(), "+2015-01-08T23:01:59-05:00");
assert_eq!(dt.to_utc().to_string(), "+2015-01-09T04:01:59Z");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Undefined

[`DateTime::UNDEFINED`] corresponds to no point in time. It is what
`DateTime::default()` returns. Accessing its fields or printing it returns an
error, arithmetic leaves it undefined and it is unordered relative to every
defined date/time:

```
use hnstime::{DateTime, TimeSpan};

let undefined = DateTime::UNDEFINED;
assert!(undefined.year().unwrap_err().is_undefined());
assert!((undefined.clone() + TimeSpan::from_days(1)).is_undefined());
assert!(!(undefined < DateTime::MIN) && !(undefined > DateTime::MIN));
assert_eq!(undefined.to_string(), "undefined");
```

# Crate features

* **std** (enabled by default) -
  When enabled, this implements `std::error::Error` for `Error` and enables
  the [`fmt::StdWrite`] adapter.
* **alloc** (enabled by default via `std`) -
  Required. Errors and time zone rules are heap allocated.
* **logging** -
  When enabled, the `log` crate is used to emit messages about range
  saturation, parser branch selection and offset application. This is
  mostly useful for debugging.
* **serde** -
  Enables `Serialize` and `Deserialize` implementations for [`DateTime`] (as
  a timestamp string), along with the helpers in [`fmt::serde`] for using
  the raw tick count instead.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
// No clue why this thing is still unstable because it's pretty amazing. This
// adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and time zone rules are heap allocated, so there is no core-only
// mode.
extern crate alloc;

pub use crate::{
    calendar::Components, datetime::DateTime, error::Error,
    instant::Instant, span::TimeSpan,
};

#[macro_use]
mod logging;

pub mod calendar;
mod codec;
mod datetime;
mod error;
pub mod fmt;
mod instant;
mod span;
pub mod tz;
mod util;

#[cfg(test)]
mod tests {
    use crate::tz::{Offset, OffsetRule};

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn send_sync() {
        assert_send_sync::<Components>();
        assert_send_sync::<DateTime>();
        assert_send_sync::<Error>();
        assert_send_sync::<Instant>();
        assert_send_sync::<Offset>();
        assert_send_sync::<TimeSpan>();
        assert_send_sync::<tz::TimeZone>();
        assert_send_sync::<alloc::sync::Arc<dyn OffsetRule>>();
    }

    #[test]
    fn sizes() {
        assert_eq!(core::mem::size_of::<Instant>(), 8);
        assert_eq!(core::mem::size_of::<TimeSpan>(), 8);
    }
}
