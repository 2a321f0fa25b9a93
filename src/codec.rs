/*!
Conversion between calendar fields and tick counts.

An instant is split into a polarity and a magnitude: the number of ticks
between it and `0001-01-01T00:00:00`. Positive magnitudes count forward from
the start of year `1`. Negative magnitudes count backward from the end of
year `-1`.

Years are grouped into runs of four where the *last* year of each run is the
leap year. Counting forward, years `1`, `2` and `3` are common and `4` is
leap. Counting backward, years `-1`, `-2` and `-3` are common and `-4` is
leap. This matches `calendar::is_leap_year` on both sides.
*/

use crate::{
    calendar::{
        self, Components, HALF_VALUE, MAX_COMPONENTS, MIN_COMPONENTS,
        TICKS_PER_COMMON_YEAR, TICKS_PER_DAY, TICKS_PER_FOUR_YEARS,
        TICKS_PER_HOUR, TICKS_PER_LEAP_YEAR, TICKS_PER_MICROSECOND,
        TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
    },
    error::{civil::Error as E, Error},
    instant::Instant,
};

/// Which side of `0001-01-01T00:00:00` an instant falls on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Polarity {
    /// Strictly before the reference date.
    Negative,
    /// On or after the reference date.
    Positive,
}

/// Checks that every field is in range.
///
/// This never checks for saturation. Fields that are individually valid
/// can still be outside the representable range.
pub(crate) fn validate(c: &Components) -> Result<(), Error> {
    if c.year == 0 {
        return Err(Error::from(E::YearZero));
    }
    let days = calendar::days_in_month(c.month, c.year)?;
    if !(1..=days).contains(&c.day) {
        if c.day >= 1 && c.day <= 31 {
            return Err(Error::from(E::DayNotInMonth {
                year: c.year,
                month: c.month,
                day: c.day,
                days,
            }));
        }
        return Err(Error::range("day", c.day, 1, days));
    }
    if c.hour > 23 {
        return Err(Error::range("hour", c.hour, 0, 23));
    }
    if c.minute > 59 {
        return Err(Error::range("minute", c.minute, 0, 59));
    }
    if c.second > 59 {
        return Err(Error::range("second", c.second, 0, 59));
    }
    if c.millisecond > 999 {
        return Err(Error::range("millisecond", c.millisecond, 0, 999));
    }
    if c.microsecond > 999 {
        return Err(Error::range("microsecond", c.microsecond, 0, 999));
    }
    if c.hundred_nanosecond > 9 {
        return Err(Error::range(
            "hundred-nanosecond",
            c.hundred_nanosecond,
            0,
            9,
        ));
    }
    Ok(())
}

/// Converts calendar fields to an instant.
///
/// Fields that are chronologically after `MAX_COMPONENTS` saturate to
/// `Instant::MAX`, and fields before `MIN_COMPONENTS` saturate to
/// `Instant::MIN`. This only fails when a field is out of range.
pub(crate) fn encode(c: &Components) -> Result<Instant, Error> {
    validate(c)?;
    if *c > MAX_COMPONENTS {
        warn!(
            "{c:?} is after the latest representable date/time, \
             saturating to {MAX_COMPONENTS:?}",
        );
        return Ok(Instant::MAX);
    }
    if *c < MIN_COMPONENTS {
        warn!(
            "{c:?} is before the earliest representable date/time, \
             saturating to {MIN_COMPONENTS:?}",
        );
        return Ok(Instant::MIN);
    }

    let years = year_offset(c.year);
    let within = ticks_before_month(c.month, c.year)
        + u64::from(c.day - 1) * TICKS_PER_DAY
        + c.time_ticks();
    // Subtractions can't underflow and additions can't overflow, since the
    // fields are known to be within the representable range. In particular,
    // `years >= within` for negative years because `years` is always at
    // least the length of year `c.year`.
    let ticks = if c.year < 0 {
        HALF_VALUE - (years - within)
    } else {
        HALF_VALUE + years + within
    };
    Ok(Instant::from_ticks(ticks))
}

/// Converts an instant to calendar fields.
///
/// This returns `None` if and only if the instant is undefined.
pub(crate) fn decode(instant: Instant) -> Option<Components> {
    if instant.is_undefined() {
        return None;
    }
    let (polarity, magnitude) = split(instant);
    let (year, mut remaining) = match polarity {
        Polarity::Positive => decode_positive_year(magnitude),
        Polarity::Negative => decode_negative_year(magnitude),
    };

    let mut month = 1;
    loop {
        let days = calendar::days_in_month_unchecked(month, year);
        let ticks = u64::from(days) * TICKS_PER_DAY;
        if remaining < ticks {
            break;
        }
        remaining -= ticks;
        month += 1;
    }

    // Each of these casts is OK because the divisor bounds the result.
    let day = (remaining / TICKS_PER_DAY) as u8 + 1;
    remaining %= TICKS_PER_DAY;
    let hour = (remaining / TICKS_PER_HOUR) as u8;
    remaining %= TICKS_PER_HOUR;
    let minute = (remaining / TICKS_PER_MINUTE) as u8;
    remaining %= TICKS_PER_MINUTE;
    let second = (remaining / TICKS_PER_SECOND) as u8;
    remaining %= TICKS_PER_SECOND;
    let millisecond = (remaining / TICKS_PER_MILLISECOND) as u16;
    remaining %= TICKS_PER_MILLISECOND;
    let microsecond = (remaining / TICKS_PER_MICROSECOND) as u16;
    let hundred_nanosecond = (remaining % TICKS_PER_MICROSECOND) as u8;
    Some(Components::new(
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

/// Splits a defined instant into its polarity and its distance from the
/// reference date.
fn split(instant: Instant) -> (Polarity, u64) {
    let ticks = instant.ticks();
    if ticks >= HALF_VALUE {
        (Polarity::Positive, ticks - HALF_VALUE)
    } else {
        (Polarity::Negative, HALF_VALUE - ticks)
    }
}

/// Returns the year containing the given positive magnitude along with the
/// ticks elapsed since the start of that year.
fn decode_positive_year(magnitude: u64) -> (i32, u64) {
    let groups = magnitude / TICKS_PER_FOUR_YEARS;
    let rem = magnitude % TICKS_PER_FOUR_YEARS;
    // The last year of a group is the leap year, so its final day would
    // otherwise spill into an index of 4.
    let index = (rem / TICKS_PER_COMMON_YEAR).min(3);
    let year = 4 * groups + index + 1;
    // OK because the magnitude is bounded by `u64::MAX - HALF_VALUE`.
    (year as i32, rem - index * TICKS_PER_COMMON_YEAR)
}

/// Returns the year containing the given negative magnitude along with the
/// ticks elapsed since the start of that year.
///
/// A negative magnitude `m` is the instant `m` ticks before the reference
/// date, so the tick at magnitude `1` is the last tick of year `-1`.
fn decode_negative_year(magnitude: u64) -> (i32, u64) {
    let before = magnitude - 1;
    let groups = before / TICKS_PER_FOUR_YEARS;
    let rem = before % TICKS_PER_FOUR_YEARS;
    let index = (rem / TICKS_PER_COMMON_YEAR).min(3);
    let year = 4 * groups + index + 1;
    // The distance between the start of the year and the reference date.
    let start = if index < 3 {
        groups * TICKS_PER_FOUR_YEARS + (index + 1) * TICKS_PER_COMMON_YEAR
    } else {
        (groups + 1) * TICKS_PER_FOUR_YEARS
    };
    // OK because the magnitude is bounded by `HALF_VALUE`.
    (-(year as i32), start - magnitude)
}

/// Returns the distance, in ticks, between the reference date and the
/// start of the given year when `year < 0`, or the end of the year before
/// it when `year > 0`.
fn year_offset(year: i32) -> u64 {
    let abs = u64::from(year.unsigned_abs());
    let ticks = (abs / 4) * TICKS_PER_FOUR_YEARS
        + (abs % 4) * TICKS_PER_COMMON_YEAR;
    if year < 0 {
        return ticks;
    }
    if calendar::is_leap_year(year) {
        ticks - TICKS_PER_LEAP_YEAR
    } else {
        ticks - TICKS_PER_COMMON_YEAR
    }
}

/// Returns the number of ticks in the complete months of the given year that
/// precede the given month.
fn ticks_before_month(month: u8, year: i32) -> u64 {
    (1..month)
        .map(|m| u64::from(calendar::days_in_month_unchecked(m, year)))
        .sum::<u64>()
        * TICKS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_ticks(c: Components) -> u64 {
        encode(&c).unwrap().ticks()
    }

    #[test]
    fn reference() {
        assert_eq!(encode_ticks(Components::date(1, 1, 1)), HALF_VALUE);
        assert_eq!(
            decode(Instant::REFERENCE).unwrap(),
            Components::date(1, 1, 1),
        );
        assert_eq!(
            decode(Instant::from_ticks(HALF_VALUE - 1)).unwrap(),
            Components::new(-1, 12, 31, 23, 59, 59, 999, 999, 9),
        );
        assert_eq!(
            encode_ticks(Components::new(-1, 12, 31, 23, 59, 59, 999, 999, 9)),
            HALF_VALUE - 1,
        );
        assert_eq!(
            encode_ticks(Components::date(-1, 1, 1)),
            HALF_VALUE - TICKS_PER_COMMON_YEAR,
        );
    }

    #[test]
    fn known_values() {
        let c = Components::new(2015, 1, 8, 23, 1, 59, 0, 12, 9);
        assert_eq!(encode_ticks(c) - HALF_VALUE, 635_576_509_190_000_129);
        assert_eq!(
            encode_ticks(Components::date(-1, 2, 1)),
            9_223_083_460_854_775_808,
        );
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(decode(Instant::MAX).unwrap(), MAX_COMPONENTS);
        assert_eq!(decode(Instant::MIN).unwrap(), MIN_COMPONENTS);
        assert_eq!(encode(&MAX_COMPONENTS).unwrap(), Instant::MAX);
        assert_eq!(encode(&MIN_COMPONENTS).unwrap(), Instant::MIN);
        assert_eq!(decode(Instant::UNDEFINED), None);
    }

    #[test]
    fn saturation() {
        let _ = env_logger::try_init();

        let past_max = Components { hundred_nanosecond: 8, ..MAX_COMPONENTS };
        assert_eq!(encode(&past_max).unwrap(), Instant::MAX);
        let past_min = Components { hundred_nanosecond: 2, ..MIN_COMPONENTS };
        assert_eq!(encode(&past_min).unwrap(), Instant::MIN);

        assert_eq!(
            encode(&Components::date(29229, 1, 1)).unwrap(),
            Instant::MAX
        );
        assert_eq!(
            encode(&Components::date(i32::MAX, 12, 31)).unwrap(),
            Instant::MAX
        );
        assert_eq!(
            encode(&Components::date(-29229, 1, 1)).unwrap(),
            Instant::MIN
        );
        assert_eq!(
            encode(&Components::date(i32::MIN, 1, 1)).unwrap(),
            Instant::MIN
        );
    }

    #[test]
    fn leap_years_are_last_in_group() {
        // Year 4 is a leap year and is the fourth year after the reference.
        let feb29 = Components::date(4, 2, 29);
        assert_eq!(decode(encode(&feb29).unwrap()).unwrap(), feb29);
        let jan1 = Components::date(5, 1, 1);
        assert_eq!(
            encode_ticks(jan1) - HALF_VALUE,
            TICKS_PER_FOUR_YEARS,
        );
        // Year -4 is a leap year and is the fourth year before the
        // reference.
        let jan1 = Components::date(-4, 1, 1);
        assert_eq!(
            HALF_VALUE - encode_ticks(jan1),
            TICKS_PER_FOUR_YEARS,
        );
        let feb29 = Components::date(-4, 2, 29);
        assert_eq!(decode(encode(&feb29).unwrap()).unwrap(), feb29);
        // The last tick of year -5 immediately precedes year -4.
        let end = Components::new(-5, 12, 31, 23, 59, 59, 999, 999, 9);
        assert_eq!(encode_ticks(end) + 1, encode_ticks(jan1));
    }

    #[test]
    fn month_ends() {
        for year in [-29227, -8, -5, -1, 1, 4, 1900, 2015, 29227] {
            for month in 1..=12 {
                let days = calendar::days_in_month_unchecked(month, year);
                let last = Components::new(
                    year, month, days, 23, 59, 59, 999, 999, 9,
                );
                let instant = encode(&last).unwrap();
                assert_eq!(decode(instant).unwrap(), last);
                let next = decode(Instant::from_ticks(instant.ticks() + 1))
                    .unwrap();
                assert_eq!(next.day, 1, "{last:?}");
                assert_eq!(next.hour, 0, "{last:?}");
            }
        }
    }

    #[test]
    fn invalid_fields() {
        let check = |c: Components| validate(&c).unwrap_err();

        insta::assert_snapshot!(
            check(Components::date(0, 1, 1)),
            @"year 0 does not exist, year 1 is directly preceded by -1",
        );
        insta::assert_snapshot!(
            check(Components::date(2015, 13, 1)),
            @"parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            check(Components::date(2015, 2, 29)),
            @"day 29 does not exist in month 2 of year 2015, which has 28 days",
        );
        insta::assert_snapshot!(
            check(Components::date(2015, 2, 0)),
            @"parameter 'day' with value 0 is not in the required range of 1..=28",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 24, 0, 0, 0, 0, 0)),
            @"parameter 'hour' with value 24 is not in the required range of 0..=23",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 0, 60, 0, 0, 0, 0)),
            @"parameter 'minute' with value 60 is not in the required range of 0..=59",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 0, 0, 60, 0, 0, 0)),
            @"parameter 'second' with value 60 is not in the required range of 0..=59",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 0, 0, 0, 1000, 0, 0)),
            @"parameter 'millisecond' with value 1000 is not in the required range of 0..=999",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 0, 0, 0, 0, 1000, 0)),
            @"parameter 'microsecond' with value 1000 is not in the required range of 0..=999",
        );
        insta::assert_snapshot!(
            check(Components::new(2015, 1, 1, 0, 0, 0, 0, 0, 10)),
            @"parameter 'hundred-nanosecond' with value 10 is not in the required range of 0..=9",
        );
        assert!(check(Components::date(0, 1, 1)).is_invalid_argument());
        assert!(check(Components::date(2015, 2, 29)).is_invalid_argument());
    }

    quickcheck::quickcheck! {
        fn prop_encode_then_decode(c: Components) -> bool {
            decode(encode(&c).unwrap()) == Some(c)
        }

        fn prop_decode_then_encode(instant: Instant) -> bool {
            let c = decode(instant).unwrap();
            encode(&c).unwrap() == instant
        }

        fn prop_encode_is_monotonic(a: Components, b: Components) -> bool {
            let (ia, ib) = (encode(&a).unwrap(), encode(&b).unwrap());
            a.cmp(&b) == ia.cmp(&ib)
        }
    }
}
