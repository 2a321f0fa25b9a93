//! Calendar rules, round trips and saturation at the range bounds.

use hnstime::{
    calendar::{self, MAX_COMPONENTS, MIN_COMPONENTS},
    Components, DateTime, Instant, TimeSpan,
};

use crate::Result;

#[test]
fn leap_years() {
    for year in [4, 8, 1900, 2000, 2016, 29228, -4, -8, -1900, -29228] {
        assert!(calendar::is_leap_year(year), "{year} should be leap");
    }
    for year in [1, 2, 3, 2015, 2017, 29227, -1, -2, -3, -2015] {
        assert!(!calendar::is_leap_year(year), "{year} should not be leap");
    }
}

#[test]
fn february_lengths() -> Result {
    for (year, days) in
        [(-8, 29), (-5, 28), (-4, 29), (-1, 28), (1, 28), (4, 29), (1900, 29)]
    {
        assert_eq!(calendar::days_in_month(2, year)?, days, "{year}");
        let last = DateTime::from_date(year, 2, days)?;
        let next = last.clone() + TimeSpan::from_days(1);
        assert_eq!(next.month()?, 3, "{year}");
        assert_eq!(next.day()?, 1, "{year}");
        assert!(DateTime::from_date(year, 2, days + 1)
            .unwrap_err()
            .is_invalid_argument());
    }
    Ok(())
}

#[test]
fn year_transitions() -> Result {
    let dt = DateTime::from_date(-1, 12, 31)? + TimeSpan::from_days(1);
    assert_eq!(dt.components()?, Components::date(1, 1, 1));
    assert_eq!(dt.instant(), Instant::REFERENCE);

    let dt = DateTime::from_date(1, 1, 1)? - TimeSpan::from_ticks(1);
    assert_eq!(
        dt.components()?,
        Components::new(-1, 12, 31, 23, 59, 59, 999, 999, 9),
    );
    assert!(dt.is_negative());

    let dt = DateTime::from_date(-4, 12, 31)? + TimeSpan::from_days(1);
    assert_eq!(dt.components()?, Components::date(-3, 1, 1));
    Ok(())
}

#[test]
fn numeric_round_trip() -> Result {
    let _ = env_logger::try_init();

    // An arbitrary stride that samples about ten thousand instants spread
    // over the whole range.
    let stride = u64::MAX / 9_973;
    let mut ticks = 1u64;
    loop {
        let dt = DateTime::from_instant(Instant::from_ticks(ticks));
        let c = dt.components()?;
        assert_eq!(DateTime::from_components(c)?, dt, "{c:?}");
        let Some(next) = ticks.checked_add(stride) else { break };
        ticks = next;
    }
    Ok(())
}

#[test]
fn components_round_trip() -> Result {
    let samples = [
        Components::new(2015, 1, 8, 23, 1, 59, 0, 12, 9),
        Components::new(-2015, 12, 31, 0, 0, 0, 999, 999, 9),
        Components::new(4, 2, 29, 12, 30, 30, 500, 0, 0),
        Components::new(-4, 2, 29, 12, 30, 30, 500, 0, 0),
        Components::new(1, 1, 1, 0, 0, 0, 0, 0, 1),
        Components::new(-1, 12, 31, 23, 59, 59, 999, 999, 9),
        MAX_COMPONENTS,
        MIN_COMPONENTS,
    ];
    for c in samples {
        assert_eq!(DateTime::from_components(c)?.components()?, c);
    }
    Ok(())
}

#[test]
fn saturation() -> Result {
    let _ = env_logger::try_init();

    let max = MAX_COMPONENTS;
    let past_max = Components { hundred_nanosecond: 8, ..max };
    assert_eq!(DateTime::from_components(max)?, DateTime::MAX);
    assert_eq!(DateTime::from_components(past_max)?, DateTime::MAX);
    assert_eq!(DateTime::from_date(29229, 1, 1)?, DateTime::MAX);

    let min = MIN_COMPONENTS;
    let past_min = Components { hundred_nanosecond: 2, ..min };
    assert_eq!(DateTime::from_components(min)?, DateTime::MIN);
    assert_eq!(DateTime::from_components(past_min)?, DateTime::MIN);
    assert_eq!(DateTime::from_date(-29229, 1, 1)?, DateTime::MIN);

    let one = TimeSpan::from_ticks(1);
    assert_eq!(DateTime::MAX + one, DateTime::MAX);
    assert_eq!(DateTime::MIN - one, DateTime::MIN);
    assert!(!(DateTime::MIN - TimeSpan::MAX).is_undefined());
    assert_eq!(DateTime::MIN + TimeSpan::MAX, DateTime::MAX);
    Ok(())
}

#[test]
fn invalid_fields() {
    let cases = [
        Components::date(0, 1, 1),
        Components::date(2015, 0, 1),
        Components::date(2015, 13, 1),
        Components::date(2015, 4, 31),
        Components::date(2015, 1, 0),
        Components::new(2015, 1, 1, 24, 0, 0, 0, 0, 0),
        Components::new(2015, 1, 1, 0, 60, 0, 0, 0, 0),
        Components::new(2015, 1, 1, 0, 0, 60, 0, 0, 0),
        Components::new(2015, 1, 1, 0, 0, 0, 1000, 0, 0),
        Components::new(2015, 1, 1, 0, 0, 0, 0, 1000, 0),
        Components::new(2015, 1, 1, 0, 0, 0, 0, 0, 10),
    ];
    for c in cases {
        let err = DateTime::from_components(c).unwrap_err();
        assert!(err.is_invalid_argument(), "{c:?}: {err}");
        assert!(!err.is_invalid_format(), "{c:?}: {err}");
    }
}

#[test]
fn time_spans() -> Result {
    let a = DateTime::from_date(2015, 1, 8)?;
    let b = DateTime::new(2015, 1, 9, 6, 30, 0, 0, 0, 0)?;
    let span = b.clone() - a.clone();
    assert_eq!(span, a.clone() - b.clone());
    assert_eq!(span.total_hours(), 30);
    assert_eq!(span.total_minutes(), 30 * 60 + 30);
    assert_eq!(a.duration_until(&b)?, span);
    assert_eq!(a.checked_add(span)?, b);
    assert_eq!(b.checked_sub(span)?, a);
    Ok(())
}
