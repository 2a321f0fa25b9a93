//! Parsing and printing of timestamps through the public API.

use hnstime::{
    fmt::timestamp::{DateTimeParser, DateTimePrinter},
    tz::{Offset, TimeZone},
    Components, DateTime, Instant,
};

use crate::Result;

#[test]
fn literal_cases() -> Result {
    let _ = env_logger::try_init();

    let dt: DateTime = "2015-01-08T23:01:59.0000129Z".parse()?;
    assert_eq!(
        dt.components()?,
        Components::new(2015, 1, 8, 23, 1, 59, 0, 12, 9),
    );
    assert_eq!(dt.to_string(), "+2015-01-08T23:01:59.0000129Z");

    let dt: DateTime = "-0000-02-01".parse()?;
    assert_eq!(dt.components()?, Components::date(-1, 2, 1));
    assert_eq!(dt.to_string(), "-0000-02-01T00:00:00Z");

    let dt: DateTime = "20150108T230159-0500".parse()?;
    assert_eq!(
        dt.components()?,
        Components::new(2015, 1, 9, 4, 1, 59, 0, 0, 0),
    );

    let dt: DateTime = "23:01".parse()?;
    assert_eq!(dt.components()?, Components::time(23, 1, 0, 0, 0, 0));
    assert_eq!(dt.to_string(), "+0001-01-01T23:01:00Z");

    let dt: DateTime = "+29229".parse()?;
    assert_eq!(dt, DateTime::MAX);
    assert_eq!(dt.to_string(), "+29228-02-08T02:48:05.4775807Z");

    // Years far too long for any integer type still saturate.
    let dt: DateTime = "+99999999999999999999-01-01".parse()?;
    assert_eq!(dt, DateTime::MAX);
    let dt: DateTime = "-99999999999999999999-01-01".parse()?;
    assert_eq!(dt, DateTime::MIN);
    Ok(())
}

#[test]
fn text_round_trip() -> Result {
    let _ = env_logger::try_init();

    let stride = u64::MAX / 7_919;
    let mut ticks = 1u64;
    loop {
        let dt = DateTime::from_instant(Instant::from_ticks(ticks));
        let text = dt.to_string();
        assert_eq!(text.parse::<DateTime>()?, dt, "{text}");
        let Some(next) = ticks.checked_add(stride) else { break };
        ticks = next;
    }
    for dt in [DateTime::MIN, DateTime::MAX] {
        assert_eq!(dt.to_string().parse::<DateTime>()?, dt);
    }
    Ok(())
}

#[test]
fn offsets() -> Result {
    let utc: DateTime = "2015-01-09T04:01:59Z".parse()?;
    for text in [
        "2015-01-08T23:01:59-05:00",
        "2015-01-08T23:01:59-05",
        "2015-01-08T23:01:59-0500",
        "20150108T230159-0500",
        "2015-01-09T09:31:59+05:30",
        "2015-01-09t04:01:59z",
    ] {
        assert_eq!(text.parse::<DateTime>()?, utc, "{text}");
    }

    static KEEP: DateTimeParser = DateTimeParser::new().keep_offset(true);
    let dt = KEEP.parse_datetime("2015-01-09T09:31:59+05:30")?;
    assert_eq!(dt, utc);
    assert_eq!(dt.offset(), Some(Offset::new(5, 30)?));
    assert_eq!(dt.to_string(), "+2015-01-09T09:31:59+05:30");
    assert_eq!(dt.to_utc().to_string(), "+2015-01-09T04:01:59Z");

    let dt = utc.with_time_zone(TimeZone::fixed(Offset::new(-25, -59)?));
    assert_eq!(dt.to_string(), "+2015-01-08T02:02:59-25:59");
    assert_eq!(KEEP.parse_datetime(dt.to_string())?.offset(), dt.offset());

    let tz = TimeZone::fixed(Offset::hours(-5)?);
    assert_eq!(
        utc.with_time_zone(tz).to_string(),
        "+2015-01-08T23:01:59-05:00",
    );
    Ok(())
}

#[test]
fn printer() -> Result {
    const PRINTER: DateTimePrinter = DateTimePrinter::new().separator(b' ');

    let dt = DateTime::new(2015, 1, 8, 23, 1, 59, 120, 0, 0)?;
    assert_eq!(PRINTER.datetime_to_string(&dt)?, "+2015-01-08 23:01:59.12Z");

    let mut buf = Vec::new();
    DateTimePrinter::new().print_datetime(&dt, &mut buf)?;
    assert_eq!(buf, b"+2015-01-08T23:01:59.12Z");

    assert!(DateTimePrinter::new()
        .datetime_to_string(&DateTime::UNDEFINED)
        .unwrap_err()
        .is_undefined());
    Ok(())
}

#[test]
fn errors() {
    for text in [
        "",
        " 2015-01-08",
        "2015-01-08\t",
        "2015-01-08T23:01:59.",
        "2015-01-08T23:01:59Zjunk",
        "15-01-08",
        "2015-1-8",
        "2015-01-08T1",
        "2015-01-08T23:01+5",
        "abc",
    ] {
        let err = text.parse::<DateTime>().unwrap_err();
        assert!(err.is_invalid_format(), "{text:?}: {err}");
        assert!(!err.is_invalid_argument(), "{text:?}: {err}");
    }
    for text in [
        "2015-02-29",
        "2015-13-01",
        "0000-02-30",
        "2015-01-08T25:00",
        "2015-01-08T23:60",
        "2015-01-08T23:01+26:00",
    ] {
        let err = text.parse::<DateTime>().unwrap_err();
        assert!(err.is_invalid_argument(), "{text:?}: {err}");
        assert!(!err.is_invalid_format(), "{text:?}: {err}");
    }
}
