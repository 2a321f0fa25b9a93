//! How `DateTime::UNDEFINED` behaves across the API.

use std::collections::HashSet;

use hnstime::{DateTime, Instant, TimeSpan};

#[test]
fn accessors() {
    let dt = DateTime::UNDEFINED;
    assert!(dt.is_undefined());
    assert!(!dt.is_positive());
    assert!(!dt.is_negative());
    assert_eq!(dt.instant(), Instant::UNDEFINED);
    assert_eq!(dt.offset(), None);
    assert!(dt.year().unwrap_err().is_undefined());
    assert!(dt.month().unwrap_err().is_undefined());
    assert!(dt.hundred_nanosecond().unwrap_err().is_undefined());
    assert!(dt.is_leap_year().unwrap_err().is_undefined());
    assert!(dt.components().unwrap_err().is_undefined());
    assert!(DateTime::default().is_undefined());
    assert!(DateTime::from(Instant::UNDEFINED).is_undefined());
}

#[test]
fn comparisons() {
    let undefined = DateTime::UNDEFINED;
    for defined in [DateTime::MIN, DateTime::MAX] {
        assert_ne!(undefined, defined);
        assert_eq!(undefined.partial_cmp(&defined), None);
        assert!(!(undefined < defined));
        assert!(!(undefined <= defined));
        assert!(!(undefined > defined));
        assert!(!(undefined >= defined));
    }
    assert_eq!(undefined, DateTime::UNDEFINED);
    assert!(undefined <= DateTime::UNDEFINED);
    assert!(!(undefined < DateTime::UNDEFINED));
    assert!(DateTime::MIN < DateTime::MAX);

    let set: HashSet<DateTime> =
        [DateTime::UNDEFINED, DateTime::UNDEFINED, DateTime::MIN]
            .into_iter()
            .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn arithmetic() {
    let day = TimeSpan::from_days(1);

    let mut dt = DateTime::UNDEFINED;
    dt += day;
    assert!(dt.is_undefined());
    dt -= day;
    assert!(dt.is_undefined());
    assert!((DateTime::UNDEFINED + TimeSpan::MAX).is_undefined());
    assert!((DateTime::UNDEFINED - TimeSpan::MAX).is_undefined());

    assert!(dt.checked_add(day).unwrap_err().is_undefined());
    assert!(dt.checked_sub(day).unwrap_err().is_undefined());
    assert!(dt.duration_until(&DateTime::MIN).unwrap_err().is_undefined());
    assert!(DateTime::MIN.duration_until(&dt).unwrap_err().is_undefined());
    assert_eq!(DateTime::MAX - DateTime::UNDEFINED, TimeSpan::ZERO);
    assert_eq!(&DateTime::UNDEFINED - &DateTime::MAX, TimeSpan::ZERO);

    // Subtracting never produces an undefined value.
    assert_eq!(DateTime::MIN - day, DateTime::MIN);
}

#[test]
fn printing() {
    assert_eq!(DateTime::UNDEFINED.to_string(), "undefined");
    assert_eq!(format!("{:?}", DateTime::UNDEFINED), "undefined");
}
