/*!
This module provides helpers to use with [Serde].

The helpers are exposed as modules meant to be used with
Serde's [`with` attribute].

By default, a [`DateTime`](crate::DateTime) is (de)serialized as a timestamp
string, e.g., `+2015-01-08T23:01:59.0000129Z`. The helpers here instead
(de)serialize it as its raw tick count, that is, the `u64` returned by
[`Instant::ticks`](crate::Instant::ticks).

# Module hierarchy

Only the leaves of the tree are usable with Serde's `with` attribute.

* [`ticks`]
    * [`hnstime::fmt::serde::ticks::required`](self::ticks::required)
    * [`hnstime::fmt::serde::ticks::optional`](self::ticks::optional)

# Time zones

Only the instant is serialized. The time zone of a `DateTime`, if any, is
lost, and a deserialized `DateTime` never has a time zone. A tick count of
`0` is [`DateTime::UNDEFINED`](crate::DateTime::UNDEFINED).

# Example

```
use hnstime::DateTime;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "hnstime::fmt::serde::ticks::required")]
    at: DateTime,
}

let json = r#"{"at":9858948546044775937}"#;
let got: Record = serde_json::from_str(&json)?;
assert_eq!(got.at, "2015-01-08T23:01:59.0000129Z".parse::<DateTime>()?);
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Example: optional support

```
use hnstime::DateTime;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "hnstime::fmt::serde::ticks::optional")]
    at: Option<DateTime>,
}

let json = r#"{"at":null}"#;
let got: Record = serde_json::from_str(&json)?;
assert_eq!(got.at, None);
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[Serde]: https://serde.rs/
[`with` attribute]: https://serde.rs/field-attrs.html#with
*/

/// (De)serialize a [`DateTime`](crate::DateTime) as an unsigned integer
/// number of 100 nanosecond ticks.
pub mod ticks {
    use serde::de;

    struct Visitor;

    impl<'de> de::Visitor<'de> for Visitor {
        type Value = crate::DateTime;

        fn expecting(
            &self,
            f: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
            f.write_str("an unsigned integer number of 100 nanosecond ticks")
        }

        #[inline]
        fn visit_u8<E: de::Error>(
            self,
            v: u8,
        ) -> Result<crate::DateTime, E> {
            self.visit_u64(u64::from(v))
        }

        #[inline]
        fn visit_u16<E: de::Error>(
            self,
            v: u16,
        ) -> Result<crate::DateTime, E> {
            self.visit_u64(u64::from(v))
        }

        #[inline]
        fn visit_u32<E: de::Error>(
            self,
            v: u32,
        ) -> Result<crate::DateTime, E> {
            self.visit_u64(u64::from(v))
        }

        #[inline]
        fn visit_u64<E: de::Error>(
            self,
            v: u64,
        ) -> Result<crate::DateTime, E> {
            Ok(crate::DateTime::from_instant(crate::Instant::from_ticks(v)))
        }

        #[inline]
        fn visit_i64<E: de::Error>(
            self,
            v: i64,
        ) -> Result<crate::DateTime, E> {
            let v = u64::try_from(v).map_err(|_| {
                de::Error::custom(alloc::format!(
                    "got negative integer {v} ticks, \
                     but tick counts are never negative",
                ))
            })?;
            self.visit_u64(v)
        }

        #[inline]
        fn visit_u128<E: de::Error>(
            self,
            v: u128,
        ) -> Result<crate::DateTime, E> {
            let v = u64::try_from(v).map_err(|_| {
                de::Error::custom(alloc::format!(
                    "got unsigned integer {v} ticks, \
                     which is too big to fit in a `DateTime`",
                ))
            })?;
            self.visit_u64(v)
        }

        #[inline]
        fn visit_i128<E: de::Error>(
            self,
            v: i128,
        ) -> Result<crate::DateTime, E> {
            let v = u64::try_from(v).map_err(|_| {
                de::Error::custom(alloc::format!(
                    "got signed integer {v} ticks, \
                     which is not a valid `DateTime` tick count",
                ))
            })?;
            self.visit_u64(v)
        }
    }

    /// A visitor for `Option<DateTime>`.
    struct OptionalVisitor;

    impl<'de> de::Visitor<'de> for OptionalVisitor {
        type Value = Option<crate::DateTime>;

        fn expecting(
            &self,
            f: &mut core::fmt::Formatter,
        ) -> core::fmt::Result {
            f.write_str(
                "an unsigned integer number of 100 nanosecond ticks or `None`",
            )
        }

        #[inline]
        fn visit_some<D: de::Deserializer<'de>>(
            self,
            de: D,
        ) -> Result<Option<crate::DateTime>, D::Error> {
            de.deserialize_u64(Visitor).map(Some)
        }

        #[inline]
        fn visit_none<E: de::Error>(
            self,
        ) -> Result<Option<crate::DateTime>, E> {
            Ok(None)
        }
    }

    /// (De)serialize a required number of ticks.
    pub mod required {
        /// Serialize a required number of ticks.
        #[inline]
        pub fn serialize<S: serde::Serializer>(
            dt: &crate::DateTime,
            se: S,
        ) -> Result<S::Ok, S::Error> {
            se.serialize_u64(dt.instant().ticks())
        }

        /// Deserialize a required number of ticks.
        #[inline]
        pub fn deserialize<'de, D: serde::Deserializer<'de>>(
            de: D,
        ) -> Result<crate::DateTime, D::Error> {
            de.deserialize_u64(super::Visitor)
        }
    }

    /// (De)serialize an optional number of ticks.
    pub mod optional {
        /// Serialize an optional number of ticks.
        #[inline]
        pub fn serialize<S: serde::Serializer>(
            dt: &Option<crate::DateTime>,
            se: S,
        ) -> Result<S::Ok, S::Error> {
            match *dt {
                None => se.serialize_none(),
                Some(ref dt) => se.serialize_u64(dt.instant().ticks()),
            }
        }

        /// Deserialize an optional number of ticks.
        #[inline]
        pub fn deserialize<'de, D: serde::Deserializer<'de>>(
            de: D,
        ) -> Result<Option<crate::DateTime>, D::Error> {
            de.deserialize_option(super::OptionalVisitor)
        }
    }
}
