/*!
A permissive timestamp format derived from [ISO 8601].

The printer always writes the extended form with a sign, a full date, a full
time, an optional fraction and either `Z` or a numeric offset:

```text
+2015-01-08T23:01:59.0000129Z
-0000-02-01T00:00:00Z
+2015-01-08T23:01:59-05:00
```

The parser accepts that format and a number of reduced forms. Which form is
parsed depends on the whole input:

* Input containing `T` is a date and a time. The date is
`[+-]YYYY[Y...]-MM-DD` or `[+-]YYYY[Y...]MMDD`, the time is
`hh[[:]mm[[:]ss[.fraction]]]` and the optional suffix is `Z` or
`[+-]hh[[:]mm]`.
* Otherwise, input starting with `+` or `-` is a date. With separators, it is
`YYYY[Y...]-MM[-DD]`. Without separators, the number of digits decides the
fields present: at most 5 digits is a year, 6 or 7 digits is a year and a
month and 8 or more digits is a year, a month and a day.
* Otherwise, input containing at least two `-` is a date, which must be
complete.
* Everything else is a time, with the same optional suffix as above. Time-only
values are placed on `0001-01-01`. Applying their offset wraps around within
that day.

Missing fields default to their smallest value. In all forms, years need at
least four digits. Either `.` or `,` may start a fraction, and digits finer
than 100 nanoseconds are ignored. An hour of `24` is treated as hour `0` of
the same day. Whitespace is never allowed.

Years are numbered astronomically in text: `0000` is the year before `0001`,
which is year `-1` as a calendar field, and `-0001` is year `-2`.

Values outside the representable range saturate to
[`DateTime::MIN`] or [`DateTime::MAX`] instead of failing.

# Example

```
use hnstime::{fmt::timestamp::DateTimeParser, DateTime};

static PARSER: DateTimeParser = DateTimeParser::new();

let dt = PARSER.parse_datetime("20150108T230159-0500")?;
assert_eq!(dt.to_string(), "+2015-01-09T04:01:59Z");

let dt = PARSER.parse_datetime("-0000-02-01")?;
assert_eq!(dt.year()?, -1);

let dt = PARSER.parse_datetime("23:01")?;
assert_eq!(dt.to_string(), "+0001-01-01T23:01:00Z");

assert_eq!(PARSER.parse_datetime("+29229")?, DateTime::MAX);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[ISO 8601]: https://www.iso.org/iso-8601-date-and-time-format.html
*/

use crate::{datetime::DateTime, error::Error, fmt::Write};

mod parser;
mod printer;

/// A parser for timestamps.
///
/// See the [module documentation](self) for the accepted grammar.
///
/// The `FromStr` implementation on [`DateTime`] uses this parser with its
/// default configuration. This type can be used directly to parse from
/// arbitrary bytes, or to keep the offset of the parsed text.
///
/// # Example
///
/// ```
/// use hnstime::fmt::timestamp::DateTimeParser;
///
/// static PARSER: DateTimeParser = DateTimeParser::new().keep_offset(true);
///
/// let dt = PARSER.parse_datetime(b"2015-01-08T23:01:59-05:00")?;
/// assert_eq!(dt.hour()?, 23);
/// assert_eq!(dt.to_string(), "+2015-01-08T23:01:59-05:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DateTimeParser {
    p: parser::DateTimeParser,
    keep_offset: bool,
}

impl DateTimeParser {
    /// Create a new timestamp parser with the default configuration.
    #[inline]
    pub const fn new() -> DateTimeParser {
        DateTimeParser { p: parser::DateTimeParser::new(), keep_offset: false }
    }

    /// Whether to attach a fixed offset time zone to parsed values.
    ///
    /// By default, a parsed offset is only used to compute the UTC instant,
    /// and the value returned has no time zone. When enabled, a value parsed
    /// with a numeric offset (but not `Z`) keeps that offset as its time
    /// zone, so that it prints back with the same offset.
    ///
    /// Time-only values never get a time zone.
    ///
    /// This is disabled by default.
    #[inline]
    pub const fn keep_offset(self, yes: bool) -> DateTimeParser {
        DateTimeParser { keep_offset: yes, ..self }
    }

    /// Parse a timestamp into a [`DateTime`].
    ///
    /// # Errors
    ///
    /// This returns an error when the input doesn't match the grammar (see
    /// [`Error::is_invalid_format`]) or when the fields parsed are out of
    /// range, e.g., `2015-02-29` (see [`Error::is_invalid_argument`]).
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::fmt::timestamp::DateTimeParser;
    ///
    /// static PARSER: DateTimeParser = DateTimeParser::new();
    ///
    /// let err = PARSER.parse_datetime("2015-01-08 23:01").unwrap_err();
    /// assert!(err.is_invalid_format());
    /// let err = PARSER.parse_datetime("2015-02-29").unwrap_err();
    /// assert!(err.is_invalid_argument());
    /// ```
    pub fn parse_datetime<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<DateTime, Error> {
        let input = input.as_ref();
        let parsed = self.p.parse_timestamp(input)?.into_full()?;
        parsed.to_datetime(self.keep_offset)
    }
}

impl Default for DateTimeParser {
    fn default() -> DateTimeParser {
        DateTimeParser::new()
    }
}

/// A printer for timestamps.
///
/// The `Display` implementation on [`DateTime`] uses this printer with its
/// default configuration. This type can be used directly to print into any
/// [`Write`] implementation, or to change the separator between the date and
/// the time.
///
/// # Example
///
/// ```
/// use hnstime::{fmt::timestamp::DateTimePrinter, DateTime};
///
/// const PRINTER: DateTimePrinter = DateTimePrinter::new().separator(b' ');
///
/// let dt: DateTime = "2015-01-08T23:01:59.5Z".parse()?;
/// let mut buf = String::new();
/// PRINTER.print_datetime(&dt, &mut buf)?;
/// assert_eq!(buf, "+2015-01-08 23:01:59.5Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DateTimePrinter {
    p: printer::DateTimePrinter,
}

impl DateTimePrinter {
    /// Create a new timestamp printer with the default configuration.
    #[inline]
    pub const fn new() -> DateTimePrinter {
        DateTimePrinter { p: printer::DateTimePrinter::new() }
    }

    /// Use lowercase for the time designator and the `Z` suffix.
    ///
    /// This is disabled by default. The parser accepts either case.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::{fmt::timestamp::DateTimePrinter, DateTime};
    ///
    /// const PRINTER: DateTimePrinter = DateTimePrinter::new().lowercase(true);
    ///
    /// let dt = DateTime::from_date(2015, 1, 8)?;
    /// assert_eq!(PRINTER.datetime_to_string(&dt)?, "+2015-01-08t00:00:00z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub const fn lowercase(self, yes: bool) -> DateTimePrinter {
        DateTimePrinter { p: self.p.lowercase(yes) }
    }

    /// Use the given ASCII character to separate the date and the time.
    ///
    /// The default is `T`. Note that text printed with any other separator
    /// (except for `t`) can't be parsed back.
    ///
    /// # Panics
    ///
    /// This panics if the given byte is not ASCII.
    #[inline]
    pub const fn separator(self, ascii_char: u8) -> DateTimePrinter {
        DateTimePrinter { p: self.p.separator(ascii_char) }
    }

    /// Print a [`DateTime`] to the given writer.
    ///
    /// The calendar fields are in the local time of the date/time's time
    /// zone, followed by its offset. Without a time zone, the fields are in
    /// UTC and the suffix is `Z`.
    ///
    /// # Errors
    ///
    /// This returns an error when the date/time is
    /// [`DateTime::UNDEFINED`], or when writing to the given writer fails.
    pub fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        wtr: W,
    ) -> Result<(), Error> {
        self.p.print_datetime(dt, wtr)
    }

    /// Print a [`DateTime`] to a new string.
    ///
    /// # Errors
    ///
    /// This returns an error when the date/time is
    /// [`DateTime::UNDEFINED`].
    #[cfg(feature = "alloc")]
    pub fn datetime_to_string(
        &self,
        dt: &DateTime,
    ) -> Result<alloc::string::String, Error> {
        let mut buf = alloc::string::String::with_capacity(4);
        self.print_datetime(dt, &mut buf)?;
        Ok(buf)
    }
}

impl Default for DateTimePrinter {
    fn default() -> DateTimePrinter {
        DateTimePrinter::new()
    }
}
