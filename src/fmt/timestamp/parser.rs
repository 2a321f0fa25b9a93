use crate::{
    calendar::{
        Components, HALF_VALUE, TICKS_PER_DAY, TICKS_PER_MICROSECOND,
        TICKS_PER_MILLISECOND,
    },
    codec,
    datetime::DateTime,
    error::{fmt::timestamp::Error as E, Error, ErrorContext},
    fmt::{util, Parsed},
    instant::Instant,
    tz::{Offset, TimeZone},
    util::escape,
};

/// The result of parsing a timestamp.
///
/// A timestamp always has a time, even if it's implicitly midnight. The date
/// is absent for time-only values.
#[derive(Debug)]
pub(super) struct ParsedTimestamp<'i> {
    /// The original input that the timestamp was parsed from.
    input: escape::Bytes<'i>,
    date: Option<ParsedDate>,
    time: ParsedTime,
    offset: Option<ParsedOffset>,
}

impl<'i> ParsedTimestamp<'i> {
    /// Converts the parsed fields to a date/time in UTC.
    ///
    /// When `keep_offset` is true and a numeric offset was parsed for a
    /// dated value, the date/time returned carries a fixed offset time zone.
    pub(super) fn to_datetime(
        &self,
        keep_offset: bool,
    ) -> Result<DateTime, Error> {
        let offset = match self.offset {
            Some(ParsedOffset::Numeric(offset)) => Some(offset),
            Some(ParsedOffset::Zulu) | None => None,
        };
        let Some(date) = self.date else {
            return self.to_time_only(offset);
        };
        let c = self.time.to_components(date.year, date.month, date.day);
        let local =
            codec::encode(&c).with_context(|| self.invalid_fields())?;
        let Some(offset) = offset else {
            return Ok(DateTime::from_instant(local));
        };
        let utc = offset.to_utc(local);
        debug!(
            "removed parsed offset {offset} from {input} to get \
             UTC instant {utc:?}",
            input = self.input,
        );
        let dt = DateTime::from_instant(utc);
        if keep_offset {
            Ok(dt.with_time_zone(TimeZone::fixed(offset)))
        } else {
            Ok(dt)
        }
    }

    /// Converts a parsed time without a date to a date/time on
    /// `0001-01-01`.
    ///
    /// The offset wraps around within the day, so the result never leaves
    /// the reference date.
    fn to_time_only(
        &self,
        offset: Option<Offset>,
    ) -> Result<DateTime, Error> {
        let c = self.time.to_components(1, 1, 1);
        let local =
            codec::encode(&c).with_context(|| self.invalid_fields())?;
        let Some(offset) = offset else {
            return Ok(DateTime::from_instant(local));
        };
        // Both the time of day and any offset fit in an `i64`.
        let day = TICKS_PER_DAY as i64;
        let local_time = (local.ticks() - HALF_VALUE) as i64;
        let utc_time = (local_time - offset.ticks()).rem_euclid(day) as u64;
        let utc = Instant::from_ticks(HALF_VALUE + utc_time);
        debug!(
            "removed parsed offset {offset} from time {input} modulo \
             one day to get UTC instant {utc:?}",
            input = self.input,
        );
        Ok(DateTime::from_instant(utc))
    }
}

impl<'i> ParsedTimestamp<'i> {
    fn invalid_fields(&self) -> E {
        E::InvalidFields { input: self.input.0.into() }
    }
}

impl<'i> Parsed<'i, ParsedTimestamp<'i>> {
    /// Returns the parsed timestamp, or an error if there is any unparsed
    /// input remaining.
    pub(super) fn into_full(self) -> Result<ParsedTimestamp<'i>, Error> {
        if let Some(&byte) = self.input.first() {
            return Err(Error::from(E::TrailingInput { byte }));
        }
        Ok(self.value)
    }
}

/// A calendar date as written in text.
///
/// The year has already been shifted so that there is no year zero.
#[derive(Clone, Copy, Debug)]
struct ParsedDate {
    year: i32,
    month: u8,
    day: u8,
}

/// A time of day as written in text. None of the fields are checked beyond
/// being two digits, except that hour `24` has been normalized to `0`.
#[derive(Clone, Copy, Debug, Default)]
struct ParsedTime {
    hour: u8,
    minute: u8,
    second: u8,
    /// The fractional second in ticks, `0..=9_999_999`.
    subsec: u32,
}

impl ParsedTime {
    fn to_components(&self, year: i32, month: u8, day: u8) -> Components {
        let (ms, rest) = (
            self.subsec / (TICKS_PER_MILLISECOND as u32),
            self.subsec % (TICKS_PER_MILLISECOND as u32),
        );
        let (us, hns) = (
            rest / (TICKS_PER_MICROSECOND as u32),
            rest % (TICKS_PER_MICROSECOND as u32),
        );
        Components::new(
            year,
            month,
            day,
            self.hour,
            self.minute,
            self.second,
            ms as u16,
            us as u16,
            hns as u8,
        )
    }
}

#[derive(Clone, Copy, Debug)]
enum ParsedOffset {
    /// `Z` (or `z`), which is the same as no offset at all.
    Zulu,
    Numeric(Offset),
}

/// A parser for the timestamp grammar.
///
/// The grammar is ambiguous without looking ahead, so the branch taken is
/// decided by scanning the whole input first:
///
/// * Anything containing `T` is a date and time.
/// * Anything else starting with a sign is a date.
/// * Anything else containing at least two `-` is a date.
/// * Everything else is a time, where a single `-` is the sign of an offset.
#[derive(Debug)]
pub(super) struct DateTimeParser {
    _priv: (),
}

impl DateTimeParser {
    /// Create a new timestamp parser.
    pub(super) const fn new() -> DateTimeParser {
        DateTimeParser { _priv: () }
    }

    /// Parses a timestamp from the beginning of `input`.
    ///
    /// Callers should use `Parsed::into_full` to reject trailing input.
    pub(super) fn parse_timestamp<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ParsedTimestamp<'i>>, Error> {
        if input.is_empty() {
            return Err(Error::from(E::Empty));
        }
        if let Some(&byte) = input.iter().find(|b| b.is_ascii_whitespace()) {
            return Err(Error::from(E::ContainsWhitespace { byte }));
        }

        if input.iter().any(|&b| b == b'T' || b == b't') {
            trace!(
                "parsing {input} as a date and time",
                input = escape::Bytes(input),
            );
            self.parse_datetime(input)
        } else if matches!(input[0], b'+' | b'-') {
            trace!(
                "parsing {input} as a signed date",
                input = escape::Bytes(input),
            );
            self.parse_date_only(input, false)
        } else if input.iter().filter(|&&b| b == b'-').count() >= 2 {
            trace!(
                "parsing {input} as an unsigned date",
                input = escape::Bytes(input),
            );
            self.parse_date_only(input, true)
        } else {
            trace!(
                "parsing {input} as a time",
                input = escape::Bytes(input),
            );
            self.parse_time_only(input)
        }
    }

    // DateTime :::
    //   Date TimeDesignator Time Offset[opt]
    fn parse_datetime<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ParsedTimestamp<'i>>, Error> {
        let original = input;

        let Parsed { value: date, input } =
            self.parse_date(input, true).context(E::FailedDate)?;
        let Parsed { input, .. } = self.parse_time_designator(input)?;
        let Parsed { value: time, input } =
            self.parse_time(input).context(E::FailedTime)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;

        let value = ParsedTimestamp {
            input: consumed(original, input),
            date: Some(date),
            time,
            offset,
        };
        Ok(Parsed { value, input })
    }

    fn parse_date_only<'i>(
        &self,
        input: &'i [u8],
        complete: bool,
    ) -> Result<Parsed<'i, ParsedTimestamp<'i>>, Error> {
        let original = input;

        let Parsed { value: date, input } =
            self.parse_date(input, complete).context(E::FailedDate)?;

        let value = ParsedTimestamp {
            input: consumed(original, input),
            date: Some(date),
            time: ParsedTime::default(),
            offset: None,
        };
        Ok(Parsed { value, input })
    }

    // TimeOnly :::
    //   Time Offset[opt]
    fn parse_time_only<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ParsedTimestamp<'i>>, Error> {
        let original = input;

        let Parsed { value: time, input } =
            self.parse_time(input).context(E::FailedTime)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;

        let value = ParsedTimestamp {
            input: consumed(original, input),
            date: None,
            time,
            offset,
        };
        Ok(Parsed { value, input })
    }

    // Date :::
    //   Sign[opt] Year - Month - Day
    //   Sign[opt] Year Month Day
    //
    // When `complete` is false, the day (and in the compact form, also the
    // month) may be omitted. In the compact form, the number of digits
    // decides which fields are present.
    fn parse_date<'i>(
        &self,
        input: &'i [u8],
        complete: bool,
    ) -> Result<Parsed<'i, ParsedDate>, Error> {
        let (negative, input) = match input.split_first() {
            Some((&b'-', rest)) => (true, rest),
            Some((&b'+', rest)) => (false, rest),
            _ => (false, input),
        };
        let (digits, input) = util::split_digits(input);
        match input.strip_prefix(b"-") {
            Some(input) => {
                self.parse_extended_date(negative, digits, input, complete)
            }
            None => self.parse_basic_date(negative, digits, input, complete),
        }
    }

    fn parse_extended_date<'i>(
        &self,
        negative: bool,
        year: &[u8],
        input: &'i [u8],
        complete: bool,
    ) -> Result<Parsed<'i, ParsedDate>, Error> {
        let year = parse_year(negative, year)?;
        let Parsed { value: month, input } =
            parse_two_digits(input, E::ExpectedTwoDigitMonth, E::ParseMonth)?;
        let Parsed { value: day, input } = match input.strip_prefix(b"-") {
            Some(input) => {
                parse_two_digits(input, E::ExpectedTwoDigitDay, E::ParseDay)?
            }
            None if complete => return Err(expected_date_separator(input)),
            None => Parsed { value: 1, input },
        };
        Ok(Parsed { value: ParsedDate { year, month, day }, input })
    }

    fn parse_basic_date<'i>(
        &self,
        negative: bool,
        digits: &[u8],
        input: &'i [u8],
        complete: bool,
    ) -> Result<Parsed<'i, ParsedDate>, Error> {
        let len = digits.len();
        let year_len = match len {
            0..=3 => {
                return Err(Error::from(E::ExpectedFourDigitYear {
                    found: len,
                }))
            }
            4..=7 if complete => return Err(expected_date_separator(input)),
            4 | 5 => len,
            6 | 7 => len - 2,
            _ => len - 4,
        };
        let (year, rest) = digits.split_at(year_len);
        let year = parse_year(negative, year)?;
        let Parsed { value: month, input: rest } = if rest.is_empty() {
            Parsed { value: 1, input: rest }
        } else {
            parse_two_digits(rest, E::ExpectedTwoDigitMonth, E::ParseMonth)?
        };
        let day = if rest.is_empty() {
            1
        } else {
            parse_two_digits(rest, E::ExpectedTwoDigitDay, E::ParseDay)?.value
        };
        Ok(Parsed { value: ParsedDate { year, month, day }, input })
    }

    fn parse_time_designator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        match input.split_first() {
            Some((&(b'T' | b't'), input)) => Ok(Parsed { value: (), input }),
            Some((&byte, _)) => {
                Err(Error::from(E::ExpectedTimeDesignatorFoundByte { byte }))
            }
            None => Err(Error::from(E::ExpectedTimeDesignatorFoundEndOfInput)),
        }
    }

    // Time :::
    //   Hour
    //   Hour :[opt] Minute
    //   Hour :[opt] Minute :[opt] Second Fraction[opt]
    fn parse_time<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ParsedTime>, Error> {
        let Parsed { value: mut hour, input } =
            parse_two_digits(input, E::ExpectedTwoDigitHour, E::ParseHour)?;
        if hour == 24 {
            trace!("normalizing hour 24 to hour 0 of the same day");
            hour = 0;
        }
        let mut time = ParsedTime { hour, ..ParsedTime::default() };

        let Some(Parsed { value: minute, input }) = parse_time_field(
            input,
            E::ExpectedTwoDigitMinute,
            E::ParseMinute,
        )?
        else {
            return Ok(Parsed { value: time, input });
        };
        time.minute = minute;

        let Some(Parsed { value: second, input }) = parse_time_field(
            input,
            E::ExpectedTwoDigitSecond,
            E::ParseSecond,
        )?
        else {
            return Ok(Parsed { value: time, input });
        };
        time.second = second;

        let Parsed { value: subsec, input } = self.parse_fraction(input)?;
        time.subsec = subsec;
        Ok(Parsed { value: time, input })
    }

    // Fraction :::
    //   DecimalSeparator DecimalDigit+
    //
    // DecimalSeparator ::: one of
    //   . ,
    fn parse_fraction<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, u32>, Error> {
        let Some(input) =
            input.strip_prefix(b".").or_else(|| input.strip_prefix(b","))
        else {
            return Ok(Parsed { value: 0, input });
        };
        let (digits, input) = util::split_digits(input);
        let value = util::parse_fraction(digits).context(E::FailedFraction)?;
        Ok(Parsed { value, input })
    }

    // Offset :::
    //   Z
    //   Sign Hour
    //   Sign Hour :[opt] Minute
    fn parse_offset<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<ParsedOffset>>, Error> {
        let (negative, input) = match input.split_first() {
            Some((&(b'Z' | b'z'), input)) => {
                let value = Some(ParsedOffset::Zulu);
                return Ok(Parsed { value, input });
            }
            Some((&b'+', rest)) => (false, rest),
            Some((&b'-', rest)) => (true, rest),
            _ => return Ok(Parsed { value: None, input }),
        };
        let Parsed { value: offset, input } = self
            .parse_numeric_offset(negative, input)
            .context(E::FailedOffset)?;
        Ok(Parsed { value: Some(ParsedOffset::Numeric(offset)), input })
    }

    fn parse_numeric_offset<'i>(
        &self,
        negative: bool,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        let Parsed { value: hours, input } = parse_two_digits(
            input,
            E::ExpectedTwoDigitOffsetHour,
            E::ParseOffsetHour,
        )?;
        let Parsed { value: minutes, input } = match parse_time_field(
            input,
            E::ExpectedTwoDigitOffsetMinute,
            E::ParseOffsetMinute,
        )? {
            Some(parsed) => parsed,
            None => Parsed { value: 0, input },
        };
        // Two digits always fit in an `i8`.
        let (hours, minutes) = (hours as i8, minutes as i8);
        let offset = if negative {
            Offset::new(-hours, -minutes)?
        } else {
            Offset::new(hours, minutes)?
        };
        Ok(Parsed { value: offset, input })
    }
}

/// Parses the digits of a year, with at least four digits.
///
/// Years in text are numbered astronomically: `0000` is the year before
/// `0001`. Since there is no year zero in the calendar, every year at or
/// before `0000` is shifted back by one.
///
/// Years too big for an `i32`, including those with more digits than fit in
/// a `u64`, are clamped, since they saturate when encoded anyway.
fn parse_year(negative: bool, digits: &[u8]) -> Result<i32, Error> {
    if digits.len() < 4 {
        return Err(Error::from(E::ExpectedFourDigitYear {
            found: digits.len(),
        }));
    }
    let significant = match digits.iter().position(|&b| b != b'0') {
        None => &digits[digits.len()..],
        Some(start) => &digits[start..],
    };
    // Any year with more than ten significant digits is beyond `i32`.
    if significant.len() > 10 && significant.iter().all(u8::is_ascii_digit) {
        return Ok(if negative { i32::MIN } else { i32::MAX });
    }
    let magnitude = util::parse_int(digits).context(E::ParseYear)?;
    let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
    let mut year = if negative { -magnitude } else { magnitude };
    if year <= 0 {
        year -= 1;
    }
    Ok(i32::try_from(year).unwrap_or(if year < 0 {
        i32::MIN
    } else {
        i32::MAX
    }))
}

/// Parses an optional two digit time field, preceded by an optional `:`.
///
/// If there's a `:`, the field is required. Otherwise, the field is only
/// parsed when the next byte is a digit.
fn parse_time_field<'i>(
    input: &'i [u8],
    missing: E,
    failed: E,
) -> Result<Option<Parsed<'i, u8>>, Error> {
    if let Some(input) = input.strip_prefix(b":") {
        return parse_two_digits(input, missing, failed).map(Some);
    }
    if !input.first().map_or(false, u8::is_ascii_digit) {
        return Ok(None);
    }
    parse_two_digits(input, missing, failed).map(Some)
}

/// Parses exactly two ASCII digits.
///
/// `missing` is the error when there are fewer than two bytes left, and
/// `failed` is the context when they aren't both digits.
fn parse_two_digits<'i>(
    input: &'i [u8],
    missing: E,
    failed: E,
) -> Result<Parsed<'i, u8>, Error> {
    let (digits, input) = util::split(input, 2).ok_or(missing)?;
    let n = util::parse_int(digits).context(failed)?;
    // Two digits always fit in a `u8`.
    Ok(Parsed { value: n as u8, input })
}

fn expected_date_separator(input: &[u8]) -> Error {
    match input.first() {
        Some(&byte) => Error::from(E::ExpectedDateSeparatorFoundByte { byte }),
        None => Error::from(E::ExpectedDateSeparatorFoundEndOfInput),
    }
}

/// Returns the prefix of `original` that was consumed to get to `rest`.
fn consumed<'i>(original: &'i [u8], rest: &'i [u8]) -> escape::Bytes<'i> {
    escape::Bytes(&original[..original.len() - rest.len()])
}
