use crate::{
    calendar::TICKS_PER_SECOND,
    error::{
        util::{ParseFractionError, ParseIntError},
        Error,
    },
};

/// A simple formatter for converting unsigned integers to ASCII byte strings.
///
/// This avoids going through the formatting machinery which seems to
/// substantially slow things down. Signs are the caller's business.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    minimum_digits: u8,
}

impl DecimalFormatter {
    /// Creates a new decimal formatter using the default configuration.
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { minimum_digits: 0 }
    }

    /// The minimum number of digits that this number should be formatted
    /// with. If the number would have fewer digits than this, then it is
    /// padded out with zeros until the minimum is reached.
    ///
    /// The minimum number of digits is capped at the maximum number of digits
    /// for a u64 value (which is 20).
    pub(crate) const fn padding(self, mut digits: u8) -> DecimalFormatter {
        if digits > Decimal::MAX_U64_LEN {
            digits = Decimal::MAX_U64_LEN;
        }
        DecimalFormatter { minimum_digits: digits }
    }
}

impl Default for DecimalFormatter {
    fn default() -> DecimalFormatter {
        DecimalFormatter::new()
    }
}

/// A formatted decimal number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Self::MAX_U64_LEN as usize],
    start: u8,
}

impl Decimal {
    /// Discovered via `u64::MAX.to_string().len()`.
    const MAX_U64_LEN: u8 = 20;

    /// Using the given formatter, turn the value given into a decimal
    /// representation using ASCII bytes.
    pub(crate) const fn new(
        formatter: &DecimalFormatter,
        mut value: u64,
    ) -> Decimal {
        let mut decimal = Decimal {
            buf: [b'0'; Self::MAX_U64_LEN as usize],
            start: Self::MAX_U64_LEN,
        };
        loop {
            decimal.start -= 1;

            let digit = (value % 10) as u8;
            value /= 10;
            decimal.buf[decimal.start as usize] = b'0' + digit;
            if value == 0 {
                break;
            }
        }
        // The buffer is initialized with zeros, so padding only needs to
        // move the start.
        while Self::MAX_U64_LEN - decimal.start < formatter.minimum_digits {
            decimal.start -= 1;
        }
        decimal
    }

    /// Returns the ASCII representation of this decimal as a byte slice.
    ///
    /// The slice returned is guaranteed to be valid ASCII.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[usize::from(self.start)..]
    }

    /// Returns the ASCII representation of this decimal as a string slice.
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: This is safe because all bytes written to `self.buf` are
        // guaranteed to be ASCII (including in its initial state), and thus,
        // any subsequence is guaranteed to be valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

/// A formatted fraction of a second, with trailing zeros removed.
///
/// The fraction has at most 7 digits, which corresponds to 100 nanosecond
/// precision.
#[derive(Debug)]
pub(crate) struct Fractional {
    buf: [u8; Self::MAX_LEN as usize],
    end: u8,
}

impl Fractional {
    /// One digit for each power of ten in `TICKS_PER_SECOND`.
    const MAX_LEN: u8 = 7;

    /// Turn the given number of ticks into a fractional decimal
    /// representation using ASCII bytes.
    ///
    /// The fractional number returned expands to an empty slice of bytes if
    /// and only if the value is `0`.
    ///
    /// This panics if the value given isn't in the range `0..=9_999_999`.
    pub(crate) const fn new(mut ticks: u32) -> Fractional {
        assert!((ticks as u64) < TICKS_PER_SECOND);
        let mut fractional = Fractional {
            buf: [b'0'; Self::MAX_LEN as usize],
            end: Self::MAX_LEN,
        };
        let mut i = Self::MAX_LEN as usize;
        while ticks > 0 {
            i -= 1;
            fractional.buf[i] += (ticks % 10) as u8;
            ticks /= 10;
        }
        while fractional.end > 0
            && fractional.buf[fractional.end as usize - 1] == b'0'
        {
            fractional.end -= 1;
        }
        fractional
    }

    /// Returns the ASCII representation of this fractional number as a byte
    /// slice. The slice returned may be empty.
    ///
    /// The slice returned is guaranteed to be valid ASCII.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.end)]
    }

    /// Returns the ASCII representation of this fractional number as a string
    /// slice. The slice returned may be empty.
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: This is safe because all bytes written to `self.buf` are
        // guaranteed to be ASCII (including in its initial state), and thus,
        // any subsequence is guaranteed to be valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

/// Splits the given input into two slices at the given position.
///
/// If the position is greater than the length of the slice given, then this
/// returns `None`.
#[inline]
pub(crate) fn split(input: &[u8], at: usize) -> Option<(&[u8], &[u8])> {
    if at > input.len() {
        None
    } else {
        Some(input.split_at(at))
    }
}

/// Splits the given input into its leading ASCII digits and everything
/// after them.
#[inline]
pub(crate) fn split_digits(input: &[u8]) -> (&[u8], &[u8]) {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    input.split_at(len)
}

/// Parses a `u64` from the given ASCII digits.
///
/// This returns an error when `bytes` is empty, contains anything other than
/// ASCII digits or would overflow a `u64`.
pub(crate) fn parse_int(bytes: &[u8]) -> Result<u64, Error> {
    if bytes.is_empty() {
        return Err(Error::from(ParseIntError::NoDigitsFound));
    }
    let mut n: u64 = 0;
    for &byte in bytes {
        let digit = match byte.checked_sub(b'0') {
            Some(digit) if digit <= 9 => digit,
            _ => return Err(Error::from(ParseIntError::InvalidDigit(byte))),
        };
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(digit)))
            .ok_or(ParseIntError::TooBig)?;
    }
    Ok(n)
}

/// Parses the digits after a decimal separator as a number of ticks.
///
/// The first digit is tenths of a second, the second is hundredths and so
/// on. Digits beyond the seventh are finer than a tick and are ignored
/// (although they must still be ASCII digits).
pub(crate) fn parse_fraction(bytes: &[u8]) -> Result<u32, Error> {
    if bytes.is_empty() {
        return Err(Error::from(ParseFractionError::NoDigitsFound));
    }
    let mut ticks: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let digit = match byte.checked_sub(b'0') {
            Some(digit) if digit <= 9 => digit,
            _ => {
                return Err(Error::from(ParseFractionError::InvalidDigit(
                    byte,
                )))
            }
        };
        if i < usize::from(Fractional::MAX_LEN) {
            ticks = ticks * 10 + u32::from(digit);
        }
    }
    for _ in bytes.len()..usize::from(Fractional::MAX_LEN) {
        ticks *= 10;
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        let x = Decimal::new(&DecimalFormatter::new(), 0);
        assert_eq!(x.as_str(), "0");
        let x = Decimal::new(&DecimalFormatter::new(), 1);
        assert_eq!(x.as_str(), "1");
        let x = Decimal::new(&DecimalFormatter::new(), u64::MAX);
        assert_eq!(x.as_str(), "18446744073709551615");

        let x = Decimal::new(&DecimalFormatter::new().padding(4), 5);
        assert_eq!(x.as_str(), "0005");
        let x = Decimal::new(&DecimalFormatter::new().padding(4), 29228);
        assert_eq!(x.as_str(), "29228");
        let x = Decimal::new(&DecimalFormatter::new().padding(2), 0);
        assert_eq!(x.as_str(), "00");
        let x = Decimal::new(&DecimalFormatter::new().padding(255), 7);
        assert_eq!(x.as_str(), "00000000000000000007");
    }

    #[test]
    fn fractional() {
        assert_eq!(Fractional::new(0).as_str(), "");
        assert_eq!(Fractional::new(1).as_str(), "0000001");
        assert_eq!(Fractional::new(129).as_str(), "0000129");
        assert_eq!(Fractional::new(5_000_000).as_str(), "5");
        assert_eq!(Fractional::new(4_775_807).as_str(), "4775807");
        assert_eq!(Fractional::new(1_230_000).as_str(), "123");
    }

    #[test]
    fn int() {
        assert_eq!(parse_int(b"0").unwrap(), 0);
        assert_eq!(parse_int(b"0023").unwrap(), 23);
        assert_eq!(parse_int(b"18446744073709551615").unwrap(), u64::MAX);
        insta::assert_snapshot!(
            parse_int(b"").unwrap_err(),
            @"invalid number, no digits found",
        );
        insta::assert_snapshot!(
            parse_int(b"1a").unwrap_err(),
            @"invalid digit, expected 0-9 but got a",
        );
        insta::assert_snapshot!(
            parse_int(b"18446744073709551616").unwrap_err(),
            @"number too big to parse into 64-bit integer",
        );
    }

    #[test]
    fn fraction() {
        assert_eq!(parse_fraction(b"5").unwrap(), 5_000_000);
        assert_eq!(parse_fraction(b"0000129").unwrap(), 129);
        assert_eq!(parse_fraction(b"123456789").unwrap(), 1_234_567);
        assert_eq!(parse_fraction(b"00000009").unwrap(), 0);
        insta::assert_snapshot!(
            parse_fraction(b"").unwrap_err(),
            @"found decimal separator after seconds, but did not find any digits after it",
        );
        insta::assert_snapshot!(
            parse_fraction(b"12x").unwrap_err(),
            @"invalid fractional digit, expected 0-9 but got x",
        );
    }

    #[test]
    fn splits() {
        assert_eq!(split(b"2015", 2), Some((&b"20"[..], &b"15"[..])));
        assert_eq!(split(b"2", 2), None);
        assert_eq!(split_digits(b"2015-01"), (&b"2015"[..], &b"-01"[..]));
        assert_eq!(split_digits(b"T"), (&b""[..], &b"T"[..]));
    }
}
