use alloc::boxed::Box;

use crate::{
    error,
    util::escape::{Byte, Bytes},
};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ContainsWhitespace { byte: u8 },
    Empty,
    ExpectedDateSeparatorFoundByte { byte: u8 },
    ExpectedDateSeparatorFoundEndOfInput,
    ExpectedFourDigitYear { found: usize },
    ExpectedTimeDesignatorFoundByte { byte: u8 },
    ExpectedTimeDesignatorFoundEndOfInput,
    ExpectedTwoDigitDay,
    ExpectedTwoDigitHour,
    ExpectedTwoDigitMinute,
    ExpectedTwoDigitMonth,
    ExpectedTwoDigitOffsetHour,
    ExpectedTwoDigitOffsetMinute,
    ExpectedTwoDigitSecond,
    FailedDate,
    FailedFraction,
    FailedOffset,
    FailedTime,
    InvalidFields { input: Box<[u8]> },
    ParseDay,
    ParseHour,
    ParseMinute,
    ParseMonth,
    ParseOffsetHour,
    ParseOffsetMinute,
    ParseSecond,
    ParseYear,
    TrailingInput { byte: u8 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::FmtTimestamp(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            ContainsWhitespace { byte } => write!(
                f,
                "timestamp must not contain whitespace, but found {byte:?}",
                byte = Byte(byte),
            ),
            Empty => f.write_str("an empty string is not a valid timestamp"),
            ExpectedDateSeparatorFoundByte { byte } => write!(
                f,
                "expected `-` date separator, but found {byte:?}",
                byte = Byte(byte),
            ),
            ExpectedDateSeparatorFoundEndOfInput => f.write_str(
                "expected `-` date separator, \
                 but found end of input",
            ),
            ExpectedFourDigitYear { found } => write!(
                f,
                "expected at least four digit year, \
                 but found {found} digits",
            ),
            ExpectedTimeDesignatorFoundByte { byte } => write!(
                f,
                "expected `T` between date and time, but found {byte:?}",
                byte = Byte(byte),
            ),
            ExpectedTimeDesignatorFoundEndOfInput => f.write_str(
                "expected `T` between date and time, \
                 but found end of input",
            ),
            ExpectedTwoDigitDay => {
                f.write_str("expected two digit day, but found end of input")
            }
            ExpectedTwoDigitHour => {
                f.write_str("expected two digit hour, but found end of input")
            }
            ExpectedTwoDigitMinute => f.write_str(
                "expected two digit minute, but found end of input",
            ),
            ExpectedTwoDigitMonth => f.write_str(
                "expected two digit month, but found end of input",
            ),
            ExpectedTwoDigitOffsetHour => f.write_str(
                "expected two digit offset hour after sign, \
                 but found end of input",
            ),
            ExpectedTwoDigitOffsetMinute => f.write_str(
                "expected two digit offset minute after `:`, \
                 but found end of input",
            ),
            ExpectedTwoDigitSecond => f.write_str(
                "expected two digit second, but found end of input",
            ),
            FailedDate => f.write_str("failed to parse date"),
            FailedFraction => {
                f.write_str("failed to parse fractional seconds")
            }
            FailedOffset => f.write_str("failed to parse offset"),
            FailedTime => f.write_str("failed to parse time"),
            InvalidFields { ref input } => write!(
                f,
                "date and time fields parsed from {input:?} are not valid",
                input = Bytes(input),
            ),
            ParseDay => f.write_str("failed to parse two digit day"),
            ParseHour => f.write_str("failed to parse two digit hour"),
            ParseMinute => f.write_str("failed to parse two digit minute"),
            ParseMonth => f.write_str("failed to parse two digit month"),
            ParseOffsetHour => {
                f.write_str("failed to parse two digit offset hour")
            }
            ParseOffsetMinute => {
                f.write_str("failed to parse two digit offset minute")
            }
            ParseSecond => f.write_str("failed to parse two digit second"),
            ParseYear => f.write_str("failed to parse year"),
            TrailingInput { byte } => write!(
                f,
                "found unexpected {byte:?} after timestamp \
                 (expected end of input)",
                byte = Byte(byte),
            ),
        }
    }
}
