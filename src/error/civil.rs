use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DayNotInMonth { year: i32, month: u8, day: u8, days: u8 },
    YearZero,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            DayNotInMonth { year, month, day, days } => write!(
                f,
                "day {day} does not exist in month {month} of year {year}, \
                 which has {days} days",
            ),
            YearZero => f.write_str(
                "year 0 does not exist, year 1 is directly preceded by -1",
            ),
        }
    }
}
