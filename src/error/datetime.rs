use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    UndefinedArithmetic,
    UndefinedComponent { what: &'static str },
    UndefinedDifference,
    UndefinedPrint,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::DateTime(err).into()
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
            UndefinedArithmetic => f.write_str(
                "cannot add or subtract a time span to an undefined date/time",
            ),
            UndefinedComponent { what } => write!(
                f,
                "cannot get {what} of an undefined date/time",
            ),
            UndefinedDifference => f.write_str(
                "cannot compute the time span between date/times \
                 when either one is undefined",
            ),
            UndefinedPrint => {
                f.write_str("cannot print an undefined date/time")
            }
        }
    }
}
