use alloc::sync::Arc;

pub(crate) mod civil;
pub(crate) mod datetime;
pub(crate) mod fmt;
pub(crate) mod util;

/// An error that can occur in this crate.
///
/// There are three broad categories of errors, each of which can be detected
/// with a predicate on this type:
///
/// * An invalid argument, e.g., a month of `13`, a year of `0` or a day that
/// doesn't exist in the given month. See [`Error::is_invalid_argument`].
/// * An invalid format, i.e., text that doesn't match any of the timestamp
/// forms accepted by the parser. See [`Error::is_invalid_format`].
/// * An operation that requires a defined date/time was given
/// [`DateTime::UNDEFINED`](crate::DateTime::UNDEFINED). See
/// [`Error::is_undefined`].
///
/// Notice that exceeding the representable range is *not* an error. Values
/// beyond either end of the range saturate to [`DateTime::MIN`] or
/// [`DateTime::MAX`].
///
/// # Design
///
/// This crate uses a single error type for every fallible
/// operation. Internally, errors are structured and may carry a chain of
/// causes. The `Display` implementation prints the whole chain, from the
/// highest level context down to the root cause, separated by `: `.
///
/// [`DateTime::MIN`]: crate::DateTime::MIN
/// [`DateTime::MAX`]: crate::DateTime::MAX
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheap to clone and to keep it
    /// one word in size.
    inner: Arc<ErrorInner>,
}

#[derive(Clone, Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated as a result of an argument
    /// being outside of its allowed range.
    ///
    /// This includes the year `0` (which doesn't exist) and days that don't
    /// exist in the month given.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// assert!(DateTime::from_date(2015, 13, 1).unwrap_err().is_invalid_argument());
    /// assert!(DateTime::from_date(0, 1, 1).unwrap_err().is_invalid_argument());
    /// assert!(DateTime::from_date(2015, 2, 29).unwrap_err().is_invalid_argument());
    /// // Fields extracted from text are checked in the same way.
    /// assert!("2015-02-30".parse::<DateTime>().unwrap_err().is_invalid_argument());
    /// ```
    pub fn is_invalid_argument(&self) -> bool {
        use self::ErrorKind::*;
        matches!(self.root().kind(), Range(_) | Civil(_))
    }

    /// Returns true when this error originated as a result of text not
    /// matching any of the recognized timestamp formats.
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// assert!("".parse::<DateTime>().unwrap_err().is_invalid_format());
    /// assert!("2015-01-08 23:01".parse::<DateTime>().unwrap_err().is_invalid_format());
    /// assert!("2015-0a-08".parse::<DateTime>().unwrap_err().is_invalid_format());
    /// ```
    pub fn is_invalid_format(&self) -> bool {
        use self::ErrorKind::*;
        matches!(
            self.root().kind(),
            FmtTimestamp(_) | ParseInt(_) | ParseFraction(_)
        )
    }

    /// Returns true when this error originated as a result of an operation
    /// that requires a defined date/time being given
    /// [`DateTime::UNDEFINED`](crate::DateTime::UNDEFINED).
    ///
    /// # Example
    ///
    /// ```
    /// use hnstime::DateTime;
    ///
    /// assert!(DateTime::UNDEFINED.year().unwrap_err().is_undefined());
    /// ```
    pub fn is_undefined(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::DateTime(_))
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "month")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        // This is usually a no-op clone-free borrow, since the consequent is
        // almost always freshly created.
        let inner = Arc::make_mut(&mut err.inner);
        debug_assert!(
            inner.cause.is_none(),
            "cause of consequence must be `None`"
        );
        inner.cause = Some(self);
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Clone, Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Civil(self::civil::Error),
    DateTime(self::datetime::Error),
    FmtTimestamp(self::fmt::timestamp::Error),
    ParseFraction(self::util::ParseFractionError),
    ParseInt(self::util::ParseIntError),
    Range(RangeError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Civil(ref err) => err.fmt(f),
            DateTime(ref err) => err.fmt(f),
            FmtTimestamp(ref err) => err.fmt(f),
            ParseFraction(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This exists to support the `Error::from_args` public API, which permits
/// users of this crate to manifest their own `Error` values from an arbitrary
/// message. (For example, from within an `OffsetRule` implementation.)
#[derive(Clone)]
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Clone, Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        let (given, min, max) = (given.into(), min.into(), max.into());
        RangeError { what, given, min, max }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RangeError {}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls for the internal error enums.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when creating the consequent error allocates, since
    /// the closure is only called on the error path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let root: Result<(), Error> = Err(Error::range("month", 13, 1, 12));
        let err = root
            .context(Error::from_args(format_args!("outer")))
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"outer: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        assert!(err.is_invalid_argument());
        assert!(!err.is_invalid_format());
        assert!(!err.is_undefined());
    }

    #[test]
    fn context_on_result() {
        let result: Result<(), Error> =
            Err(Error::from_args(format_args!("inner")));
        let err = result
            .with_context(|| Error::from_args(format_args!("outer")))
            .unwrap_err();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
