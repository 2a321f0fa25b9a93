/*!
Parsing and printing of date/times.

The only text format supported is the timestamp format described in the
[`timestamp`] module. Most uses will go through the `FromStr` and `Display`
trait implementations on [`DateTime`](crate::DateTime), but the parser and
printer in the [`timestamp`] module can also be used directly. For example,
to print into a [`Write`] implementation without allocating, or to keep the
offset of a parsed timestamp.

With the `serde` feature enabled, the [`serde`] module provides helpers for
(de)serializing a `DateTime` as a raw tick count.
*/

use alloc::{string::String, vec::Vec};

use crate::{
    error::Error,
    util::escape,
};

use self::util::{Decimal, DecimalFormatter};

#[cfg(feature = "serde")]
pub mod serde;
pub mod timestamp;
mod util;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the offset at which the value
/// ended in the input given.
#[derive(Clone, Eq, Hash, PartialEq)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V: core::fmt::Debug> core::fmt::Debug for Parsed<'i, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Parsed")
            .field("value", &self.value)
            .field("input", &escape::Bytes(self.input))
            .finish()
    }
}

/// A trait for printing date/times.
///
/// This is like [`core::fmt::Write`], except it returns this crate's error
/// type on failure.
///
/// It is implemented for `String` and `Vec<u8>`. To print into any
/// implementation of `core::fmt::Write`, use [`FmtWrite`]. With the `std`
/// feature, [`StdWrite`] does the same for `std::io::Write`.
pub trait Write {
    /// Write the given string to this writer, returning whether the write
    /// succeeded or not.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer, returning whether the write
    /// succeeded or not.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: Write> Write for &mut W {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `std::io::Write` implementations with [`Write`].
///
/// # Example
///
/// ```
/// use hnstime::{fmt::{timestamp::DateTimePrinter, StdWrite}, DateTime};
///
/// let dt = DateTime::from_date(2015, 1, 8)?;
/// let mut buf = vec![];
/// DateTimePrinter::new().print_datetime(&dt, StdWrite(&mut buf))?;
/// assert_eq!(buf, b"+2015-01-08T00:00:00Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct StdWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_all(string.as_bytes()).map_err(|err| {
            Error::from_args(format_args!("failed to write timestamp: {err}"))
        })
    }
}

/// An adapter for using `core::fmt::Write` implementations with [`Write`].
#[derive(Clone, Debug)]
pub struct FmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for FmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_str(string).map_err(|_| {
            Error::from_args(format_args!(
                "an error occurred when formatting an argument",
            ))
        })
    }
}

trait WriteExt: Write {
    /// Write the given number as a decimal using ASCII digits to this buffer.
    /// The given formatter controls how the decimal is formatted.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<u64>,
    ) -> Result<(), Error> {
        self.write_decimal(&Decimal::new(formatter, n.into()))
    }

    /// Write the given decimal number to this buffer.
    #[inline]
    fn write_decimal(&mut self, decimal: &Decimal) -> Result<(), Error> {
        self.write_str(decimal.as_str())
    }
}

impl<W: Write> WriteExt for W {}
