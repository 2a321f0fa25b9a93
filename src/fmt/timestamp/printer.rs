use crate::{
    codec,
    datetime::DateTime,
    error::{datetime::Error as E, Error},
    fmt::{
        util::{DecimalFormatter, Fractional},
        Write, WriteExt,
    },
    tz::Offset,
};

#[derive(Clone, Debug)]
pub(super) struct DateTimePrinter {
    lowercase: bool,
    separator: u8,
}

impl DateTimePrinter {
    pub(super) const fn new() -> DateTimePrinter {
        DateTimePrinter { lowercase: false, separator: b'T' }
    }

    pub(super) const fn lowercase(self, yes: bool) -> DateTimePrinter {
        DateTimePrinter { lowercase: yes, ..self }
    }

    pub(super) const fn separator(self, ascii_char: u8) -> DateTimePrinter {
        assert!(ascii_char.is_ascii(), "printer separator must be ASCII");
        DateTimePrinter { separator: ascii_char, ..self }
    }

    /// Prints the calendar fields of `dt` in its local time, followed by its
    /// offset (or `Z` when it has no time zone).
    pub(super) fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_YEAR: DecimalFormatter = DecimalFormatter::new().padding(4);
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        let Some(c) = codec::decode(dt.local_instant()) else {
            return Err(Error::from(E::UndefinedPrint));
        };

        // There is no year zero, so the years before `0001` are written
        // astronomically: `-1` is `-0000`, `-2` is `-0001` and so on.
        if c.year < 0 {
            wtr.write_str("-")?;
            wtr.write_int(&FMT_YEAR, c.year.unsigned_abs() - 1)?;
        } else {
            wtr.write_str("+")?;
            wtr.write_int(&FMT_YEAR, c.year.unsigned_abs())?;
        }
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, c.month)?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, c.day)?;

        let separator = if self.lowercase {
            self.separator.to_ascii_lowercase()
        } else {
            self.separator
        };
        wtr.write_char(char::from(separator))?;
        wtr.write_int(&FMT_TWO, c.hour)?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, c.minute)?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, c.second)?;

        let subsec = c.subsec_ticks();
        if subsec != 0 {
            wtr.write_str(".")?;
            wtr.write_str(Fractional::new(subsec).as_str())?;
        }

        match dt.offset() {
            None if self.lowercase => wtr.write_str("z"),
            None => wtr.write_str("Z"),
            Some(offset) => self.print_offset(offset, wtr),
        }
    }

    /// Prints an offset as `+hh:mm`.
    fn print_offset<W: Write>(
        &self,
        offset: Offset,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        wtr.write_str(if offset.is_negative() { "-" } else { "+" })?;
        wtr.write_int(&FMT_TWO, offset.part_hours().unsigned_abs())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, offset.part_minutes().unsigned_abs())
    }
}
