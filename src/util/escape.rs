/*!
Provides convenience routines for escaping raw bytes.

These are used for error messages and `Debug` output where the input being
described may not be valid UTF-8.
*/

/// Provides a convenient `Debug` implementation for a `u8`.
///
/// The `Debug` impl treats the byte as an ASCII, and emits a human readable
/// representation of it. If the byte isn't ASCII, then it's emitted as a hex
/// escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use core::fmt::Write;

        if self.0 == b' ' {
            return f.write_str(" ");
        }
        for (i, b) in core::ascii::escape_default(self.0).enumerate() {
            // \xab is written as \xAB
            let b = if i >= 2 { b.to_ascii_uppercase() } else { b };
            f.write_char(char::from(b))?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

/// Provides a convenient `Debug` implementation for `&[u8]`.
///
/// Valid UTF-8 is emitted as is (modulo the escaping of control characters)
/// while every byte of an invalid UTF-8 sequence is emitted as a hex escape.
#[derive(Clone, Copy)]
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        loop {
            match core::str::from_utf8(bytes) {
                Ok(valid) => return write_escaped(f, valid),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    if let Ok(valid) = core::str::from_utf8(valid) {
                        write_escaped(f, valid)?;
                    }
                    let invalid = err.error_len().unwrap_or(rest.len());
                    for &byte in &rest[..invalid] {
                        write!(f, r"\x{:02x}", byte)?;
                    }
                    bytes = &rest[invalid..];
                }
            }
        }
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

fn write_escaped(
    f: &mut core::fmt::Formatter,
    s: &str,
) -> core::fmt::Result {
    for ch in s.chars() {
        match ch {
            '\0' => f.write_str("\\0")?,
            '\n' | '\r' | '\t' => write!(f, "{}", ch.escape_debug())?,
            ch if ch.is_ascii_control() => {
                write!(f, "\\x{:02x}", u32::from(ch))?;
            }
            ch => write!(f, "{}", ch.escape_debug())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn byte() {
        assert_eq!(Byte(b'a').to_string(), "a");
        assert_eq!(Byte(b' ').to_string(), " ");
        assert_eq!(Byte(b'\n').to_string(), "\\n");
        assert_eq!(Byte(0xFF).to_string(), "\\xFF");
    }

    #[test]
    fn bytes() {
        assert_eq!(Bytes(b"2015-01-08").to_string(), "2015-01-08");
        assert_eq!(Bytes(b"a\x00b").to_string(), "a\\0b");
        assert_eq!(Bytes(b"a\xFFb").to_string(), "a\\xffb");
        assert_eq!(alloc::format!("{:?}", Bytes(b"T\x01")), "\"T\\x01\"");
    }
}
