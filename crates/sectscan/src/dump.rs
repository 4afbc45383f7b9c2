use core::fmt;

/// Renders bytes as `index:repr` pairs separated by spaces.
///
/// Printable ASCII is shown as itself; space, line feed, tab and the
/// terminator byte get escapes; anything else is shown in hex.
///
/// ```rust
/// use sectscan::ByteDump;
///
/// assert_eq!(ByteDump(b"a b\n\0\x7f").to_string(), r"0:a 1:' ' 2:b 3:\n 4:\0 5:0x7f");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByteDump<'a>(pub &'a [u8]);

impl fmt::Display for ByteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{i}:")?;
            match b {
                b' ' => f.write_str("' '")?,
                b'\n' => f.write_str(r"\n")?,
                b'\t' => f.write_str(r"\t")?,
                0 => f.write_str(r"\0")?,
                b if b.is_ascii_graphic() => write!(f, "{}", char::from(b))?,
                b => write!(f, "{b:#04x}")?,
            }
        }
        Ok(())
    }
}
