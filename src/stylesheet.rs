//! CSS emission for positioning records.

use core::fmt::{self, Write};

use crate::compose::PositioningRecord;

/// Class name prefix for every rule.
pub const CLASS_PREFIX: &str = "sprites_";

/// Offset used to push text content out of view.
pub const TEXT_INDENT_PX: i64 = -5000;

/// One CSS rule pointing at a tile of the sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule<'a> {
    pub record: &'a PositioningRecord,
    /// `url_prefix + output image name`.
    pub url: &'a str,
}

impl StyleRule<'_> {
    /// Class name without the leading dot and without escaping.
    pub fn class_name(&self) -> String {
        format!("{CLASS_PREFIX}{}", self.record.identifier)
    }
}

impl fmt::Display for StyleRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        f.write_str("\n.")?;
        write_escaped_ident(f, CLASS_PREFIX)?;
        write_escaped_ident(f, &r.identifier)?;
        writeln!(f, " {{")?;
        writeln!(
            f,
            "    background: transparent url({}) {}px 0 no-repeat;",
            self.url,
            -i64::from(r.x)
        )?;
        writeln!(f, "    width: {}px;", r.width)?;
        writeln!(f, "    height: {}px;", r.height)?;
        writeln!(f, "    text-indent: {TEXT_INDENT_PX}px;")?;
        writeln!(f, "}}")
    }
}

/// Render one rule per record, in record order.
///
/// Every rule points at `url_prefix` followed by `image_name`.
pub fn render(records: &[PositioningRecord], url_prefix: &str, image_name: &str) -> String {
    let url = format!("{url_prefix}{image_name}");
    let mut css = String::new();
    for record in records {
        let rule = StyleRule { record, url: &url };
        // Writing into a String cannot fail.
        let _ = write!(css, "{rule}");
    }
    css
}

/// Write `ident` for use inside a class selector. ASCII outside
/// `[A-Za-z0-9_-]` is backslash-escaped; non-ASCII passes through.
fn write_escaped_ident<W: Write>(out: &mut W, ident: &str) -> fmt::Result {
    for c in ident.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => out.write_char(c)?,
            c if !c.is_ascii() => out.write_char(c)?,
            c if c.is_ascii_control() => write!(out, "\\{:x} ", c as u32)?,
            c => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
        }
    }
    Ok(())
}
