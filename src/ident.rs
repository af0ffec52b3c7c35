//! Tile identifiers derived from source file names.
//!
//! The identifier is the run of characters before the *first* dot of the
//! file name, so `a.b.png` yields `a`, not `a.b`. Names without a dot, or
//! with nothing before the first dot, have no identifier.

use core::fmt;

/// Why a file name has no usable identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdentifierError {
    /// The name contains no `.` at all.
    NoExtension,
    /// The name starts with `.`, leaving nothing before it.
    EmptyStem,
    /// The path has no final component, or it is not valid UTF-8.
    NoFileName,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoExtension => "file name has no extension",
            Self::EmptyStem => "file name has nothing before its first dot",
            Self::NoFileName => "path has no UTF-8 file name",
        })
    }
}

impl core::error::Error for IdentifierError {}

/// Portion of `file_name` before its first `.`.
///
/// A name with no dot, or one starting with a dot such as `.png`, is
/// rejected rather than producing an empty identifier.
///
/// ```
/// use zensprite::ident::stem_before_first_dot;
///
/// assert_eq!(stem_before_first_dot("image1.png"), Ok("image1"));
/// assert_eq!(stem_before_first_dot("a.b.png"), Ok("a"));
/// assert!(stem_before_first_dot(".png").is_err());
/// ```
pub fn stem_before_first_dot(file_name: &str) -> Result<&str, IdentifierError> {
    match file_name.split_once('.') {
        None => Err(IdentifierError::NoExtension),
        Some(("", _)) => Err(IdentifierError::EmptyStem),
        Some((stem, _)) => Ok(stem),
    }
}

/// Identifier for the file at `path`, using only its final component.
#[cfg(feature = "std")]
pub fn identifier_from_path(path: &std::path::Path) -> Result<&str, IdentifierError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(IdentifierError::NoFileName)?;
    stem_before_first_dot(name)
}
