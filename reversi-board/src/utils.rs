//! Miscellaneous project utilities.

use std::fmt::{self, Formatter};
use std::iter::Iterator;

/// Letter naming a column in string notation ("A" for column 0).
pub fn column_letter(x: usize) -> char {
    (b'A' + x as u8) as char
}

/// Format `dimension * dimension` characters into a pretty grid format.
/// `piece_iter` must yield exactly that many items, in row-major order.
pub fn format_grid<T: Iterator<Item = char>>(
    dimension: usize,
    mut piece_iter: T,
    f: &mut Formatter,
) -> fmt::Result {
    write!(f, "   ")?;
    for x in 0..dimension {
        write!(f, " {}", column_letter(x))?;
    }

    for row in 0..dimension {
        write!(f, "\n{:>3}", row + 1)?;
        for _ in 0..dimension {
            write!(f, " {}", piece_iter.next().ok_or(fmt::Error)?)?;
        }
    }

    match piece_iter.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
