//! Row tokenizer
//!
//! Splits a line on a single separator character. There is no quoting: a
//! separator inside a field cannot be represented.

use crate::error::LoadError;
use crate::types::Row;
use std::fmt;
use std::str::FromStr;

/// Characters trimmed from both ends of every cell
const TRIM_CHARS: [char; 2] = [' ', '\t'];

/// Supported column separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `,`
    Comma,

    /// `;`
    #[default]
    Semicolon,

    /// TAB
    Tab,
}

impl Separator {
    /// Separator character
    pub fn as_char(&self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Semicolon => ';',
            Separator::Tab => '\t',
        }
    }
}

impl TryFrom<char> for Separator {
    type Error = LoadError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            ',' => Ok(Separator::Comma),
            ';' => Ok(Separator::Semicolon),
            '\t' => Ok(Separator::Tab),
            other => Err(LoadError::UnsupportedSeparator(other)),
        }
    }
}

impl FromStr for Separator {
    type Err = LoadError;

    /// Accepts a single character, or `\t` / `TAB` for tab
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "\\t" || s.eq_ignore_ascii_case("tab") {
            return Ok(Separator::Tab);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Separator::try_from(c),
            (Some(c), Some(_)) => Err(LoadError::UnsupportedSeparator(c)),
            (None, _) => Err(LoadError::config("separator must not be empty")),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Tab => write!(f, "TAB"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

/// Split `line` into trimmed cells
///
/// Always yields separators + 1 cells; the count is checked against the
/// schema during assembly.
pub fn tokenize(line: &str, separator: Separator) -> Row<'_> {
    let cells = line
        .split(separator.as_char())
        .map(|cell| cell.trim_matches(TRIM_CHARS.as_slice()))
        .collect();
    Row::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_semicolon() {
        let row = tokenize("1;Alice;9.5", Separator::Semicolon);
        assert_eq!(row.cells, vec!["1", "Alice", "9.5"]);
    }

    #[test]
    fn test_tokenize_trims_spaces_and_tabs() {
        let row = tokenize(" 1 ,\tBob\t, 7.25", Separator::Comma);
        assert_eq!(row.cells, vec!["1", "Bob", "7.25"]);
    }

    #[test]
    fn test_tokenize_tab() {
        let row = tokenize("a\t b \tc", Separator::Tab);
        assert_eq!(row.cells, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_keeps_empty_cells() {
        let row = tokenize(";;", Separator::Semicolon);
        assert_eq!(row.cells, vec!["", "", ""]);

        let row = tokenize("", Separator::Semicolon);
        assert_eq!(row.cells, vec![""]);
    }

    #[test]
    fn test_other_separators_stay_in_cell() {
        let row = tokenize("a,b;c", Separator::Semicolon);
        assert_eq!(row.cells, vec!["a,b", "c"]);
    }

    #[test]
    fn test_separator_parsing() {
        assert_eq!(",".parse::<Separator>().unwrap(), Separator::Comma);
        assert_eq!(";".parse::<Separator>().unwrap(), Separator::Semicolon);
        assert_eq!("\t".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!("\\t".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!("TAB".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!(Separator::default(), Separator::Semicolon);
    }

    #[test]
    fn test_unsupported_separator() {
        assert!(matches!(
            "|".parse::<Separator>(),
            Err(LoadError::UnsupportedSeparator('|'))
        ));
        assert!(matches!(
            Separator::try_from(':'),
            Err(LoadError::UnsupportedSeparator(':'))
        ));
        assert!(matches!("".parse::<Separator>(), Err(LoadError::Config(_))));
    }

    proptest! {
        #[test]
        fn prop_cell_count_is_separators_plus_one(
            cells in prop::collection::vec("[a-zA-Z0-9 .-]{0,12}", 1..16),
            separator in prop::sample::select(vec![Separator::Comma, Separator::Semicolon, Separator::Tab]),
        ) {
            let line = cells.join(&separator.as_char().to_string());
            let row = tokenize(&line, separator);
            prop_assert_eq!(row.len(), cells.len());
        }
    }
}
