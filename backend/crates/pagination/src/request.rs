//! Parsing of the `page` query parameter.

use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::PaginationError;

const LAST_PAGE_KEYWORD: &str = "last";

/// Page selected by a caller.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// assert_eq!(PageRequest::parse(None), Ok(PageRequest::First));
/// assert_eq!(PageRequest::parse(Some("last")), Ok(PageRequest::Last));
/// assert!(PageRequest::parse(Some("two")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRequest {
    /// No page was requested.
    #[default]
    First,
    /// An explicit one-based page number.
    Number(NonZeroUsize),
    /// The final page, whatever its number.
    Last,
}

impl PageRequest {
    /// Interpret an optional raw query value.
    ///
    /// Absent and blank values select the first page.
    ///
    /// # Errors
    /// Returns [`PaginationError::NotAnInteger`] for non-numeric input and
    /// [`PaginationError::LessThanOne`] for zero or negative numbers.
    pub fn parse(raw: Option<&str>) -> Result<Self, PaginationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::First),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for PageRequest {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == LAST_PAGE_KEYWORD {
            return Ok(Self::Last);
        }
        let number: i64 = value
            .parse()
            .map_err(|_| PaginationError::NotAnInteger {
                value: value.to_owned(),
            })?;
        if number < 1 {
            return Err(PaginationError::LessThanOne);
        }
        usize::try_from(number)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self::Number)
            .ok_or_else(|| PaginationError::NotAnInteger {
                value: value.to_owned(),
            })
    }
}
