//! Errors raised while resolving a requested page.

use thiserror::Error;

/// Failure to resolve a `page` query value against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The value is neither `last` nor an integer.
    #[error("page is not 'last', nor can it be converted to an int: {value}")]
    NotAnInteger {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// The value is an integer below one.
    #[error("that page number is less than 1")]
    LessThanOne,
    /// The value points past the last page.
    #[error("page {requested} contains no results; the last page is {num_pages}")]
    NoResults {
        /// Page number supplied by the caller.
        requested: usize,
        /// Number of pages available for the listing.
        num_pages: usize,
    },
}
