//! Page-number pagination shared by the fleet listing endpoints.
//!
//! Listings are sliced into fixed-size pages. A [`Paginator`] owns the page
//! size, a [`PageRequest`] captures the caller's `page` query value, and the
//! resulting [`Page`] carries the slice plus enough metadata for a client to
//! render navigation controls.
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use pagination::{PageRequest, Paginator};
//!
//! let paginator = Paginator::new(NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN));
//! let page = paginator
//!     .paginate((1..=7).collect::<Vec<u32>>(), PageRequest::Last)
//!     .map_err(|err| err.to_string())?;
//! assert_eq!(page.items(), &[6, 7]);
//! assert_eq!(page.to_string(), "<Page 2 of 2>");
//! # Ok::<(), String>(())
//! ```

mod error;
mod page;
mod request;

pub use error::PaginationError;
pub use page::{Page, PageLinks, PageSummary, Paginator, PaginatorSummary};
pub use request::PageRequest;
