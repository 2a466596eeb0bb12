//! Paginator and the page envelope it produces.

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;
use url::Url;

use crate::{PageRequest, PaginationError};

const PAGE_PARAM: &str = "page";

/// Splits listings into pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: NonZeroUsize,
}

impl Paginator {
    /// Create a paginator producing pages of `per_page` items.
    #[must_use]
    pub const fn new(per_page: NonZeroUsize) -> Self {
        Self { per_page }
    }

    /// Maximum number of items on a page.
    #[must_use]
    pub const fn per_page(&self) -> NonZeroUsize {
        self.per_page
    }

    /// Number of pages needed for `count` items.
    ///
    /// An empty listing still has a single (empty) first page.
    #[must_use]
    pub const fn num_pages(&self, count: usize) -> usize {
        if count == 0 {
            1
        } else {
            count.div_ceil(self.per_page.get())
        }
    }

    /// Resolve a request into a concrete one-based page number.
    ///
    /// # Errors
    /// Returns [`PaginationError::NoResults`] when the request points past
    /// the last page.
    pub fn resolve(&self, count: usize, request: PageRequest) -> Result<usize, PaginationError> {
        let num_pages = self.num_pages(count);
        match request {
            PageRequest::First => Ok(1),
            PageRequest::Last => Ok(num_pages),
            PageRequest::Number(number) if number.get() <= num_pages => Ok(number.get()),
            PageRequest::Number(number) => Err(PaginationError::NoResults {
                requested: number.get(),
                num_pages,
            }),
        }
    }

    /// Slice `items` down to the requested page.
    ///
    /// # Errors
    /// Propagates [`Paginator::resolve`] failures.
    pub fn paginate<T>(
        &self,
        items: Vec<T>,
        request: PageRequest,
    ) -> Result<Page<T>, PaginationError> {
        let count = items.len();
        let number = self.resolve(count, request)?;
        let per_page = self.per_page.get();
        let offset = number.saturating_sub(1).saturating_mul(per_page);
        let sliced = items.into_iter().skip(offset).take(per_page).collect();
        Ok(Page {
            items: sliced,
            number,
            num_pages: self.num_pages(count),
            count,
            per_page,
        })
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    num_pages: usize,
    count: usize,
    per_page: usize,
}

impl<T> Page<T> {
    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Consume the page, keeping only its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based number of this page.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Total number of pages in the listing.
    #[must_use]
    pub const fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Number of the following page, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.number.saturating_add(1))
        } else {
            None
        }
    }

    /// Number of the preceding page, if any.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.number.saturating_sub(1))
        } else {
            None
        }
    }

    /// Whether the listing spans more than one page.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }

    /// Serialisable navigation metadata for this page.
    #[must_use]
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            number: self.number,
            num_pages: self.num_pages,
            label: self.to_string(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            next_page_number: self.next_page_number(),
            previous_page_number: self.previous_page_number(),
        }
    }

    /// Serialisable description of the paginator that produced this page.
    #[must_use]
    pub const fn paginator_summary(&self) -> PaginatorSummary {
        PaginatorSummary {
            count: self.count,
            per_page: self.per_page,
            num_pages: self.num_pages,
        }
    }

    /// Build neighbouring page URLs from the URL that served this page.
    ///
    /// Every query parameter other than `page` is preserved, so filters
    /// survive navigation.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use pagination::{PageRequest, Paginator};
    /// use url::Url;
    ///
    /// let paginator = Paginator::new(NonZeroUsize::MIN.saturating_add(1));
    /// let page = paginator
    ///     .paginate(vec!['a', 'b', 'c'], PageRequest::First)
    ///     .map_err(|err| err.to_string())?;
    /// let base = Url::parse("http://localhost/cars/?model=a").map_err(|err| err.to_string())?;
    /// let links = page.links(&base);
    /// assert_eq!(links.next.as_deref(), Some("http://localhost/cars/?model=a&page=2"));
    /// assert!(links.previous.is_none());
    /// # Ok::<(), String>(())
    /// ```
    #[must_use]
    pub fn links(&self, base: &Url) -> PageLinks {
        PageLinks {
            next: self.next_page_number().map(|number| with_page(base, number)),
            previous: self
                .previous_page_number()
                .map(|number| with_page(base, number)),
        }
    }
}

impl<T> fmt::Display for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Page {} of {}>", self.number, self.num_pages)
    }
}

fn with_page(base: &Url, number: usize) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut target = base.clone();
    target
        .query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &number.to_string());
    target.into()
}

/// Navigation metadata for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// One-based page number.
    pub number: usize,
    /// Total number of pages.
    pub num_pages: usize,
    /// Human readable label such as `<Page 1 of 2>`.
    pub label: String,
    /// Whether a following page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_previous: bool,
    /// Number of the following page.
    pub next_page_number: Option<usize>,
    /// Number of the preceding page.
    pub previous_page_number: Option<usize>,
}

/// Totals describing a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginatorSummary {
    /// Total number of items.
    pub count: usize,
    /// Maximum items per page.
    pub per_page: usize,
    /// Total number of pages.
    pub num_pages: usize,
}

/// Absolute URLs of the neighbouring pages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageLinks {
    /// URL of the following page.
    pub next: Option<String>,
    /// URL of the preceding page.
    pub previous: Option<String>,
}
