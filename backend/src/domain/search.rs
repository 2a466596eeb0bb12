//! Case-insensitive substring filters for listings.

/// Filter produced by a valid search form.
///
/// An empty filter matches everything.
///
/// # Examples
/// ```
/// use taxi_backend::domain::SearchFilter;
///
/// let filter = SearchFilter::containing("camry");
/// assert!(filter.matches("Toyota Camry"));
/// assert!(!filter.matches("Honda Civic"));
/// assert!(SearchFilter::default().matches("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Match values containing `needle`, ignoring case.
    pub fn containing(needle: &str) -> Self {
        if needle.is_empty() {
            return Self::default();
        }
        Self {
            needle: Some(needle.to_lowercase()),
        }
    }

    /// Whether `haystack` passes the filter.
    pub fn matches(&self, haystack: &str) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| haystack.to_lowercase().contains(needle))
    }
}
