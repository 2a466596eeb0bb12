//! Listing search forms.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::SearchFilter;

/// Maximum length of a search term.
pub const SEARCH_MAX_LEN: usize = 255;

/// A blank or overlong term leaves the listing unfiltered.
fn filter_for(term: Option<&str>) -> SearchFilter {
    match term {
        Some(term) if term.chars().count() <= SEARCH_MAX_LEN => SearchFilter::containing(term),
        _ => SearchFilter::default(),
    }
}

macro_rules! define_search_form {
    ($(#[$meta:meta])* $name:ident { $field:ident }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
        #[serde(default)]
        #[into_params(parameter_in = Query)]
        pub struct $name {
            pub $field: Option<String>,
        }

        impl $name {
            /// Filter for the listing.
            pub fn filter(&self) -> SearchFilter {
                filter_for(self.$field.as_deref())
            }
        }
    };
}

define_search_form! {
    /// Manufacturer listing search.
    ManufacturerSearchForm { name }
}

define_search_form! {
    /// Car listing search.
    CarSearchForm { model }
}

define_search_form! {
    /// Driver listing search.
    DriverSearchForm { username }
}
