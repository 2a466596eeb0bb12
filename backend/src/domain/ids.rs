//! Integer identifiers for fleet entities.
//!
//! Identifiers are allocated by the repository, starting at 1, and appear
//! verbatim in URLs such as `/drivers/1/`.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a [`Manufacturer`](super::Manufacturer).
    ManufacturerId
}

define_entity_id! {
    /// Identifier of a [`Car`](super::Car).
    CarId
}

define_entity_id! {
    /// Identifier of a [`Driver`](super::Driver).
    DriverId
}
