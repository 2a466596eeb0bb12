//! Car manufacturers.

use std::fmt;

use super::ManufacturerId;

/// A car manufacturer. Names are unique across the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manufacturer {
    id: ManufacturerId,
    name: String,
    country: String,
}

impl Manufacturer {
    /// Assemble a stored manufacturer.
    pub fn new(id: ManufacturerId, draft: ManufacturerDraft) -> Self {
        let ManufacturerDraft { name, country } = draft;
        Self { id, name, country }
    }

    /// Repository identifier.
    pub fn id(&self) -> ManufacturerId {
        self.id
    }

    /// Unique manufacturer name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Country of origin.
    pub fn country(&self) -> &str {
        self.country.as_str()
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

/// Field values for creating or replacing a manufacturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerDraft {
    pub name: String,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_name_and_country() {
        let manufacturer = Manufacturer::new(
            ManufacturerId::new(1),
            ManufacturerDraft {
                name: "Test Name".to_owned(),
                country: "Test Country".to_owned(),
            },
        );
        assert_eq!(manufacturer.to_string(), "Test Name Test Country");
    }
}
