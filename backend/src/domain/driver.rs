//! Drivers: the fleet's user accounts.

use std::fmt;

use super::{DriverId, LicenseNumber, PasswordHash};

/// A driver account.
///
/// ## Invariants
/// - `username` is unique across drivers.
/// - `license_number`, when present, is unique and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    id: DriverId,
    username: String,
    first_name: String,
    last_name: String,
    license_number: Option<LicenseNumber>,
    password: PasswordHash,
}

impl Driver {
    /// Assemble a stored driver.
    pub fn new(id: DriverId, draft: DriverDraft) -> Self {
        let DriverDraft {
            username,
            first_name,
            last_name,
            license_number,
            password,
        } = draft;
        Self {
            id,
            username,
            first_name,
            last_name,
            license_number,
            password,
        }
    }

    /// Repository identifier.
    pub fn id(&self) -> DriverId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Given name, possibly empty.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name, possibly empty.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Driving license, absent for accounts created without one.
    pub fn license_number(&self) -> Option<&LicenseNumber> {
        self.license_number.as_ref()
    }

    /// Replace the license number.
    pub fn set_license_number(&mut self, license_number: LicenseNumber) {
        self.license_number = Some(license_number);
    }

    /// Check a login password.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    /// Canonical detail URL.
    ///
    /// # Examples
    /// ```
    /// use taxi_backend::domain::{Driver, DriverDraft, DriverId, PasswordHash};
    ///
    /// let driver = Driver::new(
    ///     DriverId::new(1),
    ///     DriverDraft::new("test", PasswordHash::derive("test123")),
    /// );
    /// assert_eq!(driver.absolute_url(), "/drivers/1/");
    /// ```
    pub fn absolute_url(&self) -> String {
        format!("/drivers/{}/", self.id)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.username, self.first_name, self.last_name
        )
    }
}

/// Field values for creating a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<LicenseNumber>,
    pub password: PasswordHash,
}

impl DriverDraft {
    /// Draft with only the required account fields set.
    pub fn new(username: impl Into<String>, password: PasswordHash) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            license_number: None,
            password,
        }
    }

    /// Set the given and family names.
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the license number.
    pub fn with_license_number(mut self, license_number: LicenseNumber) -> Self {
        self.license_number = Some(license_number);
        self
    }
}
