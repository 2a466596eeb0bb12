//! Driver license numbers.
//!
//! A license number is exactly eight characters: three uppercase ASCII
//! letters followed by five ASCII digits, e.g. `ABC12345`. The rules are
//! checked in a fixed order (length, prefix, suffix) and the first failing
//! rule decides the reported error.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Total number of characters in a license number.
pub const LICENSE_NUMBER_LEN: usize = 8;
/// Number of leading uppercase letters.
pub const LICENSE_PREFIX_LEN: usize = 3;

/// Structural rule violated by a candidate license number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LicenseNumberError {
    /// The value is not eight characters long.
    #[error("License number should consist of 8 characters")]
    InvalidLength,
    /// The first three characters are not all uppercase letters.
    #[error("First 3 characters should be uppercase letters")]
    InvalidPrefix,
    /// The last five characters are not all digits.
    #[error("Last 5 characters should be digits")]
    InvalidSuffix,
}

/// Check `value` against the license number rules.
///
/// Returns the input unchanged when it is acceptable, so the call can sit in
/// a validation chain.
///
/// # Errors
/// Returns the first violated rule, in length, prefix, suffix order.
///
/// # Examples
/// ```
/// use taxi_backend::domain::{validate_license_number, LicenseNumberError};
///
/// assert_eq!(validate_license_number("ABC12345"), Ok("ABC12345"));
/// assert_eq!(
///     validate_license_number("12345678"),
///     Err(LicenseNumberError::InvalidPrefix)
/// );
/// ```
pub fn validate_license_number(value: &str) -> Result<&str, LicenseNumberError> {
    if value.chars().count() != LICENSE_NUMBER_LEN {
        return Err(LicenseNumberError::InvalidLength);
    }
    if !value
        .chars()
        .take(LICENSE_PREFIX_LEN)
        .all(|c| c.is_ascii_uppercase())
    {
        return Err(LicenseNumberError::InvalidPrefix);
    }
    if !value
        .chars()
        .skip(LICENSE_PREFIX_LEN)
        .all(|c| c.is_ascii_digit())
    {
        return Err(LicenseNumberError::InvalidSuffix);
    }
    Ok(value)
}

/// A license number that satisfied [`validate_license_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseNumber(String);

impl LicenseNumber {
    /// Validate and wrap a license number.
    ///
    /// # Errors
    /// See [`validate_license_number`].
    pub fn parse(value: impl Into<String>) -> Result<Self, LicenseNumberError> {
        let raw = value.into();
        validate_license_number(&raw)?;
        Ok(Self(raw))
    }

    /// Borrow the license number.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LicenseNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LicenseNumber> for String {
    fn from(value: LicenseNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for LicenseNumber {
    type Error = LicenseNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Validation seam used by the driver forms.
///
/// Forms receive the validator as a parameter so callers can observe or
/// replace the check; production code uses [`StrictLicenseNumberValidator`].
#[cfg_attr(test, mockall::automock)]
pub trait LicenseNumberValidator: Send + Sync {
    /// Validate the submitted field value.
    fn validate(&self, value: &str) -> Result<LicenseNumber, LicenseNumberError>;
}

/// Default validator applying [`validate_license_number`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictLicenseNumberValidator;

impl LicenseNumberValidator for StrictLicenseNumberValidator {
    fn validate(&self, value: &str) -> Result<LicenseNumber, LicenseNumberError> {
        LicenseNumber::parse(value)
    }
}
