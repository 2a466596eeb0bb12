//! Driver account forms.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;

use super::{FormErrors, REQUIRED_MESSAGE, optional_text, required_text};
use crate::domain::{
    DriverDraft, LicenseNumber, LicenseNumberValidator, PasswordHash,
    StrictLicenseNumberValidator,
};

const USERNAME_FIELD: &str = "username";
const PASSWORD1_FIELD: &str = "password1";
const PASSWORD2_FIELD: &str = "password2";
const FIRST_NAME_FIELD: &str = "first_name";
const LAST_NAME_FIELD: &str = "last_name";
const LICENSE_NUMBER_FIELD: &str = "license_number";

/// Maximum length of usernames and personal names.
pub const NAME_MAX_LEN: usize = 150;
/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new(r"^[\w.@+-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Submission creating a new driver account.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct DriverCreationForm {
    #[schema(example = "testuser")]
    pub username: Option<String>,
    pub password1: Option<String>,
    pub password2: Option<String>,
    #[schema(example = "Billy")]
    pub first_name: Option<String>,
    #[schema(example = "Bonce")]
    pub last_name: Option<String>,
    #[schema(example = "ABC12345")]
    pub license_number: Option<String>,
}

impl DriverCreationForm {
    /// Clean the submission with the strict license number rules.
    pub fn clean(&self) -> Result<DriverDraft, FormErrors> {
        self.clean_with(&StrictLicenseNumberValidator)
    }

    /// Clean the submission, delegating the license number to `validator`.
    ///
    /// Every field is checked so the caller receives all errors at once.
    pub fn clean_with(
        &self,
        validator: &dyn LicenseNumberValidator,
    ) -> Result<DriverDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let username = clean_username(&mut errors, self.username.as_deref());
        let password = clean_passwords(
            &mut errors,
            self.password1.as_deref(),
            self.password2.as_deref(),
        );
        let first_name = optional_text(
            &mut errors,
            FIRST_NAME_FIELD,
            self.first_name.as_deref(),
            NAME_MAX_LEN,
        );
        let last_name = optional_text(
            &mut errors,
            LAST_NAME_FIELD,
            self.last_name.as_deref(),
            NAME_MAX_LEN,
        );
        let license_number =
            clean_license_number(&mut errors, validator, self.license_number.as_deref());

        let draft = match (username, password, first_name, last_name, license_number) {
            (Some(username), Some(password), Some(first_name), Some(last_name), Some(license))
                if errors.is_empty() =>
            {
                Some(
                    DriverDraft::new(username, PasswordHash::derive(password))
                        .with_names(first_name, last_name)
                        .with_license_number(license),
                )
            }
            _ => None,
        };
        errors.finish(draft)
    }

    /// Whether the submission passes the strict rules.
    pub fn is_valid(&self) -> bool {
        self.clean().is_ok()
    }
}

impl fmt::Debug for DriverCreationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverCreationForm")
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("license_number", &self.license_number)
            .finish_non_exhaustive()
    }
}

/// Submission replacing a driver's license number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct DriverLicenseUpdateForm {
    #[schema(example = "ABC12345")]
    pub license_number: Option<String>,
}

impl DriverLicenseUpdateForm {
    /// Clean the submission with the strict license number rules.
    pub fn clean(&self) -> Result<LicenseNumber, FormErrors> {
        self.clean_with(&StrictLicenseNumberValidator)
    }

    /// Clean the submission, delegating the license number to `validator`.
    pub fn clean_with(
        &self,
        validator: &dyn LicenseNumberValidator,
    ) -> Result<LicenseNumber, FormErrors> {
        let mut errors = FormErrors::default();
        let license_number =
            clean_license_number(&mut errors, validator, self.license_number.as_deref());
        errors.finish(license_number)
    }

    /// Whether the submission passes the strict rules.
    pub fn is_valid(&self) -> bool {
        self.clean().is_ok()
    }
}

fn clean_username<'a>(errors: &mut FormErrors, value: Option<&'a str>) -> Option<&'a str> {
    let username = required_text(errors, USERNAME_FIELD, value, NAME_MAX_LEN)?;
    if !username_regex().is_match(username) {
        errors.add(
            USERNAME_FIELD,
            "Enter a valid username. This value may contain only letters, numbers, and \
             @/./+/-/_ characters.",
        );
        return None;
    }
    Some(username)
}

fn clean_passwords<'a>(
    errors: &mut FormErrors,
    password1: Option<&'a str>,
    password2: Option<&str>,
) -> Option<&'a str> {
    let first = present(errors, PASSWORD1_FIELD, password1);
    let second = present(errors, PASSWORD2_FIELD, password2);
    let (first, second) = (first?, second?);
    if first != second {
        errors.add(PASSWORD2_FIELD, "The two password fields didn't match.");
        return None;
    }
    if first.chars().count() < PASSWORD_MIN_LEN {
        errors.add(
            PASSWORD2_FIELD,
            format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LEN} \
                 characters."
            ),
        );
        return None;
    }
    Some(first)
}

/// The license number is handed to the validator exactly as submitted.
fn clean_license_number(
    errors: &mut FormErrors,
    validator: &dyn LicenseNumberValidator,
    value: Option<&str>,
) -> Option<LicenseNumber> {
    let raw = present(errors, LICENSE_NUMBER_FIELD, value)?;
    match validator.validate(raw) {
        Ok(license_number) => Some(license_number),
        Err(error) => {
            errors.add(LICENSE_NUMBER_FIELD, error.to_string());
            None
        }
    }
}

/// Required field whose value must not be trimmed.
fn present<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Some(raw),
        _ => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}
