//! Input forms binding untrusted submissions to domain drafts.
//!
//! Each form holds the raw submitted values (every field optional, so a
//! missing field is reported rather than rejected by the decoder) and a
//! `clean` method returning either a domain draft or the per-field errors.

mod car;
mod driver;
mod manufacturer;
mod search;

pub use car::CarForm;
pub use driver::{DriverCreationForm, DriverLicenseUpdateForm};
pub use manufacturer::ManufacturerForm;
pub use search::{CarSearchForm, DriverSearchForm, ManufacturerSearchForm, SEARCH_MAX_LEN};

use std::collections::BTreeMap;

use serde_json::json;

use super::Error;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";
pub(crate) const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Per-field validation messages collected while cleaning a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    /// Record a message against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields with errors.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Return `value` when no errors were recorded.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

impl From<FormErrors> for Error {
    fn from(errors: FormErrors) -> Self {
        Error::invalid_request("form submission is invalid")
            .with_details(json!({ "field_errors": errors.0 }))
    }
}

/// Required text field; surrounding whitespace is stripped.
pub(crate) fn required_text<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&'a str>,
    max_len: usize,
) -> Option<&'a str> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
        Some(text) => within_max_len(errors, field, text, max_len).then_some(text),
    }
}

/// Optional text field; absent values become the empty string.
pub(crate) fn optional_text<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&'a str>,
    max_len: usize,
) -> Option<&'a str> {
    let text = value.map_or("", str::trim);
    within_max_len(errors, field, text, max_len).then_some(text)
}

fn within_max_len(errors: &mut FormErrors, field: &'static str, text: &str, max_len: usize) -> bool {
    let length = text.chars().count();
    if length > max_len {
        errors.add(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {length})."),
        );
        return false;
    }
    true
}
