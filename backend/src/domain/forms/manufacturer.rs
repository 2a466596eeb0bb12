//! Manufacturer create/update form.

use serde::Deserialize;
use utoipa::ToSchema;

use super::{FormErrors, required_text};
use crate::domain::ManufacturerDraft;

/// Maximum length of manufacturer names and countries.
pub const MANUFACTURER_FIELD_MAX_LEN: usize = 255;

/// Submission creating or updating a manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct ManufacturerForm {
    #[schema(example = "Toyota")]
    pub name: Option<String>,
    #[schema(example = "Japan")]
    pub country: Option<String>,
}

impl ManufacturerForm {
    /// Validate the submission into a draft.
    pub fn clean(&self) -> Result<ManufacturerDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            MANUFACTURER_FIELD_MAX_LEN,
        );
        let country = required_text(
            &mut errors,
            "country",
            self.country.as_deref(),
            MANUFACTURER_FIELD_MAX_LEN,
        );
        let draft = name.zip(country).map(|(name, country)| ManufacturerDraft {
            name: name.to_owned(),
            country: country.to_owned(),
        });
        errors.finish(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_submission_becomes_draft() {
        let form = ManufacturerForm {
            name: Some(" Toyota ".to_owned()),
            country: Some("Japan".to_owned()),
        };
        let draft = form.clean().expect("valid form");
        assert_eq!(draft.name, "Toyota");
        assert_eq!(draft.country, "Japan");
    }

    #[rstest]
    #[case(None, Some("Japan"), "name")]
    #[case(Some("Toyota"), None, "country")]
    #[case(Some("Toyota"), Some(""), "country")]
    fn missing_fields_are_reported(
        #[case] name: Option<&str>,
        #[case] country: Option<&str>,
        #[case] field: &str,
    ) {
        let form = ManufacturerForm {
            name: name.map(str::to_owned),
            country: country.map(str::to_owned),
        };
        let errors = form.clean().expect_err("incomplete form rejected");
        assert!(errors.field(field).is_some());
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let form = ManufacturerForm {
            name: Some("x".repeat(MANUFACTURER_FIELD_MAX_LEN + 1)),
            country: Some("Japan".to_owned()),
        };
        assert!(form.clean().is_err());
    }
}
