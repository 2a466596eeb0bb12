//! Car create/update form.

use std::collections::BTreeSet;

use serde::Deserialize;
use utoipa::ToSchema;

use super::{FormErrors, REQUIRED_MESSAGE, required_text};
use crate::domain::{CarDraft, DriverId, ManufacturerId};

/// Maximum length of a car model.
pub const MODEL_MAX_LEN: usize = 255;

/// Submission creating or updating a car.
///
/// Whether the referenced manufacturer and drivers exist is checked by the
/// repository when the draft is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct CarForm {
    #[schema(example = "Camry")]
    pub model: Option<String>,
    #[schema(example = 1)]
    pub manufacturer: Option<u64>,
    pub drivers: Vec<u64>,
}

impl CarForm {
    /// Validate the submission into a draft.
    pub fn clean(&self) -> Result<CarDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let model = required_text(&mut errors, "model", self.model.as_deref(), MODEL_MAX_LEN);
        let manufacturer_id = match self.manufacturer {
            Some(id) => Some(ManufacturerId::new(id)),
            None => {
                errors.add("manufacturer", REQUIRED_MESSAGE);
                None
            }
        };
        let drivers: BTreeSet<DriverId> = self.drivers.iter().copied().map(DriverId::new).collect();
        let draft = model
            .zip(manufacturer_id)
            .map(|(model, manufacturer_id)| CarDraft {
                model: model.to_owned(),
                manufacturer_id,
                drivers,
            });
        errors.finish(draft)
    }
}
