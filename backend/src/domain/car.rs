//! Cars and their driver assignments.

use std::collections::BTreeSet;
use std::fmt;

use super::{CarId, DriverId, ManufacturerId};

/// Outcome of toggling a driver on a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    /// The driver was added to the car.
    Assigned,
    /// The driver was removed from the car.
    Unassigned,
}

/// A fleet car. The car owns the driver side of the many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id: CarId,
    model: String,
    manufacturer_id: ManufacturerId,
    drivers: BTreeSet<DriverId>,
}

impl Car {
    /// Assemble a stored car.
    pub fn new(id: CarId, draft: CarDraft) -> Self {
        let CarDraft {
            model,
            manufacturer_id,
            drivers,
        } = draft;
        Self {
            id,
            model,
            manufacturer_id,
            drivers,
        }
    }

    /// Repository identifier.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Model name.
    pub fn model(&self) -> &str {
        self.model.as_str()
    }

    /// Manufacturer that built the car.
    pub fn manufacturer_id(&self) -> ManufacturerId {
        self.manufacturer_id
    }

    /// Drivers assigned to the car.
    pub fn drivers(&self) -> &BTreeSet<DriverId> {
        &self.drivers
    }

    /// Whether `driver` is assigned to the car.
    pub fn is_assigned_to(&self, driver: DriverId) -> bool {
        self.drivers.contains(&driver)
    }

    /// Assign `driver` if absent, otherwise unassign it.
    pub fn toggle_driver(&mut self, driver: DriverId) -> AssignmentChange {
        if self.drivers.remove(&driver) {
            AssignmentChange::Unassigned
        } else {
            self.drivers.insert(driver);
            AssignmentChange::Assigned
        }
    }

    /// Drop `driver` from the assignment set.
    pub fn unassign(&mut self, driver: DriverId) {
        self.drivers.remove(&driver);
    }

    /// Canonical detail URL.
    pub fn absolute_url(&self) -> String {
        format!("/cars/{}/", self.id)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

/// Field values for creating or replacing a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    pub model: String,
    pub manufacturer_id: ManufacturerId,
    pub drivers: BTreeSet<DriverId>,
}
