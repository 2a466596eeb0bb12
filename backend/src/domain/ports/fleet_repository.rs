//! Driven ports for fleet persistence.
//!
//! One error type is shared by the manufacturer, car and driver
//! repositories because adapters usually back all three with the same store
//! and report the same failure modes. Listings are returned whole, already
//! ordered; pagination happens in the caller.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::forms::INVALID_CHOICE_MESSAGE;
use crate::domain::{
    AssignmentChange, Car, CarDraft, CarId, Driver, DriverDraft, DriverId, Error, LicenseNumber,
    Manufacturer, ManufacturerDraft, ManufacturerId, SearchFilter,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by fleet repository adapters.
    pub enum FleetRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } => "fleet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "fleet repository query failed: {message}",
        /// Record to update or delete does not exist.
        NotFound { entity: String, id: u64 } => "{entity} {id} not found",
        /// Unique field already holds the submitted value.
        Duplicate { field: String, message: String } => "{field}: {message}",
        /// Draft refers to a record that does not exist.
        MissingReference { field: String, id: u64 } => "{field} refers to unknown id {id}",
    }
}

/// Translate a repository failure into the domain error envelope.
///
/// Duplicates and dangling references are reported against the offending
/// form field so clients can render them next to the input.
pub fn map_repository_error(error: FleetRepositoryError) -> Error {
    match error {
        FleetRepositoryError::Connection { message } => {
            Error::internal(format!("fleet repository unavailable: {message}"))
        }
        FleetRepositoryError::Query { message } => {
            Error::internal(format!("fleet repository error: {message}"))
        }
        FleetRepositoryError::NotFound { entity, id } => {
            Error::not_found(format!("{entity} {id} not found"))
        }
        FleetRepositoryError::Duplicate { field, message } => {
            Error::invalid_request("form submission is invalid")
                .with_details(json!({ "field_errors": { field: [message] } }))
        }
        FleetRepositoryError::MissingReference { field, .. } => {
            Error::invalid_request("form submission is invalid").with_details(
                json!({ "field_errors": { field: [INVALID_CHOICE_MESSAGE] } }),
            )
        }
    }
}

/// Manufacturer storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManufacturerRepository: Send + Sync {
    /// Number of stored manufacturers.
    async fn count(&self) -> Result<usize, FleetRepositoryError>;

    /// Manufacturers whose name passes `filter`, ordered by name.
    async fn list(&self, filter: &SearchFilter)
    -> Result<Vec<Manufacturer>, FleetRepositoryError>;

    /// Fetch a manufacturer by identifier.
    async fn find_by_id(
        &self,
        id: ManufacturerId,
    ) -> Result<Option<Manufacturer>, FleetRepositoryError>;

    /// Store a new manufacturer. Names are unique.
    async fn create(&self, draft: ManufacturerDraft)
    -> Result<Manufacturer, FleetRepositoryError>;

    /// Replace the fields of an existing manufacturer.
    async fn update(
        &self,
        id: ManufacturerId,
        draft: ManufacturerDraft,
    ) -> Result<Manufacturer, FleetRepositoryError>;

    /// Delete a manufacturer together with its cars.
    async fn delete(&self, id: ManufacturerId) -> Result<(), FleetRepositoryError>;
}

/// Car storage, including the driver assignments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Number of stored cars.
    async fn count(&self) -> Result<usize, FleetRepositoryError>;

    /// Cars whose model passes `filter`, ordered by id.
    async fn list(&self, filter: &SearchFilter) -> Result<Vec<Car>, FleetRepositoryError>;

    /// Cars the driver is assigned to, ordered by id.
    async fn list_for_driver(&self, driver: DriverId) -> Result<Vec<Car>, FleetRepositoryError>;

    /// Fetch a car by identifier.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, FleetRepositoryError>;

    /// Store a new car. The manufacturer and every driver must exist.
    async fn create(&self, draft: CarDraft) -> Result<Car, FleetRepositoryError>;

    /// Replace the fields and assignments of an existing car.
    async fn update(&self, id: CarId, draft: CarDraft) -> Result<Car, FleetRepositoryError>;

    /// Delete a car and its assignments.
    async fn delete(&self, id: CarId) -> Result<(), FleetRepositoryError>;

    /// Add `driver` to the car, or remove it when already assigned.
    async fn toggle_driver(
        &self,
        id: CarId,
        driver: DriverId,
    ) -> Result<AssignmentChange, FleetRepositoryError>;
}

/// Driver account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Number of stored drivers.
    async fn count(&self) -> Result<usize, FleetRepositoryError>;

    /// Drivers whose username passes `filter`, ordered by username.
    async fn list(&self, filter: &SearchFilter) -> Result<Vec<Driver>, FleetRepositoryError>;

    /// Fetch a driver by identifier.
    async fn find_by_id(&self, id: DriverId) -> Result<Option<Driver>, FleetRepositoryError>;

    /// Fetch a driver by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Driver>, FleetRepositoryError>;

    /// Store a new driver. Usernames and license numbers are unique.
    async fn create(&self, draft: DriverDraft) -> Result<Driver, FleetRepositoryError>;

    /// Replace a driver's license number.
    async fn update_license_number(
        &self,
        id: DriverId,
        license_number: LicenseNumber,
    ) -> Result<Driver, FleetRepositoryError>;

    /// Delete a driver and drop it from every car.
    async fn delete(&self, id: DriverId) -> Result<(), FleetRepositoryError>;
}
