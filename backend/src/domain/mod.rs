//! Domain primitives, forms and ports.
//!
//! Purpose: define the fleet entities (manufacturers, cars, drivers), the
//! rules their inputs must satisfy, and the ports adapters implement. Types
//! here know nothing about HTTP or storage.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Manufacturer, Car, Driver: stored entities with their drafts and ids.
//! - LicenseNumber and its validator seam.
//! - forms: untrusted submissions cleaned into drafts.
//! - ports: repository and login traits.

mod auth;
mod car;
mod driver;
pub mod error;
pub mod forms;
mod ids;
mod license_number;
mod manufacturer;
mod password;
pub mod ports;
mod search;
mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::car::{AssignmentChange, Car, CarDraft};
pub use self::driver::{Driver, DriverDraft};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ids::{CarId, DriverId, ManufacturerId};
#[cfg(test)]
pub use self::license_number::MockLicenseNumberValidator;
pub use self::license_number::{
    LICENSE_NUMBER_LEN, LICENSE_PREFIX_LEN, LicenseNumber, LicenseNumberError,
    LicenseNumberValidator, StrictLicenseNumberValidator, validate_license_number,
};
pub use self::manufacturer::{Manufacturer, ManufacturerDraft};
pub use self::password::PasswordHash;
pub use self::search::SearchFilter;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use taxi_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
