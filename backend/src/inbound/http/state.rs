//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::num::NonZeroUsize;
use std::sync::Arc;

use pagination::Paginator;

use crate::domain::ports::{CarRepository, DriverRepository, LoginService, ManufacturerRepository};
use crate::domain::{LicenseNumberValidator, StrictLicenseNumberValidator};

/// Listing page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub manufacturers: Arc<dyn ManufacturerRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub drivers: Arc<dyn DriverRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub manufacturers: Arc<dyn ManufacturerRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub license_validator: Arc<dyn LicenseNumberValidator>,
    pub paginator: Paginator,
}

impl HttpState {
    /// Construct state with the strict license validator and the default
    /// page size.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use taxi_backend::domain::ports::DriverLoginService;
    /// use taxi_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use taxi_backend::outbound::memory::InMemoryFleetStore;
    ///
    /// let store = Arc::new(InMemoryFleetStore::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(DriverLoginService::new(store.clone())),
    ///     manufacturers: store.clone(),
    ///     cars: store.clone(),
    ///     drivers: store,
    /// });
    /// assert_eq!(state.paginator.per_page().get(), 5);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            manufacturers,
            cars,
            drivers,
        } = ports;
        Self {
            login,
            manufacturers,
            cars,
            drivers,
            license_validator: Arc::new(StrictLicenseNumberValidator),
            paginator: Paginator::new(DEFAULT_PAGE_SIZE),
        }
    }

    /// Replace the listing page size.
    #[must_use]
    pub fn with_page_size(mut self, per_page: NonZeroUsize) -> Self {
        self.paginator = Paginator::new(per_page);
        self
    }

    /// Replace the license number validator used by the driver forms.
    #[must_use]
    pub fn with_license_validator(mut self, validator: Arc<dyn LicenseNumberValidator>) -> Self {
        self.license_validator = validator;
        self
    }
}
