//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod fleet_repository;
mod login_service;

#[cfg(test)]
pub use fleet_repository::{
    MockCarRepository, MockDriverRepository, MockManufacturerRepository,
};
pub use fleet_repository::{
    CarRepository, DriverRepository, FleetRepositoryError, ManufacturerRepository,
    map_repository_error,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DriverLoginService, LoginService};
