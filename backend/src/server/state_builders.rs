//! Builders for HTTP state and startup data.

use std::num::NonZeroUsize;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use taxi_backend::domain::ports::{DriverLoginService, DriverRepository, map_repository_error};
use taxi_backend::domain::{Driver, DriverDraft, Error, PasswordHash};
use taxi_backend::inbound::http::state::{HttpState, HttpStatePorts};
use taxi_backend::outbound::memory::InMemoryFleetStore;

/// Wire every port of the HTTP state to the shared fleet store.
pub fn build_http_state(
    store: &Arc<InMemoryFleetStore>,
    page_size: NonZeroUsize,
) -> web::Data<HttpState> {
    let state = HttpState::new(HttpStatePorts {
        login: Arc::new(DriverLoginService::new(store.clone())),
        manufacturers: store.clone(),
        cars: store.clone(),
        drivers: store.clone(),
    })
    .with_page_size(page_size);
    web::Data::new(state)
}

/// Create the startup driver account unless the username is already taken.
///
/// Returns the created driver, or `None` when it already existed.
pub async fn bootstrap_admin(
    drivers: &dyn DriverRepository,
    username: &str,
    password: &str,
) -> Result<Option<Driver>, Error> {
    let username = username.trim();
    if drivers
        .find_by_username(username)
        .await
        .map_err(map_repository_error)?
        .is_some()
    {
        info!(%username, "startup driver already present");
        return Ok(None);
    }

    let driver = drivers
        .create(DriverDraft::new(username, PasswordHash::derive(password)))
        .await
        .map_err(map_repository_error)?;
    info!(%username, driver_id = %driver.id(), "created startup driver");
    Ok(Some(driver))
}
