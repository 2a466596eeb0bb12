//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call [`LoginService`] to authenticate credentials
//! without knowing the backing store, so handler tests can substitute a
//! double instead of wiring persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{DriverId, Error, LoginCredentials};

use super::{DriverRepository, map_repository_error};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated driver id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<DriverId, Error>;
}

/// Authenticates drivers against their stored password digests.
pub struct DriverLoginService<R: ?Sized> {
    drivers: Arc<R>,
}

impl<R: ?Sized> DriverLoginService<R> {
    /// Create a login service reading accounts from `drivers`.
    pub fn new(drivers: Arc<R>) -> Self {
        Self { drivers }
    }
}

#[async_trait]
impl<R> LoginService for DriverLoginService<R>
where
    R: DriverRepository + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<DriverId, Error> {
        let driver = self
            .drivers
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?;
        match driver {
            Some(driver) if driver.check_password(credentials.password()) => Ok(driver.id()),
            _ => {
                debug!(username = credentials.username(), "login rejected");
                Err(Error::unauthorized(
                    "Please enter a correct username and password. Note that both fields may \
                     be case-sensitive.",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FleetRepositoryError, MockDriverRepository};
    use crate::domain::{Driver, DriverDraft, ErrorCode, PasswordHash};
    use rstest::rstest;

    fn stored_driver() -> Driver {
        Driver::new(
            DriverId::new(7),
            DriverDraft::new("admin", PasswordHash::derive("password123")),
        )
    }

    #[rstest]
    #[case("admin", "password123", true)]
    #[case("admin", "wrong-password", false)]
    #[tokio::test]
    async fn authenticates_against_stored_digest(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let mut repo = MockDriverRepository::new();
        repo.expect_find_by_username()
            .withf(|username| username == "admin")
            .times(1)
            .returning(|_| Ok(Some(stored_driver())));
        let service = DriverLoginService::new(Arc::new(repo));
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");

        match (should_succeed, service.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id, DriverId::new(7)),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_usernames_are_unauthorised() {
        let mut repo = MockDriverRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        let service = DriverLoginService::new(Arc::new(repo));
        let creds = LoginCredentials::try_from_parts("ghost", "password123").expect("shape");

        let err = service.authenticate(&creds).await.expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_surface_as_internal_errors() {
        let mut repo = MockDriverRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(FleetRepositoryError::connection("offline")));
        let service = DriverLoginService::new(Arc::new(repo));
        let creds = LoginCredentials::try_from_parts("admin", "password123").expect("shape");

        let err = service.authenticate(&creds).await.expect_err("store offline");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
