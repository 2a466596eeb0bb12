//! Login enforcement for HTTP handlers.
//!
//! Handlers that need a logged-in driver take [`AuthenticatedDriver`] as
//! their first argument. Anonymous requests are answered with a redirect to
//! the login page carrying the original path in `next`.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;
use url::form_urlencoded;

use crate::domain::ports::map_repository_error;
use crate::domain::{DriverId, Error};

use super::session::SessionContext;
use super::state::HttpState;

/// Path of the login page.
pub const LOGIN_URL: &str = "/accounts/login/";

/// Login page URL returning to `next` once authenticated.
///
/// # Examples
/// ```
/// use taxi_backend::inbound::http::auth::login_url;
///
/// assert_eq!(login_url("/"), "/accounts/login/?next=%2F");
/// assert_eq!(login_url("/cars/?page=2"), "/accounts/login/?next=%2Fcars%2F%3Fpage%3D2");
/// ```
pub fn login_url(next: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("{LOGIN_URL}?next={encoded}")
}

/// Local path to continue to after login; anything else falls back to `/`.
///
/// A local path starts with a single `/` and contains no control characters
/// and no backslashes; browsers read `/\host` as `//host`.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/",
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c == '\\' || c.is_control())
}

/// Anonymous request to a page that needs a logged-in driver.
#[derive(Debug, thiserror::Error)]
#[error("login required to access {next}")]
pub struct LoginRequired {
    next: String,
}

impl LoginRequired {
    fn for_request(req: &HttpRequest) -> Self {
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        Self { next }
    }

    /// Location the client is redirected to.
    pub fn location(&self) -> String {
        login_url(&self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}

/// Identifier of the driver logged in on the current session.
///
/// Sessions pointing at a deleted driver are treated as anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedDriver(DriverId);

impl AuthenticatedDriver {
    /// Logged-in driver id.
    pub fn id(self) -> DriverId {
        self.0
    }
}

impl FromRequest for AuthenticatedDriver {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let login_required = LoginRequired::for_request(req);
        Box::pin(async move {
            let session = session.await?;
            let Some(driver_id) = session.driver_id()? else {
                return Err(login_required.into());
            };
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let driver = state
                .drivers
                .find_by_id(driver_id)
                .await
                .map_err(map_repository_error)?;
            match driver {
                Some(driver) => Ok(Self(driver.id())),
                None => {
                    debug!(driver_id = %driver_id, "session refers to a deleted driver");
                    session.purge();
                    Err(login_required.into())
                }
            }
        })
    }
}
