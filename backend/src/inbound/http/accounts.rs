//! Account endpoints.
//!
//! ```text
//! GET  /accounts/login/?next=/cars/
//! POST /accounts/login/ {"username":"testuser","password":"testpassword"}
//! POST /accounts/logout/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::auth::{LOGIN_URL, safe_next};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect_to};

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "testuser")]
    pub username: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Where to continue after logging in.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextQuery {
    /// Local path to redirect to; defaults to `/`.
    #[param(example = "/cars/")]
    pub next: Option<String>,
}

/// Description of the login form.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub fields: Vec<&'static str>,
    pub next: String,
}

/// Describe the login form.
#[utoipa::path(
    get,
    path = "/accounts/login/",
    params(NextQuery),
    responses((status = 200, description = "Login form", body = LoginPage)),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/accounts/login/")]
pub async fn login_form(query: web::Query<NextQuery>) -> web::Json<LoginPage> {
    web::Json(LoginPage {
        fields: vec!["username", "password"],
        next: safe_next(query.next.as_deref()).to_owned(),
    })
}

/// Authenticate a driver and establish a session.
#[utoipa::path(
    post,
    path = "/accounts/login/",
    params(NextQuery),
    request_body = LoginRequest,
    responses(
        (status = 302, description = "Logged in; redirect to `next`", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/accounts/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let driver_id = state.login.authenticate(&credentials).await?;
    session.persist_driver(driver_id)?;
    info!(driver_id = %driver_id, "driver logged in");
    Ok(redirect_to(safe_next(query.next.as_deref())))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field_errors": { err.field(): ["This field is required."] }
    }))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/accounts/logout/",
    responses((status = 302, description = "Logged out; redirect to the login page")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/accounts/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect_to(LOGIN_URL)
}
