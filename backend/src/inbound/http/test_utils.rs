//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};

use crate::Trace;
use crate::domain::ports::{DriverLoginService, DriverRepository};
use crate::domain::{Driver, DriverDraft, PasswordHash};
use crate::inbound::http::routes;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryFleetStore;

pub const TEST_USERNAME: &str = "testuser";
pub const TEST_PASSWORD: &str = "testpassword";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Login submission for `username`.
pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/accounts/login/")
        .set_json(serde_json::json!({ "username": username, "password": password }))
}

/// In-memory fleet with one driver who can log in.
pub struct TestFleet {
    pub store: Arc<InMemoryFleetStore>,
    pub state: HttpState,
    pub driver: Driver,
}

impl TestFleet {
    /// Seed `testuser` / `testpassword`.
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryFleetStore::new());
        let driver = DriverRepository::create(
            store.as_ref(),
            DriverDraft::new(TEST_USERNAME, PasswordHash::derive(TEST_PASSWORD)),
        )
        .await
        .expect("seed driver");
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(DriverLoginService::new(store.clone())),
            manufacturers: store.clone(),
            cars: store.clone(),
            drivers: store.clone(),
        });
        Self {
            store,
            state,
            driver,
        }
    }

    /// Application with every fleet route mounted.
    ///
    /// The returned app owns a clone of the state and does not borrow the
    /// fleet.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(test_session_middleware())
            .wrap(Trace)
            .configure(routes::configure)
    }

    /// Log the seeded driver in and return the session cookie.
    pub async fn login(
        &self,
        app: &impl Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Cookie<'static> {
        let res = test::call_service(app, login_request(TEST_USERNAME, TEST_PASSWORD).to_request())
            .await;
        assert!(res.status().is_redirection(), "login failed: {}", res.status());
        session_cookie(&res).expect("session cookie")
    }
}

/// Send `req` with `cookie`, keeping `cookie` up to date with the response.
pub async fn call_with_session(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &mut Cookie<'static>,
    req: test::TestRequest,
) -> ServiceResponse {
    let res = test::call_service(app, req.cookie(cookie.clone()).to_request()).await;
    if let Some(updated) = session_cookie(&res) {
        *cookie = updated;
    }
    res
}

mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn app_outlives_the_fleet_that_built_it() {
        let app = {
            let fleet = TestFleet::new().await;
            fleet.app()
        };
        let app = test::init_service(app).await;

        let res = test::call_service(&app, login_request(TEST_USERNAME, TEST_PASSWORD).to_request())
            .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert!(session_cookie(&res).is_some());
    }
}
