//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every fleet endpoint from the inbound layer together
//! with the request and response bodies they exchange and the session cookie
//! security scheme. Swagger UI serves the document in debug builds.

use crate::domain::forms::{
    CarForm, CarSearchForm, DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm,
    ManufacturerForm, ManufacturerSearchForm,
};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{LoginPage, LoginRequest};
use crate::inbound::http::cars::{CarBody, CarDetailResponse, CarListResponse};
use crate::inbound::http::drivers::{DriverBody, DriverDetailResponse, DriverListResponse};
use crate::inbound::http::index::IndexResponse;
use crate::inbound::http::listing::{ListingMeta, PageBody, PaginatorBody};
use crate::inbound::http::manufacturers::{ManufacturerBody, ManufacturerListResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /accounts/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the fleet API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Taxi fleet API",
        description = "Session-authenticated management of manufacturers, cars and drivers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::manufacturers::list_manufacturers,
        crate::inbound::http::manufacturers::create_manufacturer,
        crate::inbound::http::manufacturers::update_manufacturer,
        crate::inbound::http::manufacturers::delete_manufacturer,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::car_detail,
        crate::inbound::http::cars::create_car,
        crate::inbound::http::cars::update_car,
        crate::inbound::http::cars::delete_car,
        crate::inbound::http::cars::toggle_assign,
        crate::inbound::http::drivers::list_drivers,
        crate::inbound::http::drivers::driver_detail,
        crate::inbound::http::drivers::create_driver,
        crate::inbound::http::drivers::update_driver_license,
        crate::inbound::http::drivers::delete_driver,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        LoginPage,
        IndexResponse,
        PaginatorBody,
        PageBody,
        ListingMeta,
        ManufacturerForm,
        ManufacturerSearchForm,
        ManufacturerBody,
        ManufacturerListResponse,
        CarForm,
        CarSearchForm,
        CarBody,
        CarListResponse,
        CarDetailResponse,
        DriverCreationForm,
        DriverLicenseUpdateForm,
        DriverSearchForm,
        DriverBody,
        DriverListResponse,
        DriverDetailResponse,
    )),
    tags(
        (name = "accounts", description = "Login and logout"),
        (name = "fleet", description = "Fleet overview"),
        (name = "manufacturers", description = "Manufacturer management"),
        (name = "cars", description = "Car management and driver assignment"),
        (name = "drivers", description = "Driver management")
    )
)]
pub struct ApiDoc;
