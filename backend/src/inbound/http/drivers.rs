//! Driver endpoints.
//!
//! ```text
//! GET  /drivers/?username=bob
//! GET  /drivers/{id}/
//! POST /drivers/create/ {"username":"bob","password1":"...","password2":"...","license_number":"ABC12345"}
//! POST /drivers/{id}/update/ {"license_number":"XYZ98765"}
//! POST /drivers/{id}/delete/
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::forms::{DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm};
use crate::domain::ports::map_repository_error;
use crate::domain::{Driver, DriverId, Error, LicenseNumber};
use crate::inbound::http::auth::AuthenticatedDriver;
use crate::inbound::http::cars::CarBody;
use crate::inbound::http::listing::{ListingMeta, PageQuery, paginate};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect_to};

const LIST_URL: &str = "/drivers/";

/// Driver as shown in listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DriverBody {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "ABC12345")]
    pub license_number: Option<String>,
    /// `"{username} ({first_name} {last_name})"`.
    pub display: String,
    #[schema(example = "/drivers/1/")]
    pub url: String,
}

impl From<&Driver> for DriverBody {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id().get(),
            username: driver.username().to_owned(),
            first_name: driver.first_name().to_owned(),
            last_name: driver.last_name().to_owned(),
            license_number: driver.license_number().map(LicenseNumber::to_string),
            display: driver.to_string(),
            url: driver.absolute_url(),
        }
    }
}

/// One page of drivers.
#[derive(Debug, Serialize, ToSchema)]
pub struct DriverListResponse {
    pub driver_list: Vec<DriverBody>,
    pub search_form: DriverSearchForm,
    #[serde(flatten)]
    pub meta: ListingMeta,
}

/// Driver with the cars assigned to them.
#[derive(Debug, Serialize, ToSchema)]
pub struct DriverDetailResponse {
    pub driver: DriverBody,
    pub cars: Vec<CarBody>,
}

/// List drivers ordered by username.
#[utoipa::path(
    get,
    path = "/drivers/",
    params(DriverSearchForm, PageQuery),
    responses(
        (status = 200, description = "Drivers", body = DriverListResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Invalid page", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "listDrivers"
)]
#[get("/drivers/")]
pub async fn list_drivers(
    _driver: AuthenticatedDriver,
    req: HttpRequest,
    state: web::Data<HttpState>,
    search: web::Query<DriverSearchForm>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<DriverListResponse>> {
    let drivers = state
        .drivers
        .list(&search.filter())
        .await
        .map_err(map_repository_error)?;
    let (drivers, meta) = paginate(&state, &req, &page, drivers)?;
    Ok(web::Json(DriverListResponse {
        driver_list: drivers.iter().map(DriverBody::from).collect(),
        search_form: search.into_inner(),
        meta,
    }))
}

async fn load_driver(state: &HttpState, id: DriverId) -> ApiResult<Driver> {
    state
        .drivers
        .find_by_id(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("driver {id} not found")))
}

/// Show one driver.
#[utoipa::path(
    get,
    path = "/drivers/{id}/",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Driver", body = DriverDetailResponse),
        (status = 404, description = "Unknown driver", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "driverDetail"
)]
#[get("/drivers/{id}/")]
pub async fn driver_detail(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<DriverDetailResponse>> {
    let driver = load_driver(&state, DriverId::new(path.into_inner())).await?;
    let cars = state
        .cars
        .list_for_driver(driver.id())
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(DriverDetailResponse {
        driver: DriverBody::from(&driver),
        cars: cars.iter().map(CarBody::from).collect(),
    }))
}

/// Register a driver account.
#[utoipa::path(
    post,
    path = "/drivers/create/",
    request_body = DriverCreationForm,
    responses(
        (status = 302, description = "Created; redirect to the new driver"),
        (status = 400, description = "Invalid submission", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "createDriver"
)]
#[post("/drivers/create/")]
pub async fn create_driver(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    form: web::Json<DriverCreationForm>,
) -> ApiResult<HttpResponse> {
    let draft = form
        .clean_with(state.license_validator.as_ref())
        .map_err(Error::from)?;
    let driver = state
        .drivers
        .create(draft)
        .await
        .map_err(map_repository_error)?;
    info!(driver_id = %driver.id(), "driver created");
    Ok(redirect_to(&driver.absolute_url()))
}

/// Replace a driver's license number.
#[utoipa::path(
    post,
    path = "/drivers/{id}/update/",
    params(("id" = u64, Path, description = "Driver id")),
    request_body = DriverLicenseUpdateForm,
    responses(
        (status = 302, description = "Updated; redirect to the list"),
        (status = 400, description = "Invalid license number", body = Error),
        (status = 404, description = "Unknown driver", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "updateDriverLicense"
)]
#[post("/drivers/{id}/update/")]
pub async fn update_driver_license(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    form: web::Json<DriverLicenseUpdateForm>,
) -> ApiResult<HttpResponse> {
    let driver = load_driver(&state, DriverId::new(path.into_inner())).await?;
    let license_number = form
        .clean_with(state.license_validator.as_ref())
        .map_err(Error::from)?;
    state
        .drivers
        .update_license_number(driver.id(), license_number)
        .await
        .map_err(map_repository_error)?;
    Ok(redirect_to(LIST_URL))
}

/// Delete a driver and unassign them from every car.
#[utoipa::path(
    post,
    path = "/drivers/{id}/delete/",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 302, description = "Deleted; redirect to the list"),
        (status = 404, description = "Unknown driver", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "deleteDriver"
)]
#[post("/drivers/{id}/delete/")]
pub async fn delete_driver(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = DriverId::new(path.into_inner());
    state
        .drivers
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    info!(driver_id = %id, "driver deleted");
    Ok(redirect_to(LIST_URL))
}
