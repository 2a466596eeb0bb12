//! Car endpoints.
//!
//! ```text
//! GET  /cars/?model=camry
//! GET  /cars/{id}/
//! POST /cars/create/ {"model":"Camry","manufacturer":1,"drivers":[1]}
//! POST /cars/{id}/update/
//! POST /cars/{id}/delete/
//! GET  /cars/{id}/toggle-assign/
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::forms::{CarForm, CarSearchForm};
use crate::domain::ports::map_repository_error;
use crate::domain::{Car, CarId, Error};
use crate::inbound::http::auth::AuthenticatedDriver;
use crate::inbound::http::drivers::DriverBody;
use crate::inbound::http::listing::{ListingMeta, PageQuery, paginate};
use crate::inbound::http::manufacturers::ManufacturerBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect_to};

const LIST_URL: &str = "/cars/";

/// Car as shown in listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CarBody {
    pub id: u64,
    pub model: String,
    pub manufacturer_id: u64,
    #[schema(example = "/cars/1/")]
    pub url: String,
}

impl From<&Car> for CarBody {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id().get(),
            model: car.model().to_owned(),
            manufacturer_id: car.manufacturer_id().get(),
            url: car.absolute_url(),
        }
    }
}

/// One page of cars.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarListResponse {
    pub car_list: Vec<CarBody>,
    pub search_form: CarSearchForm,
    #[serde(flatten)]
    pub meta: ListingMeta,
}

/// Car with its manufacturer and assigned drivers.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarDetailResponse {
    pub car: CarBody,
    pub manufacturer: Option<ManufacturerBody>,
    pub drivers: Vec<DriverBody>,
    /// Whether the logged-in driver is assigned to the car.
    pub is_assigned: bool,
}

/// List cars ordered by id.
#[utoipa::path(
    get,
    path = "/cars/",
    params(CarSearchForm, PageQuery),
    responses(
        (status = 200, description = "Cars", body = CarListResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Invalid page", body = Error)
    ),
    tags = ["cars"],
    operation_id = "listCars"
)]
#[get("/cars/")]
pub async fn list_cars(
    _driver: AuthenticatedDriver,
    req: HttpRequest,
    state: web::Data<HttpState>,
    search: web::Query<CarSearchForm>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<CarListResponse>> {
    let cars = state
        .cars
        .list(&search.filter())
        .await
        .map_err(map_repository_error)?;
    let (cars, meta) = paginate(&state, &req, &page, cars)?;
    Ok(web::Json(CarListResponse {
        car_list: cars.iter().map(CarBody::from).collect(),
        search_form: search.into_inner(),
        meta,
    }))
}

async fn load_car(state: &HttpState, id: CarId) -> ApiResult<Car> {
    state
        .cars
        .find_by_id(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("car {id} not found")))
}

/// Show one car.
#[utoipa::path(
    get,
    path = "/cars/{id}/",
    params(("id" = u64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car", body = CarDetailResponse),
        (status = 404, description = "Unknown car", body = Error)
    ),
    tags = ["cars"],
    operation_id = "carDetail"
)]
#[get("/cars/{id}/")]
pub async fn car_detail(
    driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<CarDetailResponse>> {
    let car = load_car(&state, CarId::new(path.into_inner())).await?;
    let manufacturer = state
        .manufacturers
        .find_by_id(car.manufacturer_id())
        .await
        .map_err(map_repository_error)?;
    let mut drivers = Vec::with_capacity(car.drivers().len());
    for id in car.drivers() {
        if let Some(assigned) = state
            .drivers
            .find_by_id(*id)
            .await
            .map_err(map_repository_error)?
        {
            drivers.push(DriverBody::from(&assigned));
        }
    }
    Ok(web::Json(CarDetailResponse {
        car: CarBody::from(&car),
        manufacturer: manufacturer.as_ref().map(ManufacturerBody::from),
        drivers,
        is_assigned: car.is_assigned_to(driver.id()),
    }))
}

/// Create a car.
#[utoipa::path(
    post,
    path = "/cars/create/",
    request_body = CarForm,
    responses(
        (status = 302, description = "Created; redirect to the list"),
        (status = 400, description = "Invalid submission", body = Error)
    ),
    tags = ["cars"],
    operation_id = "createCar"
)]
#[post("/cars/create/")]
pub async fn create_car(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    form: web::Json<CarForm>,
) -> ApiResult<HttpResponse> {
    let draft = form.clean().map_err(Error::from)?;
    let car = state
        .cars
        .create(draft)
        .await
        .map_err(map_repository_error)?;
    info!(car_id = %car.id(), "car created");
    Ok(redirect_to(LIST_URL))
}

/// Replace a car's model, manufacturer and drivers.
#[utoipa::path(
    post,
    path = "/cars/{id}/update/",
    params(("id" = u64, Path, description = "Car id")),
    request_body = CarForm,
    responses(
        (status = 302, description = "Updated; redirect to the list"),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 404, description = "Unknown car", body = Error)
    ),
    tags = ["cars"],
    operation_id = "updateCar"
)]
#[post("/cars/{id}/update/")]
pub async fn update_car(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    form: web::Json<CarForm>,
) -> ApiResult<HttpResponse> {
    let id = CarId::new(path.into_inner());
    let draft = form.clean().map_err(Error::from)?;
    state
        .cars
        .update(id, draft)
        .await
        .map_err(map_repository_error)?;
    Ok(redirect_to(LIST_URL))
}

/// Delete a car.
#[utoipa::path(
    post,
    path = "/cars/{id}/delete/",
    params(("id" = u64, Path, description = "Car id")),
    responses(
        (status = 302, description = "Deleted; redirect to the list"),
        (status = 404, description = "Unknown car", body = Error)
    ),
    tags = ["cars"],
    operation_id = "deleteCar"
)]
#[post("/cars/{id}/delete/")]
pub async fn delete_car(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = CarId::new(path.into_inner());
    state.cars.delete(id).await.map_err(map_repository_error)?;
    info!(car_id = %id, "car deleted");
    Ok(redirect_to(LIST_URL))
}

/// Assign the logged-in driver to the car, or remove them if already
/// assigned.
#[utoipa::path(
    get,
    path = "/cars/{id}/toggle-assign/",
    params(("id" = u64, Path, description = "Car id")),
    responses(
        (status = 302, description = "Toggled; redirect to the car"),
        (status = 404, description = "Unknown car", body = Error)
    ),
    tags = ["cars"],
    operation_id = "toggleCarAssign"
)]
#[get("/cars/{id}/toggle-assign/")]
pub async fn toggle_assign(
    driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = CarId::new(path.into_inner());
    let change = state
        .cars
        .toggle_driver(id, driver.id())
        .await
        .map_err(map_repository_error)?;
    info!(car_id = %id, driver_id = %driver.id(), ?change, "car assignment toggled");
    Ok(redirect_to(&format!("/cars/{id}/")))
}
