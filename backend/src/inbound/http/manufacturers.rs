//! Manufacturer endpoints.
//!
//! ```text
//! GET  /manufacturers/?name=toy&page=2
//! POST /manufacturers/create/ {"name":"Toyota","country":"Japan"}
//! POST /manufacturers/{id}/update/
//! POST /manufacturers/{id}/delete/
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::forms::{ManufacturerForm, ManufacturerSearchForm};
use crate::domain::ports::map_repository_error;
use crate::domain::{Error, Manufacturer, ManufacturerId};
use crate::inbound::http::auth::AuthenticatedDriver;
use crate::inbound::http::listing::{ListingMeta, PageQuery, paginate};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect_to};

const LIST_URL: &str = "/manufacturers/";

/// Manufacturer as shown in listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManufacturerBody {
    pub id: u64,
    pub name: String,
    pub country: String,
    /// `"{name} {country}"`.
    pub display: String,
}

impl From<&Manufacturer> for ManufacturerBody {
    fn from(manufacturer: &Manufacturer) -> Self {
        Self {
            id: manufacturer.id().get(),
            name: manufacturer.name().to_owned(),
            country: manufacturer.country().to_owned(),
            display: manufacturer.to_string(),
        }
    }
}

/// One page of manufacturers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManufacturerListResponse {
    pub manufacturer_list: Vec<ManufacturerBody>,
    pub search_form: ManufacturerSearchForm,
    #[serde(flatten)]
    pub meta: ListingMeta,
}

/// List manufacturers ordered by name.
#[utoipa::path(
    get,
    path = "/manufacturers/",
    params(ManufacturerSearchForm, PageQuery),
    responses(
        (status = 200, description = "Manufacturers", body = ManufacturerListResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Invalid page", body = Error)
    ),
    tags = ["manufacturers"],
    operation_id = "listManufacturers"
)]
#[get("/manufacturers/")]
pub async fn list_manufacturers(
    _driver: AuthenticatedDriver,
    req: HttpRequest,
    state: web::Data<HttpState>,
    search: web::Query<ManufacturerSearchForm>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<ManufacturerListResponse>> {
    let manufacturers = state
        .manufacturers
        .list(&search.filter())
        .await
        .map_err(map_repository_error)?;
    let (manufacturers, meta) = paginate(&state, &req, &page, manufacturers)?;
    Ok(web::Json(ManufacturerListResponse {
        manufacturer_list: manufacturers.iter().map(ManufacturerBody::from).collect(),
        search_form: search.into_inner(),
        meta,
    }))
}

/// Create a manufacturer.
#[utoipa::path(
    post,
    path = "/manufacturers/create/",
    request_body = ManufacturerForm,
    responses(
        (status = 302, description = "Created; redirect to the list"),
        (status = 400, description = "Invalid submission", body = Error)
    ),
    tags = ["manufacturers"],
    operation_id = "createManufacturer"
)]
#[post("/manufacturers/create/")]
pub async fn create_manufacturer(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    form: web::Json<ManufacturerForm>,
) -> ApiResult<HttpResponse> {
    let draft = form.clean().map_err(Error::from)?;
    let manufacturer = state
        .manufacturers
        .create(draft)
        .await
        .map_err(map_repository_error)?;
    info!(manufacturer_id = %manufacturer.id(), "manufacturer created");
    Ok(redirect_to(LIST_URL))
}

/// Replace a manufacturer's name and country.
#[utoipa::path(
    post,
    path = "/manufacturers/{id}/update/",
    params(("id" = u64, Path, description = "Manufacturer id")),
    request_body = ManufacturerForm,
    responses(
        (status = 302, description = "Updated; redirect to the list"),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 404, description = "Unknown manufacturer", body = Error)
    ),
    tags = ["manufacturers"],
    operation_id = "updateManufacturer"
)]
#[post("/manufacturers/{id}/update/")]
pub async fn update_manufacturer(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    form: web::Json<ManufacturerForm>,
) -> ApiResult<HttpResponse> {
    let id = ManufacturerId::new(path.into_inner());
    let draft = form.clean().map_err(Error::from)?;
    state
        .manufacturers
        .update(id, draft)
        .await
        .map_err(map_repository_error)?;
    Ok(redirect_to(LIST_URL))
}

/// Delete a manufacturer and its cars.
#[utoipa::path(
    post,
    path = "/manufacturers/{id}/delete/",
    params(("id" = u64, Path, description = "Manufacturer id")),
    responses(
        (status = 302, description = "Deleted; redirect to the list"),
        (status = 404, description = "Unknown manufacturer", body = Error)
    ),
    tags = ["manufacturers"],
    operation_id = "deleteManufacturer"
)]
#[post("/manufacturers/{id}/delete/")]
pub async fn delete_manufacturer(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = ManufacturerId::new(path.into_inner());
    state
        .manufacturers
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    info!(manufacturer_id = %id, "manufacturer deleted");
    Ok(redirect_to(LIST_URL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManufacturerDraft;
    use crate::domain::ports::ManufacturerRepository;
    use crate::inbound::http::test_utils::{TestFleet, call_with_session, location};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn fleet_with_seven_manufacturers() -> TestFleet {
        let fleet = TestFleet::new().await;
        for index in 1..=7 {
            ManufacturerRepository::create(
                fleet.store.as_ref(),
                ManufacturerDraft {
                    name: format!("Test Manufacturer{index}"),
                    country: format!("Test Country{index}"),
                },
            )
            .await
            .expect("manufacturer");
        }
        fleet
    }

    fn names(body: &Value) -> Vec<String> {
        body["manufacturer_list"]
            .as_array()
            .expect("manufacturer list")
            .iter()
            .filter_map(|m| m["name"].as_str().map(str::to_owned))
            .collect()
    }

    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(fleet.app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(LIST_URL).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            location(&res).as_deref(),
            Some("/accounts/login/?next=%2Fmanufacturers%2F")
        );
    }

    #[actix_web::test]
    async fn listing_is_paginated_by_five() {
        let fleet = fleet_with_seven_manufacturers().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let first = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::get().uri(LIST_URL),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        let first: Value = actix_test::read_body_json(first).await;
        let second = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::get().uri("/manufacturers/?page=2"),
        )
        .await;
        let second: Value = actix_test::read_body_json(second).await;

        assert_eq!(
            names(&first),
            (1..=5).map(|i| format!("Test Manufacturer{i}")).collect::<Vec<_>>()
        );
        assert_eq!(names(&second), vec!["Test Manufacturer6", "Test Manufacturer7"]);
        assert_eq!(first["page_obj"]["label"], "<Page 1 of 2>");
        assert_eq!(first["is_paginated"], true);
        assert_eq!(first["paginator"]["count"], 7);
        assert_eq!(first["paginator"]["per_page"], 5);
        assert!(first["search_form"].is_object());
    }

    #[rstest]
    #[case("/manufacturers/?name=Test", 7)]
    #[case("/manufacturers/?name=manufacturer7", 1)]
    #[case("/manufacturers/?name=InvalidName", 0)]
    #[actix_web::test]
    async fn listing_filters_by_name(#[case] uri: &str, #[case] expected_count: u64) {
        let fleet = fleet_with_seven_manufacturers().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res =
            call_with_session(&app, &mut cookie, actix_test::TestRequest::get().uri(uri)).await;

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["paginator"]["count"], expected_count);
    }

    #[actix_web::test]
    async fn search_term_is_echoed_and_kept_in_page_links() {
        let fleet = fleet_with_seven_manufacturers().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::get().uri("/manufacturers/?name=Test"),
        )
        .await;

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["search_form"]["name"], "Test");
        let next = body["page_obj"]["next"].as_str().expect("next link");
        assert!(next.ends_with("/manufacturers/?name=Test&page=2"), "{next}");
    }

    #[rstest]
    #[case("/manufacturers/?page=3")]
    #[case("/manufacturers/?page=0")]
    #[case("/manufacturers/?page=abc")]
    #[actix_web::test]
    async fn invalid_pages_are_not_found(#[case] uri: &str) {
        let fleet = fleet_with_seven_manufacturers().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res =
            call_with_session(&app, &mut cookie, actix_test::TestRequest::get().uri(uri)).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_update_and_delete_redirect_to_the_list() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let created = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::post()
                .uri("/manufacturers/create/")
                .set_json(json!({"name": "Toyota", "country": "Japan"})),
        )
        .await;
        assert_eq!(created.status(), StatusCode::FOUND);
        assert_eq!(location(&created).as_deref(), Some(LIST_URL));

        let updated = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::post()
                .uri("/manufacturers/1/update/")
                .set_json(json!({"name": "Toyota", "country": "Nippon"})),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::FOUND);
        let stored = ManufacturerRepository::find_by_id(fleet.store.as_ref(), ManufacturerId::new(1))
            .await
            .expect("read")
            .expect("stored");
        assert_eq!(stored.country(), "Nippon");

        let deleted = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::post().uri("/manufacturers/1/delete/"),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::FOUND);
        assert_eq!(
            ManufacturerRepository::count(fleet.store.as_ref())
                .await
                .expect("count"),
            0
        );
    }

    #[actix_web::test]
    async fn invalid_submissions_report_field_errors() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::post()
                .uri("/manufacturers/create/")
                .set_json(json!({"name": "Toyota"})),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body["details"]["field_errors"]["country"][0],
            "This field is required."
        );
    }

    #[actix_web::test]
    async fn unknown_manufacturers_are_not_found() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::post().uri("/manufacturers/99/delete/"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
