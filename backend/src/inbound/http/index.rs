//! Fleet overview.
//!
//! ```text
//! GET /
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::map_repository_error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedDriver;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Entity counts and the session visit counter.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    pub num_drivers: usize,
    pub num_cars: usize,
    pub num_manufacturers: usize,
    /// Index requests made on this session, including this one.
    pub num_visits: u64,
}

/// Summarise the fleet and count the visit.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Fleet overview", body = IndexResponse),
        (status = 302, description = "Login required"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fleet"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index(
    _driver: AuthenticatedDriver,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<IndexResponse>> {
    let num_drivers = state.drivers.count().await.map_err(map_repository_error)?;
    let num_cars = state.cars.count().await.map_err(map_repository_error)?;
    let num_manufacturers = state
        .manufacturers
        .count()
        .await
        .map_err(map_repository_error)?;
    let num_visits = session.record_visit()?;
    Ok(web::Json(IndexResponse {
        num_drivers,
        num_cars,
        num_manufacturers,
        num_visits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CarRepository, ManufacturerRepository};
    use crate::domain::{CarDraft, ManufacturerDraft};
    use crate::inbound::http::session::NUM_VISITS_KEY;
    use crate::inbound::http::test_utils::{TestFleet, call_with_session, location};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(fleet.app()).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            location(&res).as_deref(),
            Some("/accounts/login/?next=%2F")
        );
    }

    #[actix_web::test]
    async fn counts_every_entity() {
        let fleet = TestFleet::new().await;
        let toyota = ManufacturerRepository::create(
            fleet.store.as_ref(),
            ManufacturerDraft {
                name: "Toyota".to_owned(),
                country: "Japan".to_owned(),
            },
        )
        .await
        .expect("manufacturer");
        CarRepository::create(
            fleet.store.as_ref(),
            CarDraft {
                model: "Toyota Camry".to_owned(),
                manufacturer_id: toyota.id(),
                drivers: Default::default(),
            },
        )
        .await
        .expect("car");
        let app = actix_test::init_service(fleet.app()).await;
        let mut cookie = fleet.login(&app).await;

        let res =
            call_with_session(&app, &mut cookie, actix_test::TestRequest::get().uri("/")).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["num_drivers"], 1);
        assert_eq!(body["num_cars"], 1);
        assert_eq!(body["num_manufacturers"], 1);
    }

    async fn stored_visits(session: actix_session::Session) -> web::Json<Option<u64>> {
        web::Json(session.get::<u64>(NUM_VISITS_KEY).ok().flatten())
    }

    #[actix_web::test]
    async fn visits_are_tracked_in_the_session() {
        let fleet = TestFleet::new().await;
        let app = actix_test::init_service(
            fleet
                .app()
                .route("/stored-visits", web::get().to(stored_visits)),
        )
        .await;
        let mut cookie = fleet.login(&app).await;

        for _ in 0..3 {
            call_with_session(&app, &mut cookie, actix_test::TestRequest::get().uri("/")).await;
        }
        let res =
            call_with_session(&app, &mut cookie, actix_test::TestRequest::get().uri("/")).await;

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["num_visits"], 4);

        let res = call_with_session(
            &app,
            &mut cookie,
            actix_test::TestRequest::get().uri("/stored-visits"),
        )
        .await;
        let stored: Option<u64> = actix_test::read_body_json(res).await;
        assert_eq!(stored, Some(4));
    }
}
