//! HTTP inbound adapter exposing the fleet endpoints.

pub mod accounts;
pub mod auth;
pub mod cars;
pub mod drivers;
pub mod error;
pub mod index;
pub mod listing;
pub mod manufacturers;
pub mod routes;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::HttpResponse;
use actix_web::http::header;

/// `302 Found` pointing at `location`.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
