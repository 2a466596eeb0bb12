//! Route table for the fleet endpoints.

use actix_web::web;

use super::accounts::{login, login_form, logout};
use super::cars::{car_detail, create_car, delete_car, list_cars, toggle_assign, update_car};
use super::drivers::{
    create_driver, delete_driver, driver_detail, list_drivers, update_driver_license,
};
use super::index::index;
use super::manufacturers::{
    create_manufacturer, delete_manufacturer, list_manufacturers, update_manufacturer,
};

/// Register every fleet endpoint on `cfg`.
///
/// Session middleware and [`HttpState`](super::state::HttpState) must be
/// provided by the enclosing application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(login_form)
        .service(login)
        .service(logout)
        .service(list_manufacturers)
        .service(create_manufacturer)
        .service(update_manufacturer)
        .service(delete_manufacturer)
        .service(list_cars)
        .service(create_car)
        .service(car_detail)
        .service(update_car)
        .service(delete_car)
        .service(toggle_assign)
        .service(list_drivers)
        .service(create_driver)
        .service(driver_detail)
        .service(update_driver_license)
        .service(delete_driver);
}
