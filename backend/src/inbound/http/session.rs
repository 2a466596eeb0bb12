//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting the logged-in driver or
//! counting index visits.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DriverId, Error};

pub(crate) const DRIVER_ID_KEY: &str = "driver_id";
pub(crate) const NUM_VISITS_KEY: &str = "num_visits";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated driver's id, rotating the session key.
    pub fn persist_driver(&self, driver_id: DriverId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(DRIVER_ID_KEY, driver_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the logged-in driver id, if present.
    pub fn driver_id(&self) -> Result<Option<DriverId>, Error> {
        self.0
            .get::<u64>(DRIVER_ID_KEY)
            .map(|id| id.map(DriverId::new))
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Count one more index visit and return the new total.
    pub fn record_visit(&self) -> Result<u64, Error> {
        let visits = self
            .0
            .get::<u64>(NUM_VISITS_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or(0)
            .saturating_add(1);
        self.0
            .insert(NUM_VISITS_KEY, visits)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(visits)
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
