//! Taxi fleet service library.
//!
//! Drivers, cars and manufacturers behind session-authenticated JSON
//! endpoints, organised as domain ports with inbound HTTP and outbound
//! storage adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
