//! Backend library modules.
//!
//! A hexagonal lending service: `domain` holds the entities, codecs and the
//! lending state machine, `inbound` exposes them over HTTP, and `outbound`
//! persists them in PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
