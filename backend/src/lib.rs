//! Membership billing backend.
//!
//! Evaluates payment delinquency for a membership portal and serves the
//! result over two session-authenticated HTTP endpoints: a self-service
//! reminder for the logged-in member and an admin-only report across the
//! active roster. The crate follows a hexagonal layout:
//!
//! - [`domain`]: billing periods, grace policy, the delinquency service, and
//!   the ports it speaks through. No I/O.
//! - [`inbound`]: the HTTP adapter (handlers, sessions, error mapping).
//! - [`outbound`]: PostgreSQL adapters implementing the driven ports.
//! - [`server`]: Actix server construction and middleware wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
