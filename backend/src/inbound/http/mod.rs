//! HTTP adapter: handlers, session handling, and error mapping.
//!
//! Handlers depend only on the domain ports carried by [`state::HttpState`],
//! so the whole surface can be exercised in tests with fixture or mock port
//! implementations.

pub mod billing;
pub mod error;
pub mod health;
pub mod members;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
