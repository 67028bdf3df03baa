//! Colidea backend library exports (also used by the integration tests).

pub mod telemetry;
pub mod util;
pub mod error;
pub mod domain;
pub mod protocol;
pub mod config;
pub mod prompt;
pub mod extract;
pub mod providers;
pub mod state;
pub mod logic;
pub mod routes;
