// Library module for testable functions

pub mod analysis;
pub mod analytics;
pub mod config;
pub mod error;
pub mod routes;
