//! Core library for the healthcare enrollment service: enrollee and
//! dependent records, their validation and storage seams, the HTTP router,
//! and the configuration and telemetry bootstrap shared with the API binary.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
