//! EPC069-12 ("SEPA Credit Transfer QR Code") payload builder and QR
//! generator, usable as a one-shot command or a single-endpoint HTTP service.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod telemetry;
