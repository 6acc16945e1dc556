//! Entry surfaces: command-line arguments and the HTTP endpoint.

pub mod cli;
pub mod http;
