//! HTTP inbound adapter exposing the marker API and account pages.

pub mod accounts;
pub mod error;
pub mod export;
pub mod flash;
pub mod health;
pub mod markers;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::{form_error_handler, json_error_handler, path_error_handler};
