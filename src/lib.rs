//! Request parameter handling for the fusion chart content generator.
//!
//! The hosting platform hands every request over as named parameter scopes
//! (`request`, `path`). [`parser::RequestParameterParser`] normalizes them into
//! a sorted parameter map and works out which generator operation was called.
//! [`handlers::handle_request`] wires this to a Spin HTTP component.

pub mod config;
pub mod core;
pub mod handlers;
pub mod host;
pub mod models;
pub mod parser;
pub mod source;

pub use crate::core::errors::{ApiError, ParameterError};
pub use crate::models::{HostValue, Operation, ParameterMap, ParameterValue, RepositoryFile};
pub use crate::parser::{ParameterMode, RequestParameterParser};
pub use crate::source::{ParameterProviders, ParameterSource, SimpleParameterProvider};
