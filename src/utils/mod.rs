//! Utility functions for code generation, URL validation, and error mapping.
//!
//! - [`code_generator`] - Random short code generation with collision avoidance
//! - [`url_validator`] - Absolute URL validation for submitted input
//! - [`db_error`] - PostgreSQL constraint violation classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
