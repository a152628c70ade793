//! Infrastructure layer for external integrations.
//!
//! Implements the repository interfaces defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL record mapping and repositories

pub mod persistence;
