//! PostgreSQL persistence.
//!
//! - [`record`] - Per-type field/column declarations ([`Record`], [`Field`])
//! - [`mapper`] - Generic `SELECT`/`INSERT` execution for any [`Record`]
//! - [`PgShortLinkRepository`] - Short link storage built on the mapper

pub mod mapper;
pub mod pg_short_link_repository;
pub mod record;

pub use mapper::{RecordMapper, StoreError};
pub use pg_short_link_repository::{PgShortLinkRepository, SHORT_LINK_TABLE};
pub use record::{BindValue, Field, Record};
