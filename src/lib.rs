#![allow(clippy::doc_markdown)] // Allow technical terms like MySQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Lister Core
//!
//! Declarative paginated, filterable, sortable SQL listings for
//! request-scoped applications.
//!
//! ## Overview
//!
//! A caller describes a listing once: a query skeleton with a single
//! `{filters}` substitution point, a set of named filter widgets, and an
//! ordered map of sortable columns. For each request the [`Lister`] compiler
//! reads the bound filter values, merges the active predicates into the
//! skeleton, resolves sorting and pagination, and produces both the paginated
//! statement and a parallel "unlimited" statement reused for row counting and
//! bulk actions.
//!
//! ## Key Features
//!
//! - **Polymorphic filter kinds**: text, select, radio, checkbox and raw
//!   filters, each with its own validation and matching policy
//! - **Template assembly**: `{filters}` substitution that cooperates with
//!   pre-existing WHERE clauses and grouped (HAVING) predicates
//! - **Grouped-count handling**: totals stay correct when the inner query
//!   carries a GROUP BY
//! - **Filter memory**: per-path persistence of the last applied query string
//!   with one-shot replay and explicit reset
//!
//! ## Module Organization
//!
//! - [`filters`] - filter type system: specs, factory, predicates
//! - [`lister`] - the query compiler, settings and pagination
//! - [`persistence`] - per-path remembered filter state
//! - [`request`] / [`session`] / [`database`] - collaborator seams
//! - [`config`] - defaults and per-environment overrides
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lister_core::{
//!     FilterFactory, Lister, ListerConfig, MemorySessionStore, MySqlConnection,
//!     QuerySettings, RequestData,
//! };
//!
//! # async fn example(pool: sqlx::MySqlPool) -> lister_core::Result<()> {
//! let request = Arc::new(
//!     RequestData::new("/admin/users").with_param("filter_email", "gmail"),
//! );
//! let connection = Arc::new(MySqlConnection::new(pool));
//! let session = Arc::new(MemorySessionStore::new());
//!
//! let mut listing = Lister::new(request, connection, session, ListerConfig::default())
//!     .with_settings(
//!         QuerySettings::new("users.*", "FROM users {filters}").sortable("name", "asc"),
//!     )
//!     .add_filter(
//!         FilterFactory::text("filter_email")
//!             .with_label("Email")
//!             .with_db_column("users.email")
//!             .with_operator("LIKE"),
//!     )?;
//!
//! let results = listing.get().await?;
//! println!("{} of {} rows", results.count(), results.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety Note
//!
//! Literal values are escaped and inlined into the SQL text; there is no
//! bound-parameter path. The raw-filter templating contract depends on this
//! textual substitution.

pub mod config;
pub mod database;
pub mod error;
pub mod filters;
pub mod lister;
pub mod logging;
pub mod persistence;
pub mod request;
pub mod session;

pub use config::ListerConfig;
pub use database::{DatabaseConnection, MySqlConnection};
pub use error::{ListerError, Result};
pub use filters::{FilterFactory, FilterKind, FilterSpec};
pub use lister::{FilterGroup, Lister, ListingResults, Pagination, QuerySettings};
pub use persistence::PersistedFilterState;
pub use request::{ParamValue, RequestContext, RequestData};
pub use session::{MemorySessionStore, SessionStore};
