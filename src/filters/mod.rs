//! # Filter Type System
//!
//! A closed set of filter widget kinds, each with its own mandatory-field
//! validation, request-value matching semantics and predicate-generation
//! strategy.
//!
//! ## Key Components
//!
//! - [`filter`] - [`FilterSpec`] base record plus per-kind behavior
//! - [`factory`] - [`FilterFactory`], the single entry point for construction
//! - [`predicate`] - literal escaping and SQL fragment generation

pub mod factory;
pub mod filter;
pub mod predicate;

pub use factory::FilterFactory;
pub use filter::{FilterKind, FilterSpec};
pub use predicate::{escape_literal, escape_value};
