//! # Filter Factory
//!
//! The single public entry point for constructing filter specs. Widget kinds
//! are seeded with their input name (the target column defaults to it); the
//! raw kind is seeded with its predicate template.

use super::filter::{FilterKind, FilterSpec};

pub struct FilterFactory;

impl FilterFactory {
    /// Free-text input filter
    pub fn text(input_name: &str) -> FilterSpec {
        FilterSpec::new(FilterKind::Text).with_input_name(input_name)
    }

    /// Single-choice dropdown filter
    pub fn select(input_name: &str) -> FilterSpec {
        FilterSpec::new(FilterKind::Select).with_input_name(input_name)
    }

    /// Single-choice radio-group filter
    pub fn radio(input_name: &str) -> FilterSpec {
        FilterSpec::new(FilterKind::Radio).with_input_name(input_name)
    }

    /// Multi-choice checkbox-group filter
    pub fn checkbox(input_name: &str) -> FilterSpec {
        FilterSpec::new(FilterKind::Checkbox).with_input_name(input_name)
    }

    /// Raw predicate filter; the template is emitted verbatim when the filter
    /// is registered
    pub fn raw(raw_query: &str) -> FilterSpec {
        FilterSpec::new(FilterKind::Raw).with_raw_query(raw_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_fixed_at_construction() {
        assert_eq!(FilterFactory::text("q").kind(), FilterKind::Text);
        assert_eq!(FilterFactory::select("q").kind(), FilterKind::Select);
        assert_eq!(FilterFactory::radio("q").kind(), FilterKind::Radio);
        assert_eq!(FilterFactory::checkbox("q").kind(), FilterKind::Checkbox);
        assert_eq!(FilterFactory::raw("1 = 1").kind(), FilterKind::Raw);
    }

    #[test]
    fn test_raw_is_seeded_with_template() {
        let filter = FilterFactory::raw("deleted_at IS NULL");
        assert_eq!(filter.raw_query(), Some("deleted_at IS NULL"));
        assert_eq!(filter.input_name(), None);
    }
}
