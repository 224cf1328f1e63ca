//! # Filter Specs
//!
//! One [`FilterSpec`] describes a filter widget's matching behavior and, once
//! bound to a request, its activation state. Kind-specific policy (mandatory
//! fields, value matching) is dispatched over the closed [`FilterKind`] set.

use std::fmt;

use crate::error::{ListerError, Result};
use crate::request::ParamValue;

/// Closed set of filter widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Select,
    Radio,
    Checkbox,
    Raw,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Text => "text",
            FilterKind::Select => "select",
            FilterKind::Radio => "radio",
            FilterKind::Checkbox => "checkbox",
            FilterKind::Raw => "raw",
        };
        write!(f, "{name}")
    }
}

/// A filter widget definition plus its per-request activation state.
///
/// Construct through [`FilterFactory`](super::FilterFactory), configure with
/// the consuming `with_*` setters, then register on a
/// [`Lister`](crate::lister::Lister). The compiler owns the spec afterwards
/// and binds request values into it once per compile cycle.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    kind: FilterKind,
    input_name: Option<String>,
    label: Option<String>,
    db_column: Option<String>,
    search_operator: String,
    items: Vec<(String, String)>,
    search_value: Option<ParamValue>,
    raw_query: Option<String>,
    is_active: bool,
    has_render: bool,
}

impl FilterSpec {
    pub(crate) fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            input_name: None,
            label: None,
            db_column: None,
            search_operator: "=".to_string(),
            items: Vec::new(),
            search_value: None,
            raw_query: None,
            is_active: false,
            has_render: true,
        }
    }

    /// Set the request input name; the target column defaults to it
    pub fn with_input_name(mut self, input_name: &str) -> Self {
        self.input_name = Some(input_name.to_string());
        if self.db_column.is_none() {
            self.db_column = Some(input_name.to_string());
        }
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_db_column(mut self, db_column: &str) -> Self {
        self.db_column = Some(db_column.to_string());
        self
    }

    /// Comparison operator (`=`, `<=`, `>=`, `<>`, `LIKE`, `IN`), stored
    /// upper-cased
    pub fn with_operator(mut self, operator: &str) -> Self {
        self.search_operator = operator.to_uppercase();
        self
    }

    /// Declared option set for Select/Radio/Checkbox kinds, key → label
    pub fn with_items(mut self, items: &[(&str, &str)]) -> Self {
        self.items = items
            .iter()
            .map(|(key, label)| (key.to_string(), label.to_string()))
            .collect();
        self
    }

    /// Raw predicate template; `{input_name}` occurrences are substituted with
    /// the matched value at compile time
    pub fn with_raw_query(mut self, raw_query: &str) -> Self {
        self.raw_query = Some(raw_query.to_string());
        self
    }

    /// Pre-seed the search value (renderable Raw filters require one)
    pub fn with_search_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.search_value = Some(value.into());
        self
    }

    /// Suppress widget rendering for this filter
    pub fn no_render(mut self) -> Self {
        self.has_render = false;
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn input_name(&self) -> Option<&str> {
        self.input_name.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn db_column(&self) -> Option<&str> {
        self.db_column.as_deref()
    }

    pub fn search_operator(&self) -> &str {
        &self.search_operator
    }

    pub fn items(&self) -> &[(String, String)] {
        &self.items
    }

    pub fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    pub fn search_value(&self) -> Option<&ParamValue> {
        self.search_value.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn has_render(&self) -> bool {
        self.has_render
    }

    pub(crate) fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Mandatory fields for this kind, in reporting priority order
    fn mandatory_fields(&self) -> &'static [&'static str] {
        match self.kind {
            FilterKind::Text => &["label", "input_name", "db_column", "search_operator"],
            FilterKind::Select => &["label", "input_name", "db_column", "search_operator", "items"],
            FilterKind::Radio | FilterKind::Checkbox => {
                &["input_name", "db_column", "search_operator", "items"]
            }
            FilterKind::Raw => {
                if self.has_render {
                    &["raw_query", "label", "search_value"]
                } else {
                    &["raw_query"]
                }
            }
        }
    }

    fn field_is_set(&self, field: &str) -> bool {
        match field {
            "label" => self.label.as_deref().is_some_and(|v| !v.is_empty()),
            "input_name" => self.input_name.as_deref().is_some_and(|v| !v.is_empty()),
            "db_column" => self.db_column.as_deref().is_some_and(|v| !v.is_empty()),
            "search_operator" => !self.search_operator.is_empty(),
            "items" => !self.items.is_empty(),
            "raw_query" => self.raw_query.as_deref().is_some_and(|v| !v.is_empty()),
            "search_value" => self.search_value.as_ref().is_some_and(|v| !v.is_empty()),
            _ => false,
        }
    }

    /// Check the kind's mandatory fields; the first absent one is reported
    pub fn validate(&self) -> Result<()> {
        for field in self.mandatory_fields() {
            if !self.field_is_set(field) {
                return Err(ListerError::MissingFilterField {
                    field,
                    kind: self.kind,
                });
            }
        }
        Ok(())
    }

    /// Bind a request value according to the kind's matching rule.
    ///
    /// Select/Radio accept only a scalar equal to one of the declared option
    /// keys. Checkbox narrows a multi-value to the intersection with its
    /// option keys, preserving incoming order. Text and Raw accept anything.
    /// A rejected value leaves the search value unset.
    pub(crate) fn bind_search_value(&mut self, value: ParamValue) {
        self.search_value = None;

        match self.kind {
            FilterKind::Text | FilterKind::Raw => {
                self.search_value = Some(value);
            }
            FilterKind::Select | FilterKind::Radio => {
                if let ParamValue::Single(ref scalar) = value {
                    if self.items.iter().any(|(key, _)| key == scalar) {
                        self.search_value = Some(value);
                    }
                }
            }
            FilterKind::Checkbox => {
                if let ParamValue::Multi(incoming) = value {
                    let narrowed: Vec<String> = incoming
                        .into_iter()
                        .filter(|item| self.items.iter().any(|(key, _)| key == item))
                        .collect();
                    self.search_value = Some(ParamValue::Multi(narrowed));
                }
            }
        }
    }

    /// The bound value when it is usable for predicate generation
    pub(crate) fn matched_value(&self) -> Option<&ParamValue> {
        self.search_value.as_ref().filter(|value| !value.is_empty())
    }
}
