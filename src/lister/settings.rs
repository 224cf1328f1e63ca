//! # Query Settings
//!
//! The caller-supplied, per-cycle-immutable description of one listing: a
//! selected-fields expression, a query body template containing exactly one
//! `{filters}` placeholder, and the ordered sortable-column map.

/// Declarative settings for one listing query
#[derive(Debug, Clone, Default)]
pub struct QuerySettings {
    /// Selected-fields expression, e.g. `users.*`
    pub fields: String,
    /// Query body with a `{filters}` substitution point,
    /// e.g. `FROM users {filters}`
    pub body: String,
    /// Sortable columns in declaration order, column → default direction.
    /// Only entries whose direction is exactly `asc` or `desc` are eligible
    /// as the default sort.
    pub sortables: Vec<(String, String)>,
}

impl QuerySettings {
    pub fn new(fields: &str, body: &str) -> Self {
        Self {
            fields: fields.to_string(),
            body: body.to_string(),
            sortables: Vec::new(),
        }
    }

    /// Declare a sortable column with its default direction
    pub fn sortable(mut self, column: &str, direction: &str) -> Self {
        self.sortables.push((column.to_string(), direction.to_string()));
        self
    }

    /// First declared column with a usable direction, scanned in order
    pub fn default_sort(&self) -> Option<(&str, &str)> {
        self.sortables
            .iter()
            .find(|(_, direction)| direction == "asc" || direction == "desc")
            .map(|(column, direction)| (column.as_str(), direction.as_str()))
    }

    /// Declared default direction for a column, if the column is sortable
    pub fn direction_for(&self, column: &str) -> Option<&str> {
        self.sortables
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, direction)| direction.as_str())
    }
}
