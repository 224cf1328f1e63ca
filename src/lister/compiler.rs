//! # Lister
//!
//! The listing query compiler. Owns the query skeleton, the registered filter
//! specs (split into WHERE and HAVING groups) and the pagination/sort state;
//! compiles them plus per-request values into a paginated SQL statement and a
//! parallel "unlimited" statement reused for counting and bulk actions.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use regex::Regex;
use serde_json::Value;

use super::pagination::{ListingResults, Pagination};
use super::settings::QuerySettings;
use super::urls::{make_one_liner, query_pairs};
use crate::config::ListerConfig;
use crate::database::DatabaseConnection;
use crate::error::{ListerError, Result};
use crate::filters::{escape_value, FilterKind, FilterSpec};
use crate::logging::log_query_operation;
use crate::persistence::PersistedFilterState;
use crate::request::RequestContext;
use crate::session::SessionStore;

/// Predicate bucket a filter is registered into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterGroup {
    Where,
    Having,
}

/// Matches a body template whose WHERE clause already leads up to the
/// `{filters}` placeholder, possibly through AND-joined conditions
fn where_filters_regex() -> &'static Regex {
    static WHERE_FILTERS_RE: OnceLock<Regex> = OnceLock::new();
    WHERE_FILTERS_RE.get_or_init(|| {
        Regex::new(r"(?i)where\r?\s+(.+\r*\s+and\r*\s+)*\{filters\}")
            .expect("where-clause detection pattern is valid")
    })
}

/// The listing query compiler, scoped to one request/response cycle
pub struct Lister {
    request: Arc<dyn RequestContext>,
    db: Arc<dyn DatabaseConnection>,
    persisted: PersistedFilterState,
    config: ListerConfig,
    settings: QuerySettings,
    filters: Vec<(FilterGroup, FilterSpec)>,
    pagination: Pagination,
    sql_without_limits: String,
    results: Option<ListingResults>,
}

impl Lister {
    pub fn new(
        request: Arc<dyn RequestContext>,
        db: Arc<dyn DatabaseConnection>,
        session: Arc<dyn SessionStore>,
        config: ListerConfig,
    ) -> Self {
        let current_page = request
            .get("page")
            .and_then(|value| value.as_single().and_then(|s| s.parse().ok()))
            .unwrap_or(1);
        let per_page = request
            .get("rpp")
            .and_then(|value| value.as_single().and_then(|s| s.parse().ok()))
            .unwrap_or(config.results_per_page);

        let persisted = PersistedFilterState::new(session, &config.session_key_prefix);

        Self {
            request,
            db,
            persisted,
            config,
            settings: QuerySettings::default(),
            filters: Vec::new(),
            pagination: Pagination::new(current_page, per_page),
            sql_without_limits: String::new(),
            results: None,
        }
    }

    /// Apply query settings
    pub fn with_settings(mut self, settings: QuerySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register a filter into the WHERE group
    pub fn add_filter(mut self, filter: FilterSpec) -> Result<Self> {
        filter.validate()?;
        self.filters.push((FilterGroup::Where, filter));
        Ok(self)
    }

    /// Register a filter into the HAVING group
    pub fn add_having_filter(mut self, filter: FilterSpec) -> Result<Self> {
        filter.validate()?;
        self.filters.push((FilterGroup::Having, filter));
        Ok(self)
    }

    /// Swap the database collaborator
    pub fn set_connection(&mut self, db: Arc<dyn DatabaseConnection>) {
        self.db = db;
    }

    pub fn connection(&self) -> &Arc<dyn DatabaseConnection> {
        &self.db
    }

    pub fn results_per_page(&self) -> u32 {
        self.pagination.per_page
    }

    /// Override the page size, recomputing the offset
    pub fn set_results_per_page(&mut self, results_per_page: u32) {
        self.pagination = Pagination::new(self.pagination.current_page, results_per_page);
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    /// Fetch records and the total figure, populating the results container.
    /// Issues exactly two statements: the paginated select and the count.
    pub async fn get(&mut self) -> Result<&ListingResults> {
        let started = Instant::now();
        let query = self.compile()?;

        tracing::debug!(sql = %query, "executing listing query");
        let rows = self.db.select(&query).await?;
        let total = self.count_total().await?;

        let unlimited = self.unlimited_sql_query();
        log_query_operation(
            "listing_fetch",
            Some(&unlimited),
            "completed",
            Some(started.elapsed().as_millis() as u64),
        );

        let results = ListingResults {
            rows,
            total,
            per_page: self.pagination.per_page,
            current_page: self.pagination.current_page,
            path: self.request.url(),
        };

        Ok(self.results.insert(results))
    }

    /// The populated results of the last `get()` call, open for interception
    /// before rendering
    pub fn results(&self) -> Option<&ListingResults> {
        self.results.as_ref()
    }

    /// Compile the paginated SQL statement for the current request.
    /// Idempotent for unchanged inputs; also refreshes the unlimited SQL text.
    pub fn compile(&mut self) -> Result<String> {
        let where_clauses = self.extract_predicates(FilterGroup::Where);

        let mut query = self.settings.body.clone();
        let has_inline_where = where_filters_regex().is_match(&query);

        if where_clauses.is_empty() {
            let substitution = if has_inline_where { " (1) " } else { "" };
            query = query.replace("{filters}", substitution);
        } else {
            let prefix = if has_inline_where { "" } else { "WHERE " };
            query = query.replace(
                "{filters}",
                &format!("{}{}", prefix, where_clauses.join(" AND ")),
            );
        }

        let mut query = format!("SELECT {} {}", self.settings.fields, query);

        let having_clauses = self.extract_predicates(FilterGroup::Having);
        if !having_clauses.is_empty() {
            query.push_str(&format!(" HAVING {}", having_clauses.join(" AND ")));
        }

        let sort_by = self.sort_by()?;
        if !sort_by.is_empty() {
            query.push_str(&format!(" ORDER BY {sort_by}"));
        }

        // needed later for bulk actions and counting
        self.sql_without_limits = query.clone();

        Ok(format!("{}{}", query, self.pagination.to_sql()))
    }

    /// Run activation/extraction over one filter group, in registration order.
    ///
    /// Raw filters activate unconditionally and emit their template verbatim.
    /// Every other filter activates iff its request value is non-empty or
    /// numeric, and stays active only when kind matching accepts the value.
    fn extract_predicates(&mut self, group: FilterGroup) -> Vec<String> {
        let mut predicates = Vec::new();

        for entry in &mut self.filters {
            if entry.0 != group {
                continue;
            }
            let filter = &mut entry.1;

            if filter.kind() == FilterKind::Raw {
                filter.set_active(true);
                if let Some(raw) = filter.raw_query() {
                    predicates.push(raw.to_string());
                }
                continue;
            }

            let value = filter
                .input_name()
                .and_then(|name| self.request.get(name));

            let Some(value) = value else {
                filter.set_active(false);
                continue;
            };

            filter.bind_search_value(value.clone());

            if !value.activates() {
                filter.set_active(false);
                continue;
            }

            let Some(matched) = filter.matched_value() else {
                filter.set_active(false);
                continue;
            };

            let escaped = escape_value(matched);
            match filter.predicate(&escaped) {
                Some(predicate) => {
                    filter.set_active(true);
                    predicates.push(predicate);
                }
                None => filter.set_active(false),
            }
        }

        predicates
    }

    /// Resolve the `field direction` ORDER BY expression for this request.
    ///
    /// An unknown sort field is an error; remembered filters for the path are
    /// cleared first so the user is not stuck replaying the broken sort.
    fn sort_by(&self) -> Result<String> {
        let sort_field = match self.request.get("sortf") {
            Some(value) => value.as_single().unwrap_or_default().to_string(),
            None => self
                .settings
                .default_sort()
                .map(|(field, _)| field.to_string())
                .unwrap_or_default(),
        };

        if sort_field.is_empty() {
            return Ok(String::new());
        }

        let Some(default_direction) = self.settings.direction_for(&sort_field) else {
            self.persisted.forget(&self.request.path());
            return Err(ListerError::UnknownSortField { field: sort_field });
        };

        let direction = self
            .request
            .get("sortd")
            .and_then(|value| value.as_single().map(str::to_string))
            .filter(|direction| !direction.is_empty())
            .unwrap_or_else(|| default_direction.to_string());

        Ok(format!("{sort_field} {direction}"))
    }

    /// Total rows of the unlimited query. A single count row answers
    /// directly; several rows mean the inner query is grouped, and the group
    /// count is the total.
    pub async fn count_total(&self) -> Result<u64> {
        let mut rows_query = self.unlimited_sql_query();

        let sort_by = self.sort_by()?;
        if !sort_by.is_empty() {
            rows_query = rows_query
                .replace(&format!("ORDER BY {sort_by}"), "")
                .trim()
                .to_string();
        }

        if let Some(stripped) = rows_query.strip_suffix("WHERE (1)") {
            rows_query = stripped.trim().to_string();
        }

        let count_sql =
            format!("SELECT COUNT(*) AS total FROM ({rows_query}) AS total_count_table");

        let result = self.db.select(&count_sql).await?;

        match result.len() {
            0 => Ok(0),
            1 => Ok(total_from_row(&result[0])),
            group_count => Ok(group_count as u64),
        }
    }

    /// The compiled SQL before pagination, single-line and
    /// whitespace-collapsed
    pub fn unlimited_sql_query(&self) -> String {
        make_one_liner(&self.sql_without_limits)
    }

    /// Whether any registered filter matched a request value this cycle
    pub fn is_filtered(&self) -> bool {
        !self.active_filters().is_empty()
    }

    /// All registered filters, in registration order
    pub fn filters(&self) -> Vec<&FilterSpec> {
        self.filters.iter().map(|(_, filter)| filter).collect()
    }

    /// The filters whose request-bound value matched in the current cycle
    pub fn active_filters(&self) -> Vec<&FilterSpec> {
        self.filters
            .iter()
            .map(|(_, filter)| filter)
            .filter(|filter| filter.is_active())
            .collect()
    }

    /// 1-based global row index for a row offset on the current page
    pub fn result_index(&self, row_offset: usize) -> u64 {
        row_offset as u64
            + 1
            + u64::from(self.pagination.per_page) * u64::from(self.pagination.current_page - 1)
    }

    /// URL sorting the listing by `field`: toggles the direction when already
    /// sorting by it, defaults to descending otherwise
    pub fn sort_link(&self, field: &str) -> String {
        let (default_field, default_direction) = self
            .settings
            .default_sort()
            .map(|(f, d)| (f.to_string(), d.to_string()))
            .unwrap_or_default();

        let current_field = self
            .request
            .get("sortf")
            .and_then(|value| value.as_single().map(str::to_string))
            .unwrap_or(default_field);
        let current_direction = self
            .request
            .get("sortd")
            .and_then(|value| value.as_single().map(str::to_string))
            .unwrap_or(default_direction);

        let direction = if current_field == field {
            if current_direction == "asc" {
                "desc"
            } else {
                "asc"
            }
        } else {
            "desc"
        };

        let mut params = self.request.all();
        params.insert("sortf".to_string(), field.into());
        params.insert("sortd".to_string(), direction.into());

        let (pairs, _) = query_pairs(&params);
        let query_string = self.request.normalize_query_string(&pairs.join("&"));

        format!("{}?{}", self.request.url(), query_string)
    }

    /// CSS token for the sorting control of `field`, named after the NEXT
    /// click direction: ascending shows the descending indicator and vice
    /// versa
    pub fn sort_dir(&self, field: &str) -> String {
        let current_field = self
            .request
            .get("sortf")
            .and_then(|value| value.as_single().map(str::to_string))
            .unwrap_or_default();
        let current_direction = self
            .request
            .get("sortd")
            .and_then(|value| value.as_single().map(str::to_string))
            .unwrap_or_default();

        let declared = self.settings.direction_for(field).unwrap_or_default();

        let direction = if (current_field.is_empty() || current_direction.is_empty())
            && !declared.is_empty()
        {
            declared
        } else if current_field == field {
            current_direction.as_str()
        } else {
            ""
        };

        match direction {
            "asc" => self.config.css_class_sort_asc.clone(),
            "desc" => self.config.css_class_sort_desc.clone(),
            _ => String::new(),
        }
    }

    /// Cleaned URL when the current query string carries empty parameters,
    /// None when nothing needed dropping
    pub fn clean_query_string(&self) -> Option<String> {
        let (pairs, dropped_any) = query_pairs(&self.request.all());

        if !dropped_any {
            return None;
        }

        let query_string = self.request.normalize_query_string(&pairs.join("&"));
        Some(format!("{}?{}", self.request.url(), query_string))
    }

    /// Housekeeping for remembered filter URLs; returns a redirect target when
    /// the current request should be replaced by a remembered or reset one
    pub fn remember_filters(&self) -> Option<String> {
        self.persisted.remember(self.request.as_ref())
    }

    /// Redirect target when either a remembered URL applies or query-string
    /// cleanup dropped parameters
    pub fn redirect_url(&self) -> Option<String> {
        self.remember_filters().or_else(|| self.clean_query_string())
    }
}

fn total_from_row(row: &Value) -> u64 {
    match row.get("total") {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_i64().map(|n| n.max(0) as u64))
            .unwrap_or(0),
        Some(Value::String(text)) => text.parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_where_filters_regex_detection() {
        let re = where_filters_regex();

        assert!(re.is_match("FROM users WHERE {filters}"));
        assert!(re.is_match("FROM users WHERE name <> '' and {filters}"));
        assert!(re.is_match("FROM users WHERE \n name <> '' and\n email <> '' and\n {filters}"));
        assert!(!re.is_match("FROM users {filters}"));
    }

    #[test]
    fn test_total_from_row_accepts_number_and_string() {
        assert_eq!(total_from_row(&json!({"total": 11})), 11);
        assert_eq!(total_from_row(&json!({"total": "7"})), 7);
        assert_eq!(total_from_row(&json!({"other": 3})), 0);
    }
}
