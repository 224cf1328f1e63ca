//! # Persisted Filter State
//!
//! Remembers the last applied filter query string per request path so a user
//! can return to a filtered view without re-entering parameters, and supports
//! an explicit reset signal. Backed by an injected [`SessionStore`]; keys are
//! namespaced by request path.

use std::sync::Arc;

use crate::lister::urls::query_pairs;
use crate::request::RequestContext;
use crate::session::SessionStore;

pub struct PersistedFilterState {
    store: Arc<dyn SessionStore>,
    key_prefix: String,
}

impl PersistedFilterState {
    pub fn new(store: Arc<dyn SessionStore>, key_prefix: &str) -> Self {
        Self {
            store,
            key_prefix: key_prefix.to_string(),
        }
    }

    fn key(&self, path: &str) -> String {
        format!("{}{}", self.key_prefix, path)
    }

    /// Unconditionally clear the remembered entry for a path
    pub fn forget(&self, path: &str) {
        self.store.forget(&self.key(path));
    }

    /// Housekeeping for the remembered query string of the request's path.
    ///
    /// A `reset` signal clears the entry and redirects to the bare path. A
    /// remembered entry combined with a parameterless request clears the
    /// entry and redirects to it (one-shot replay). A request carrying
    /// parameters refreshes the entry; no redirect is needed then.
    pub fn remember(&self, request: &dyn RequestContext) -> Option<String> {
        let path = request.path();
        let remembered = self.store.get(&self.key(&path));
        let params = request.all();

        if (remembered.is_some() && params.is_empty()) || request.exists("reset") {
            self.forget(&path);

            return if request.exists("reset") {
                Some(path)
            } else {
                remembered
            };
        }

        if !params.is_empty() {
            let (pairs, _) = query_pairs(&params);
            let query_string = request.normalize_query_string(&pairs.join("&"));

            let target = if query_string.is_empty() {
                path.clone()
            } else {
                format!("{path}?{query_string}")
            };

            self.store.put(&self.key(&path), &target);
        }

        None
    }
}
