//! # Configuration
//!
//! Listing defaults that callers can override per instance or per request.

use crate::error::{ListerError, Result};

#[derive(Debug, Clone)]
pub struct ListerConfig {
    /// Page size used when the request carries no `rpp` parameter
    pub results_per_page: u32,
    /// CSS token rendered on a column currently sorted ascending
    pub css_class_sort_asc: String,
    /// CSS token rendered on a column currently sorted descending
    pub css_class_sort_desc: String,
    /// Session key namespace for remembered filter query strings
    pub session_key_prefix: String,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            results_per_page: 20,
            // the tokens name the NEXT click direction, hence the inversion
            css_class_sort_asc: "sort-desc active".to_string(),
            css_class_sort_desc: "sort-asc active".to_string(),
            session_key_prefix: "filters.".to_string(),
        }
    }
}

impl ListerConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(rpp) = std::env::var("LISTER_RESULTS_PER_PAGE") {
            config.results_per_page = rpp.parse().map_err(|e| ListerError::Configuration {
                message: format!("Invalid results_per_page: {e}"),
            })?;
        }

        if let Ok(prefix) = std::env::var("LISTER_SESSION_KEY_PREFIX") {
            config.session_key_prefix = prefix;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ListerConfig::default();
        assert_eq!(config.results_per_page, 20);
        assert_eq!(config.session_key_prefix, "filters.");
    }

    #[test]
    fn test_from_env_override() {
        std::env::set_var("LISTER_RESULTS_PER_PAGE", "50");
        let config = ListerConfig::from_env().unwrap();
        assert_eq!(config.results_per_page, 50);
        std::env::remove_var("LISTER_RESULTS_PER_PAGE");
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        std::env::set_var("LISTER_RESULTS_PER_PAGE", "ten");
        assert!(ListerConfig::from_env().is_err());
        std::env::remove_var("LISTER_RESULTS_PER_PAGE");
    }
}
