//! # Predicate Generation
//!
//! Turns an active filter and its matched request value into one SQL predicate
//! fragment. Values are inlined as escaped literals, never bound parameters:
//! the raw-template substitution contract depends on textual interpolation.

use super::filter::FilterSpec;
use crate::request::{is_numeric_str, ParamValue};

/// Backslash-escape quote, backslash and NUL characters in a literal.
///
/// Equivalent to MySQL's `addslashes`-style neutralization. This is string
/// interpolation, not parameter binding.
pub fn escape_literal(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape every literal carried by a request value
pub fn escape_value(value: &ParamValue) -> ParamValue {
    match value {
        ParamValue::Single(scalar) => ParamValue::Single(escape_literal(scalar)),
        ParamValue::Multi(items) => {
            ParamValue::Multi(items.iter().map(|item| escape_literal(item)).collect())
        }
    }
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FilterSpec {
    /// Render the predicate fragment for this filter given its escaped value.
    ///
    /// Resolution order: raw template substitution, then `IN` lists, then
    /// `LIKE` wrapping, then plain `column operator value` with numeric
    /// values left unquoted.
    pub(crate) fn predicate(&self, escaped: &ParamValue) -> Option<String> {
        if let Some(template) = self.raw_query().filter(|t| !t.is_empty()) {
            let placeholder = format!("{{{}}}", self.input_name()?);
            let rendered = match escaped {
                ParamValue::Single(scalar) => format!("'{scalar}'"),
                ParamValue::Multi(_) => quoted_list(&escaped.items()),
            };
            return Some(template.replace(&placeholder, &rendered));
        }

        let column = self.db_column()?;
        let operator = self.search_operator();

        if operator == "IN" || matches!(escaped, ParamValue::Multi(_)) {
            return Some(format!("{} IN ({})", column, quoted_list(&escaped.items())));
        }

        let scalar = escaped.as_single()?;

        if operator.eq_ignore_ascii_case("LIKE") {
            return Some(format!("{column} {operator} '%{scalar}%'"));
        }

        if is_numeric_str(scalar) {
            Some(format!("{column} {operator} {scalar}"))
        } else {
            Some(format!("{column} {operator} '{scalar}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterFactory;
    use proptest::prelude::*;

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("plain"), "plain");
        assert_eq!(escape_literal("O'Brien"), "O\\'Brien");
        assert_eq!(escape_literal(r"a\b"), r"a\\b");
        assert_eq!(escape_literal("say \"hi\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_equality_predicate_quotes_non_numeric() {
        let filter = FilterFactory::text("name").with_label("Name");
        let predicate = filter.predicate(&ParamValue::from("alice")).unwrap();
        assert_eq!(predicate, "name = 'alice'");
    }

    #[test]
    fn test_numeric_values_are_unquoted() {
        let filter = FilterFactory::text("id").with_label("Id");
        assert_eq!(filter.predicate(&ParamValue::from("0")).unwrap(), "id = 0");
        assert_eq!(
            filter.predicate(&ParamValue::from("12.5")).unwrap(),
            "id = 12.5"
        );
    }

    #[test]
    fn test_like_operator_wraps_with_wildcards() {
        let filter = FilterFactory::text("email")
            .with_label("Email")
            .with_operator("like");
        let predicate = filter.predicate(&ParamValue::from("test123")).unwrap();
        assert_eq!(predicate, "email LIKE '%test123%'");
    }

    #[test]
    fn test_in_operator_renders_quoted_list() {
        let filter = FilterFactory::text("id").with_label("Id").with_operator("in");
        let predicate = filter
            .predicate(&ParamValue::from(vec!["1", "2"]))
            .unwrap();
        assert_eq!(predicate, "id IN ('1', '2')");

        // a scalar under IN still renders as a one-element list
        let predicate = filter.predicate(&ParamValue::from("7")).unwrap();
        assert_eq!(predicate, "id IN ('7')");
    }

    #[test]
    fn test_multi_value_forces_in_even_with_equality_operator() {
        let filter = FilterFactory::checkbox("tag").with_items(&[("a", "A"), ("b", "B")]);
        let predicate = filter
            .predicate(&ParamValue::from(vec!["a", "b"]))
            .unwrap();
        assert_eq!(predicate, "tag IN ('a', 'b')");
    }

    #[test]
    fn test_raw_template_substitution() {
        let filter = FilterFactory::text("q")
            .with_label("Query")
            .with_raw_query("(name LIKE {q} OR email LIKE {q})");
        let predicate = filter.predicate(&ParamValue::from("abc")).unwrap();
        assert_eq!(predicate, "(name LIKE 'abc' OR email LIKE 'abc')");

        let filter = FilterFactory::text("ids")
            .with_label("Ids")
            .with_raw_query("id IN ({ids})");
        let predicate = filter
            .predicate(&ParamValue::from(vec!["1", "2"]))
            .unwrap();
        assert_eq!(predicate, "id IN ('1', '2')");
    }

    proptest! {
        // every quote and backslash in the input must come out escaped
        #[test]
        fn prop_escaped_literal_has_no_unescaped_quote(input in ".*") {
            let escaped = escape_literal(&input);
            let mut chars = escaped.chars();
            while let Some(ch) = chars.next() {
                if ch == '\\' {
                    // consume the escaped character
                    prop_assert!(chars.next().is_some());
                } else {
                    prop_assert!(ch != '\'' && ch != '"');
                }
            }
        }
    }
}
