//! # Query-String Helpers
//!
//! Assembly of `key=value` pairs from request parameters, with `key[]=`
//! expansion for multi-values and empty entries dropped.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::request::ParamValue;

pub(crate) fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// Build encoded query pairs; the flag reports whether any empty entry was
/// dropped along the way
pub(crate) fn query_pairs(params: &BTreeMap<String, ParamValue>) -> (Vec<String>, bool) {
    let mut pairs = Vec::new();
    let mut dropped_any = false;

    for (key, value) in params {
        match value {
            ParamValue::Single(scalar) => {
                if scalar.is_empty() {
                    dropped_any = true;
                } else {
                    pairs.push(format!("{}={}", key, encode_component(scalar)));
                }
            }
            ParamValue::Multi(items) => {
                for item in items {
                    if item.is_empty() {
                        dropped_any = true;
                    } else {
                        pairs.push(format!("{}[]={}", key, encode_component(item)));
                    }
                }
            }
        }
    }

    (pairs, dropped_any)
}

/// Collapse newlines and runs of whitespace into single spaces
pub(crate) fn make_one_liner(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
