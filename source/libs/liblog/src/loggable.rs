// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Per-tag loggable check driven by `log.tag.*` properties
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below
//!
//! Properties are re-read on every call; nothing is cached since they may change at runtime.

use std::collections::BTreeMap;

use crate::config::LogConfig;
use crate::priority::Priority;

pub const PROPERTY_PREFIX: &str = "log.tag.";
pub const PROPERTY_DEFAULT: &str = "log.tag.DEFAULT";
/// Property name buffer size, terminator included.
pub const PROP_NAME_MAX: usize = 32;

/// Read-only view of a property store.
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<String>;
}

impl PropertySource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl PropertySource for LogConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}

/// Property key for `tag`, cut to fit the property name buffer.
pub fn property_key(tag: &str) -> String {
    let mut key = String::with_capacity(PROP_NAME_MAX);
    key.push_str(PROPERTY_PREFIX);
    for c in tag.chars() {
        if key.len() + c.len_utf8() > PROP_NAME_MAX - 1 {
            break;
        }
        key.push(c);
    }
    key
}

/// Minimum priority that `tag` currently logs at.
pub fn threshold(props: &dyn PropertySource, tag: Option<&str>, fallback: Priority) -> Priority {
    let value = tag
        .and_then(|tag| props.get(&property_key(tag)))
        .filter(|v| !v.is_empty())
        .or_else(|| props.get(PROPERTY_DEFAULT).filter(|v| !v.is_empty()));
    match value {
        Some(v) => Priority::from_property_char(v.as_bytes()[0]).unwrap_or(fallback),
        None => fallback,
    }
}

pub fn is_loggable(
    props: &dyn PropertySource,
    prio: Priority,
    tag: Option<&str>,
    fallback: Priority,
) -> bool {
    prio >= threshold(props, tag, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn tag_property_wins() {
        let p = props(&[("log.tag.RILJ", "V"), ("log.tag.DEFAULT", "E")]);
        assert!(is_loggable(&p, Priority::Verbose, Some("RILJ"), Priority::Info));
        assert!(!is_loggable(&p, Priority::Warn, Some("Other"), Priority::Info));
        assert!(is_loggable(&p, Priority::Error, Some("Other"), Priority::Info));
    }

    #[test]
    fn fallback_when_nothing_set() {
        let p = props(&[]);
        assert!(!is_loggable(&p, Priority::Debug, Some("x"), Priority::Info));
        assert!(is_loggable(&p, Priority::Info, None, Priority::Info));
    }

    #[test]
    fn unknown_letter_uses_fallback() {
        let p = props(&[("log.tag.x", "Quiet")]);
        assert_eq!(threshold(&p, Some("x"), Priority::Warn), Priority::Warn);
    }

    #[test]
    fn silent_suppresses_fatal() {
        let p = props(&[("log.tag.x", "SUPPRESS")]);
        assert!(!is_loggable(&p, Priority::Fatal, Some("x"), Priority::Info));
    }

    #[test]
    fn long_tags_are_cut() {
        let key = property_key("AVeryLongTagNameThatKeepsGoingOnAndOn");
        assert_eq!(key.len(), PROP_NAME_MAX - 1);
        assert_eq!(key, "log.tag.AVeryLongTagNameThatKee");
        let p = props(&[("log.tag.AVeryLongTagNameThatKee", "D")]);
        assert!(is_loggable(&p, Priority::Debug, Some("AVeryLongTagNameThatKeepsGoingOnAndOn"), Priority::Info));
    }
}
