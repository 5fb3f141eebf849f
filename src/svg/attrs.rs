//! Attribute lookup on a single start tag.

use regex::Regex;
use std::sync::LazyLock;

/// `name="value"` pairs preceded by whitespace or the start of the input.
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*"([^"]*)""#).unwrap()
});

/// Double-quoted attributes of one tag, in source order.
///
/// Names are matched whole, so looking up `x` never returns the value of `rx`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttrs<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> TagAttrs<'a> {
    /// Parse the attribute section of a tag (the text between the tag name
    /// and the closing `>` or `/>`).
    pub fn parse(attrs: &'a str) -> Self {
        let pairs = RE_ATTR
            .captures_iter(attrs)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let value = caps.get(2)?.as_str();
                Some((name, value))
            })
            .collect();
        Self { pairs }
    }

    /// Value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Value of `name` when present and not empty.
    pub fn non_empty(&self, name: &str) -> Option<&'a str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Whether an attribute called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }
}

/// Set `name` to `value` in an attribute section, keeping everything else as
/// written. A missing attribute is appended after the last one.
pub fn set_attr(attrs: &str, name: &str, value: &str) -> String {
    let existing = RE_ATTR
        .captures_iter(attrs)
        .find(|caps| caps.get(1).is_some_and(|n| n.as_str() == name))
        .and_then(|caps| caps.get(2));

    match existing {
        Some(old) => format!("{}{}{}", &attrs[..old.start()], value, &attrs[old.end()..]),
        None => {
            let body = attrs.trim_end();
            format!("{body} {name}=\"{value}\"{}", &attrs[body.len()..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rect_attrs() {
        let attrs = TagAttrs::parse(r#"x="10" y="20" width="100" height="50" rx="4""#);
        assert_eq!(attrs.get("width"), Some("100"));
        assert_eq!(attrs.get("x"), Some("10"));
        assert_eq!(attrs.get("height"), Some("50"));
        assert_eq!(attrs.get("rx"), Some("4"));
    }

    #[test]
    fn test_rx_before_x_does_not_shadow() {
        let attrs = TagAttrs::parse(r#"rx="8" ry="8" x="1" y="2""#);
        assert_eq!(attrs.get("x"), Some("1"));
        assert_eq!(attrs.get("y"), Some("2"));
    }

    #[test]
    fn test_missing_and_empty_values() {
        let attrs = TagAttrs::parse(r#"x="" fill="none""#);
        assert!(attrs.contains("x"));
        assert_eq!(attrs.non_empty("x"), None);
        assert_eq!(attrs.get("width"), None);
    }

    #[test]
    fn test_namespaced_and_hyphenated_names() {
        let attrs = TagAttrs::parse(r##"xlink:href="#a" clip-path="url(#clip-0)""##);
        assert_eq!(attrs.get("xlink:href"), Some("#a"));
        assert!(attrs.contains("clip-path"));
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let attrs = r#" d="M 0 0" stroke-width="2" marker-end="url(#a)""#;
        assert_eq!(
            set_attr(attrs, "stroke-width", "0.5"),
            r#" d="M 0 0" stroke-width="0.5" marker-end="url(#a)""#
        );
    }

    #[test]
    fn test_set_attr_appends_before_trailing_space() {
        assert_eq!(
            set_attr(r#" d="M 0 0" "#, "opacity", "0.8"),
            r#" d="M 0 0" opacity="0.8" "#
        );
        // `stroke-opacity` is a different attribute.
        assert_eq!(
            set_attr(r#" stroke-opacity="1""#, "opacity", "0.8"),
            r#" stroke-opacity="1" opacity="0.8""#
        );
    }

    #[test]
    fn test_iter_in_source_order() {
        let attrs = TagAttrs::parse(r#"x1="1" y1="2" stroke="red""#);
        let names: Vec<_> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["x1", "y1", "stroke"]);
    }
}
