//! Text helpers for synthesis: markdown cleanup, identifiers, attribute
//! stringification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("static regex"));

/// Rewrite markdown link syntax `[label](url)` to just `label`.
///
/// This is a narrow substitution, not markdown rendering; every other
/// construct passes through unchanged.
#[must_use]
pub fn clean_markdown_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}

/// Extract the tag from a container image reference.
///
/// `repo/image:tag` yields `tag`; a reference without a colon yields
/// `latest`.
#[must_use]
pub fn docker_tag(image: &str) -> &str {
    match image.rsplit_once(':') {
        Some((_, tag)) => tag,
        None => "latest",
    }
}

/// Derive a section id from a group name: lowercase, whitespace to
/// underscores, everything else outside `[a-z0-9_]` stripped.
#[must_use]
pub fn section_id(group_name: &str) -> String {
    group_name
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Stringify a blueprint value for use as a widget attribute.
///
/// Numbers keep their JSON spelling so `0.5` stays `0.5`; null and missing
/// degrade to the empty string.
#[must_use]
pub fn attr_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Interpret a blueprint default as a checkbox state.
#[must_use]
pub fn default_checked(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Infer an output file format from a file name's extension, defaulting to
/// the platform's generic `data` type.
#[must_use]
pub fn format_from_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            ext.to_lowercase()
        }
        _ => "data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_markdown_links() {
        assert_eq!(
            clean_markdown_links("This is [a link](http://example.com) in text"),
            "This is a link in text"
        );
        assert_eq!(
            clean_markdown_links("[one](u1) and [two](u2)"),
            "one and two"
        );
        // Other markdown passes through.
        assert_eq!(clean_markdown_links("**bold** `code`"), "**bold** `code`");
    }

    #[test]
    fn test_docker_tag() {
        assert_eq!(docker_tag("repo/image:v1.0"), "v1.0");
        assert_eq!(docker_tag("repo/image:latest"), "latest");
        assert_eq!(docker_tag("repo/image"), "latest");
    }

    #[test]
    fn test_section_id() {
        assert_eq!(section_id("Basic Parameters"), "basic_parameters");
        assert_eq!(section_id("Advanced Settings"), "advanced_settings");
        assert_eq!(section_id("Special-Chars!"), "specialchars");
    }

    #[test]
    fn test_attr_value() {
        assert_eq!(attr_value(Some(&json!("default"))), "default");
        assert_eq!(attr_value(Some(&json!(10))), "10");
        assert_eq!(attr_value(Some(&json!(0.5))), "0.5");
        assert_eq!(attr_value(Some(&json!(null))), "");
        assert_eq!(attr_value(None), "");
    }

    #[test]
    fn test_default_checked() {
        assert!(default_checked(Some(&json!(true))));
        assert!(!default_checked(Some(&json!(false))));
        assert!(default_checked(Some(&json!("True"))));
        assert!(!default_checked(Some(&json!("no"))));
        assert!(!default_checked(None));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("output.csv"), "csv");
        assert_eq!(format_from_extension("result.TXT"), "txt");
        assert_eq!(format_from_extension("noext"), "data");
        assert_eq!(format_from_extension("results/"), "data");
    }
}
