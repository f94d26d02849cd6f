//! Text-only recovery of the container and package when no symbols exist.
//!
//! Kept apart from the symbol-driven path: everything here works on plain
//! source text with the line scanner's help.

use std::sync::LazyLock;

use regex::Regex;

use crate::scanner::LineScanner;

/// Name used when the text has no top-level type and no usable file name.
pub const PLACEHOLDER_CONTAINER: &str = "Unknown";

static TYPE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w$.])(?:class|interface|enum|record)\s+([A-Za-z_$][\w$]*)")
        .expect("type declaration pattern is valid")
});

static PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:package|namespace)\s+([\w.]+)").expect("package pattern is valid")
});

/// A container recovered from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContainer {
    pub name: String,
    /// `None` for the placeholder.
    pub line: Option<u32>,
}

/// Find the top-level type of the file.
///
/// Only declarations at brace depth zero count. With `prefer_base_name`, a
/// type named like the file wins over earlier ones; otherwise the first one
/// does. Without any, the file's base name (or [`PLACEHOLDER_CONTAINER`]) is
/// returned with no line.
#[must_use]
pub fn find_container(lines: &[&str], base_name: &str, prefer_base_name: bool) -> TextContainer {
    let mut scanner = LineScanner::default();
    let mut depth = 0i64;
    let mut found: Vec<TextContainer> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let scanned = scanner.scan(line);
        if depth == 0 {
            for captures in TYPE_DECLARATION.captures_iter(&scanned.skeleton) {
                if let Some(name) = captures.get(1) {
                    found.push(TextContainer {
                        name: name.as_str().to_string(),
                        line: u32::try_from(index).ok(),
                    });
                }
            }
        }
        depth = (depth + scanned.brace_delta()).max(0);
    }

    let preferred = if prefer_base_name {
        found.iter().position(|container| container.name == base_name)
    } else {
        None
    };
    match preferred.or_else(|| (!found.is_empty()).then_some(0)) {
        Some(index) => found.swap_remove(index),
        None => TextContainer {
            name: if base_name.is_empty() {
                PLACEHOLDER_CONTAINER.to_string()
            } else {
                base_name.to_string()
            },
            line: None,
        },
    }
}

/// The first `package x.y` or `namespace x.y` statement outside comments.
#[must_use]
pub fn find_package(lines: &[&str]) -> Option<String> {
    let mut scanner = LineScanner::default();
    lines.iter().find_map(|line| {
        let scanned = scanner.scan(line);
        PACKAGE
            .captures(&scanned.code)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = r#"
package com.example.orders;

/** Helper first. */
class Helper {
    class Nested {}
    String s = "class Fake {";
}

public class Orders {
    enum Inner { A }
}
"#;

    fn lines() -> Vec<&'static str> {
        SOURCE.lines().collect()
    }

    #[test]
    fn prefers_the_type_named_like_the_file() {
        let container = find_container(&lines(), "Orders", true);
        assert_eq!(container.name, "Orders");
        assert_eq!(container.line, Some(9));
    }

    #[test]
    fn takes_the_first_top_level_type_otherwise() {
        assert_eq!(find_container(&lines(), "Orders", false).name, "Helper");
        assert_eq!(find_container(&lines(), "Missing", true).name, "Helper");
    }

    #[test]
    fn nested_and_quoted_declarations_are_ignored() {
        let names: Vec<String> = ["Nested", "Fake", "Inner"]
            .iter()
            .map(|name| find_container(&lines(), name, true).name)
            .collect();
        assert!(names.iter().all(|name| name == "Helper"));
    }

    #[test]
    fn placeholder_when_no_type_is_declared() {
        let lines = vec!["// class Commented {", "int x = 1;"];
        assert_eq!(
            find_container(&lines, "Script", true),
            TextContainer {
                name: "Script".to_string(),
                line: None
            }
        );
        assert_eq!(find_container(&lines, "", true).name, PLACEHOLDER_CONTAINER);
    }

    #[test]
    fn class_literal_is_not_a_declaration() {
        let lines = vec!["Object o = Orders.class;", "record Point(int x, int y) {}"];
        let container = find_container(&lines, "", true);
        assert_eq!(container.name, "Point");
        assert_eq!(container.line, Some(1));
    }

    #[test]
    fn finds_package_outside_comments() {
        let lines = vec!["/* package wrong.one; */", "package com.example.orders;"];
        assert_eq!(find_package(&lines).as_deref(), Some("com.example.orders"));
        assert_eq!(find_package(&["namespace Acme.Billing"]).as_deref(), Some("Acme.Billing"));
        assert_eq!(find_package(&["class A {}"]), None);
    }
}
