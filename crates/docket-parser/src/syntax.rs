//! Delimiter matching and prefix stripping over comment-free declaration text.
//!
//! All helpers skip literal contents through [`literal_mask`], so a `)` or a
//! `,` inside a string never ends a group.

use crate::scanner::literal_mask;

/// Declaration modifiers stripped before looking for a return type.
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "default",
    "strictfp",
    "transient",
    "volatile",
    "sealed",
    "non-sealed",
];

/// Modifiers allowed in front of a single parameter.
const PARAMETER_MODIFIERS: &[&str] = &["final", "const"];

pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Byte index of the delimiter that closes the one at `open_at`.
///
/// Returns `None` when `open_at` does not hold `open` or the group never closes.
pub fn matching_close(text: &str, open_at: usize, open: u8, close: u8) -> Option<usize> {
    let mask = literal_mask(text);
    let bytes = mask.as_bytes();
    if bytes.get(open_at) != Some(&open) {
        return None;
    }

    let mut depth = 0usize;
    for (index, &byte) in bytes.iter().enumerate().skip(open_at) {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Byte index of the first `needle` outside any literal.
pub fn find_code(text: &str, needle: char) -> Option<usize> {
    literal_mask(text).find(needle)
}

/// Split on commas that are not nested in `<...>` or `(...)`.
///
/// Pieces are trimmed and empty pieces dropped.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mask = literal_mask(text);
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut from = 0;

    for (index, byte) in mask.bytes().enumerate() {
        match byte {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                pieces.push(text[from..index].trim());
                from = index + 1;
            }
            _ => {}
        }
    }
    pieces.push(text[from..].trim());
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

/// Strip leading `@Name`, `@a.b.Name` and `@Name(args)` annotations.
///
/// `@interface` is a declaration keyword, not an annotation, and stops the
/// stripping. An argument list that never closes swallows the rest of the text.
pub fn strip_leading_annotations(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        if !rest.starts_with('@') || rest.starts_with("@interface") {
            return rest;
        }
        let name_len = rest[1..]
            .find(|c: char| !(is_identifier_char(c) || c == '.'))
            .unwrap_or(rest.len() - 1);
        if name_len == 0 {
            return rest;
        }

        let after_name = &rest[1 + name_len..];
        let candidate = after_name.trim_start();
        if candidate.starts_with('(') {
            let open_at = rest.len() - candidate.len();
            match matching_close(rest, open_at, b'(', b')') {
                Some(close) => rest = rest[close + 1..].trim_start(),
                None => return "",
            }
        } else {
            rest = after_name.trim_start();
        }
    }
}

/// Strip leading declaration modifiers (`public static final ...`).
pub fn strip_modifiers(text: &str) -> &str {
    strip_words(text, MODIFIERS)
}

/// Strip leading parameter modifiers (`final`, `const`).
pub fn strip_parameter_modifiers(text: &str) -> &str {
    strip_words(text, PARAMETER_MODIFIERS)
}

fn strip_words<'a>(text: &'a str, words: &[&str]) -> &'a str {
    let mut rest = text.trim_start();
    loop {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        if word.is_empty() || !words.contains(&word) {
            return rest;
        }
        rest = tail.trim_start();
    }
}

/// Split on whitespace outside `<...>`, so `Map<K, V> name` is two tokens.
pub fn generic_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut from: Option<usize> = None;

    for (index, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c.is_whitespace() && depth == 0 {
            if let Some(start) = from.take() {
                tokens.push(&text[start..index]);
            }
        } else if from.is_none() {
            from = Some(index);
        }
    }
    if let Some(start) = from {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Collapse runs of whitespace (including newlines) to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn matching_close_skips_literals_and_nesting() {
        let text = r#"f(a, g(")"), b) + 1"#;
        assert_eq!(matching_close(text, 1, b'(', b')'), Some(14));
        assert_eq!(matching_close(text, 0, b'(', b')'), None);
        assert_eq!(matching_close("f(a, (b", 1, b'(', b')'), None);
    }

    #[test]
    fn split_respects_generics_and_parens() {
        let pieces = split_top_level("Map<String, Integer> m, @Size(min = 1, max = 2) int n, String s");
        assert_eq!(
            pieces,
            vec!["Map<String, Integer> m", "@Size(min = 1, max = 2) int n", "String s"]
        );
        assert!(split_top_level("  ").is_empty());
    }

    #[test]
    fn split_ignores_commas_in_literals() {
        assert_eq!(split_top_level(r#"@Tag(",") String a, int b"#).len(), 2);
    }

    #[rstest]
    #[case("@NotNull final String a", "final String a")]
    #[case("@Override public void run()", "public void run()")]
    #[case("@javax.annotation.Nullable String s", "String s")]
    #[case(r#"@Named("a)b") @Inject Service s"#, "Service s")]
    #[case("@Size (min = 1) int n", "int n")]
    #[case("@interface Marker", "@interface Marker")]
    #[case("@Broken(x = 1 int n", "")]
    #[case("String plain", "String plain")]
    fn strips_leading_annotations(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_leading_annotations(input), expected);
    }

    #[test]
    fn strips_modifier_runs() {
        assert_eq!(strip_modifiers("public static final int MAX"), "int MAX");
        assert_eq!(strip_modifiers("non-sealed class A"), "class A");
        assert_eq!(strip_modifiers("publicity x"), "publicity x");
        assert_eq!(strip_parameter_modifiers("final String a"), "String a");
        assert_eq!(strip_parameter_modifiers("static int a"), "static int a");
    }

    #[test]
    fn generic_tokens_keep_type_arguments_together() {
        assert_eq!(
            generic_tokens("private Map<String, List<Integer>>  cache"),
            vec!["private", "Map<String, List<Integer>>", "cache"]
        );
    }

    #[test]
    fn normalizes_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\t b   c "), "a b c");
    }
}
