//! Signature-free extraction for fields and enum constants.

use docket_core::UNKNOWN_TYPE;

use crate::scanner::{LexState, scan_line};
use crate::syntax::{find_code, generic_tokens, matching_close, strip_leading_annotations};

/// Comment-free, trimmed code of a single declaration line.
fn code_of(line: &str) -> String {
    scan_line(line, LexState::default()).code.trim().to_string()
}

/// Whether the declaration line carries both `static` and `final`.
#[must_use]
pub fn is_constant(line: &str) -> bool {
    let code = code_of(line);
    let words: Vec<&str> = code
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|word| !word.is_empty())
        .collect();
    words.contains(&"static") && words.contains(&"final")
}

/// Declared type of a field: the token before the name, ahead of any `=`.
///
/// Type arguments stay together, so `Map<String, Integer> counts` yields
/// `Map<String, Integer>`. A line with a single token yields `unknown`.
#[must_use]
pub fn field_type(line: &str) -> String {
    let code = code_of(line);
    let declaration = strip_leading_annotations(&code);
    let head = find_code(declaration, '=').map_or(declaration, |at| &declaration[..at]);
    let head = head.trim().trim_end_matches(';').trim_end();

    let tokens = generic_tokens(head);
    if tokens.len() < 2 {
        return UNKNOWN_TYPE.to_string();
    }
    tokens[tokens.len() - 2].to_string()
}

/// Constructor arguments of an enum constant, parentheses included.
///
/// Empty when the constant has no argument list. An argument list that never
/// closes on this line runs to the end of it, minus a trailing `,` or `;`.
#[must_use]
pub fn enum_arguments(line: &str) -> String {
    let code = code_of(line);
    let constant = strip_leading_annotations(&code);
    let Some(open) = find_code(constant, '(') else {
        return String::new();
    };
    match matching_close(constant, open, b'(', b')') {
        Some(close) => constant[open..=close].to_string(),
        None => constant[open..]
            .trim_end()
            .trim_end_matches([',', ';'])
            .trim_end()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(r#"SUCCESS(200, "OK"),"#, r#"(200, "OK")"#)]
    #[case("PENDING,", "")]
    #[case("LAST;", "")]
    #[case(r#"    WRAPPED("a (b)", 1) {"#, r#"("a (b)", 1)"#)]
    #[case("@Deprecated OLD(1), // retired", "(1)")]
    #[case(r#"OPEN(1, "x","#, r#"(1, "x""#)]
    fn enum_constant_arguments(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(enum_arguments(line), expected);
    }

    #[rstest]
    #[case("private int count;", "int")]
    #[case("public static final String NAME = \"a = b\";", "String")]
    #[case("private final Map<String, List<Integer>> index = new HashMap<>();", "Map<String, List<Integer>>")]
    #[case("@Column(name = \"id\") private long id;", "long")]
    #[case("int[] values; // cached", "int[]")]
    #[case("count;", UNKNOWN_TYPE)]
    fn field_types(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(field_type(line), expected);
    }

    #[rstest]
    #[case("public static final int MAX = 3;", true)]
    #[case("static final String A = \"\";", true)]
    #[case("private static int counter;", false)]
    #[case("private final int finalized;", false)]
    #[case("int staticValue; // static final", false)]
    fn constants(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_constant(line), expected);
    }
}
