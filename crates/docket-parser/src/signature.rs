//! Multi-line signature recovery and signature-derived type information.

use std::sync::LazyLock;

use docket_core::Parameter;
use regex::Regex;

use crate::ParserError;
use crate::scanner::LineScanner;
use crate::syntax::{
    find_code, is_identifier_char, matching_close, normalize_whitespace, split_top_level,
    strip_leading_annotations, strip_modifiers, strip_parameter_modifiers,
};

/// Default cap on the number of lines one signature may span.
pub const DEFAULT_MAX_SIGNATURE_LINES: usize = 15;

/// `ReturnType name(` once modifiers and generics are gone.
static RETURN_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+[\w$]+\s*\($").expect("return type pattern is valid")
});

/// What may follow a method-level `<T ...>` declaration.
static AFTER_TYPE_PARAMETERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w$.\[\]<>?, ]+?\s+)?[\w$]+\s*\(").expect("type parameter pattern is valid")
});

/// Tracks whether the scanner sits inside an annotation's argument list, so
/// `@Named("x")` before a method does not look like the parameter list.
#[derive(Debug, Default)]
enum AnnotationState {
    #[default]
    Outside,
    Name,
    AfterName,
    Arguments(usize),
}

/// Recover the declaration text starting at `start`.
///
/// Lines are accumulated (comments removed) until the parenthesis depth
/// returns to zero after having been opened; the text is cut right after that
/// `)`. At most `max_lines` lines are read; when the cap or the end of the
/// document is reached first, whatever was accumulated is returned.
pub fn extract_signature(
    lines: &[&str],
    start: usize,
    max_lines: usize,
) -> Result<String, ParserError> {
    if start >= lines.len() {
        return Err(ParserError::LineOutOfRange {
            line: start,
            line_count: lines.len(),
        });
    }

    let mut scanner = LineScanner::default();
    let mut annotation = AnnotationState::default();
    let mut depth = 0usize;
    let mut opened = false;
    let mut parts = Vec::new();

    for line in lines.iter().skip(start).take(max_lines.max(1)) {
        let scanned = scanner.scan(line);
        let mut cut = None;

        for (index, c) in scanned.skeleton.char_indices() {
            if let AnnotationState::Arguments(inner) = &mut annotation {
                match c {
                    '(' => *inner += 1,
                    ')' => {
                        *inner -= 1;
                        if *inner == 0 {
                            annotation = AnnotationState::Outside;
                        }
                    }
                    _ => {}
                }
                continue;
            }
            match annotation {
                AnnotationState::Name if is_identifier_char(c) || c == '.' => continue,
                AnnotationState::Name | AnnotationState::AfterName if c.is_whitespace() => {
                    annotation = AnnotationState::AfterName;
                    continue;
                }
                AnnotationState::Name | AnnotationState::AfterName if c == '(' => {
                    annotation = AnnotationState::Arguments(1);
                    continue;
                }
                _ => annotation = AnnotationState::Outside,
            }

            match c {
                '@' => annotation = AnnotationState::Name,
                '(' => {
                    depth += 1;
                    opened = true;
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    if opened && depth == 0 {
                        cut = Some(index + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        match cut {
            Some(end) => {
                parts.push(scanned.code[..end].to_string());
                return Ok(normalize_whitespace(&parts.join(" ")));
            }
            None => parts.push(scanned.code),
        }
    }

    Ok(normalize_whitespace(&parts.join(" ")))
}

/// A recovered signature with the information derived from its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub text: String,
    pub parameters: Vec<Parameter>,
    /// `None` for constructors and `void` methods.
    pub return_type: Option<String>,
}

impl Signature {
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            parameters: parameters(&text),
            return_type: return_type(&text),
            text,
        }
    }

    /// Declared type of the parameter called `name`.
    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.type_name.as_str())
    }

    /// `name(Type1, Type2)`.
    #[must_use]
    pub fn display(&self, name: &str) -> String {
        let types: Vec<&str> = self
            .parameters
            .iter()
            .map(|parameter| parameter.type_name.as_str())
            .collect();
        format!("{name}({})", types.join(", "))
    }

    #[must_use]
    pub fn has_parameter_list(&self) -> bool {
        find_code(&self.text, '(').is_some()
    }
}

/// `(name, type)` pairs of the first top-level parameter list.
fn parameters(text: &str) -> Vec<Parameter> {
    let head = strip_leading_annotations(text);
    let Some(open) = find_code(head, '(') else {
        return Vec::new();
    };
    let inner = match matching_close(head, open, b'(', b')') {
        Some(close) => &head[open + 1..close],
        None => &head[open + 1..],
    };

    split_top_level(inner)
        .into_iter()
        .filter_map(|piece| {
            let piece = strip_leading_annotations(piece);
            let piece = strip_parameter_modifiers(piece);
            let piece = strip_leading_annotations(piece);
            let (type_name, name) = piece.rsplit_once(char::is_whitespace)?;
            let type_name = normalize_whitespace(type_name);
            if type_name.is_empty() || name.is_empty() {
                return None;
            }
            Some(Parameter {
                name: name.to_string(),
                type_name,
            })
        })
        .collect()
}

/// Declared return type, or `None` for constructors and `void`.
fn return_type(text: &str) -> Option<String> {
    let mut rest = strip_leading_annotations(text);
    if let Some(body) = find_code(rest, '{') {
        rest = &rest[..body];
    }
    rest = strip_modifiers(rest.trim());

    if rest.starts_with('<') {
        if let Some(close) = matching_close(rest, 0, b'<', b'>') {
            let after = rest[close + 1..].trim_start();
            if AFTER_TYPE_PARAMETERS.is_match(after) {
                rest = strip_modifiers(after);
            }
        }
    }

    let open = find_code(rest, '(')?;
    let head = &rest[..=open];
    let captures = RETURN_TYPE.captures(head)?;
    let return_type = normalize_whitespace(captures.get(1)?.as_str());
    (return_type != "void").then_some(return_type)
}
