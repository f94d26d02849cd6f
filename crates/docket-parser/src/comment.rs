//! Locating the block comment that documents a declaration.
//!
//! The search walks upward from the declaration as a small state machine:
//!
//! * [`Search::SeekingClose`] looks for the nearest line ending in `*/`.
//! * [`Search::VerifyingGap`] checks that only blank lines and complete
//!   annotations separate that comment from the declaration.
//! * [`Search::SeekingOpen`] walks further up to the matching `/*`, which
//!   must be the first code on its line.
//!
//! A failed gap check or a foreign `*/` met while seeking the opening token
//! sends the search back to [`Search::SeekingClose`] above the candidate.

use crate::scanner::LineScanner;
use crate::syntax::strip_leading_annotations;

/// A block comment found above a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub start_line: usize,
    pub end_line: usize,
    /// From `/*` through `*/`, lines joined with `\n`.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    /// Look for a closing token strictly above `below`.
    SeekingClose { below: usize },
    /// Lines between `close` and `declaration` must be blank or annotations.
    VerifyingGap { close: usize },
    /// Walk up from `close` to the opening token.
    SeekingOpen { close: usize },
    Found { open: usize, close: usize },
    Exhausted,
}

/// Find the comment documenting the declaration that starts at `declaration`.
#[must_use]
pub fn locate_comment(lines: &[&str], declaration: usize) -> Option<CommentBlock> {
    let declaration = declaration.min(lines.len());
    let mut state = Search::SeekingClose { below: declaration };

    loop {
        state = match state {
            Search::SeekingClose { below } => seek_close(lines, below),
            Search::VerifyingGap { close } => {
                if gap_is_transparent(&lines[close + 1..declaration]) {
                    Search::SeekingOpen { close }
                } else {
                    Search::SeekingClose { below: close }
                }
            }
            Search::SeekingOpen { close } => seek_open(lines, close),
            Search::Found { open, close } => {
                return Some(CommentBlock {
                    start_line: open,
                    end_line: close,
                    text: block_text(&lines[open..=close]),
                });
            }
            Search::Exhausted => return None,
        };
    }
}

fn seek_close(lines: &[&str], below: usize) -> Search {
    (0..below)
        .rev()
        .find(|&index| lines[index].trim_end().ends_with("*/"))
        .map_or(Search::Exhausted, |close| Search::VerifyingGap { close })
}

fn seek_open(lines: &[&str], close: usize) -> Search {
    let close_line = lines[close].trim_end();
    let before_close = &close_line[..close_line.len() - 2];
    if let Some(start) = before_close.find("/*") {
        return opened_at(lines, close, start, close);
    }

    for index in (0..close).rev() {
        let line = lines[index];
        if line.contains("*/") {
            return Search::SeekingClose { below: index + 1 };
        }
        if let Some(start) = line.find("/*") {
            return opened_at(lines, index, start, close);
        }
    }
    Search::Exhausted
}

/// A comment trailing code on its opening line documents that code, not
/// the declaration below.
fn opened_at(lines: &[&str], open: usize, start: usize, close: usize) -> Search {
    if lines[open][..start].trim().is_empty() {
        Search::Found { open, close }
    } else {
        Search::SeekingClose { below: open }
    }
}

/// Whether every line is blank or part of a complete annotation.
///
/// Annotation argument lists may span several lines; their parenthesis depth
/// is carried until it closes, and whatever follows the closing `)` must
/// itself be annotations.
fn gap_is_transparent(gap: &[&str]) -> bool {
    let mut scanner = LineScanner::default();
    let mut depth = 0i64;

    for line in gap {
        let scanned = scanner.scan(line);
        if depth > 0 {
            let Some(close) = closing_paren(&scanned.skeleton, depth) else {
                depth += scanned.paren_delta();
                continue;
            };
            match annotation_depth(&scanned.code[close + 1..], &scanned.skeleton[close + 1..]) {
                Some(open) => depth = open,
                None => return false,
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }
        if scanned.code.trim().is_empty() {
            return false;
        }
        match annotation_depth(&scanned.code, &scanned.skeleton) {
            Some(open) => depth = open,
            None => return false,
        }
    }
    true
}

/// Paren depth left open by `code` if it holds nothing but annotations.
fn annotation_depth(code: &str, skeleton: &str) -> Option<i64> {
    let code = code.trim();
    if code.is_empty() {
        return Some(0);
    }
    if !code.starts_with('@') || code.starts_with("@interface") {
        return None;
    }
    strip_leading_annotations(code)
        .is_empty()
        .then(|| paren_balance(skeleton).max(0))
}

/// Byte offset of the `)` that brings `depth` open parens back to zero.
fn closing_paren(skeleton: &str, mut depth: i64) -> Option<usize> {
    for (offset, byte) in skeleton.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn paren_balance(skeleton: &str) -> i64 {
    skeleton.bytes().fold(0, |balance, byte| match byte {
        b'(' => balance + 1,
        b')' => balance - 1,
        _ => balance,
    })
}

fn block_text(lines: &[&str]) -> String {
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut line = *line;
            if index == last {
                if let Some(end) = line.rfind("*/") {
                    line = &line[..end + 2];
                }
            }
            if index == 0 {
                if let Some(start) = line.find("/*") {
                    line = &line[start..];
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A comment split into free text and tag section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Text before the first `@tag` line, trimmed.
    pub description: String,
    /// Every line from the first `@tag` line on, decoration removed.
    pub tag_section: String,
    /// The comment as it appeared in the source.
    pub raw: String,
}

impl DocComment {
    /// Strip delimiters and `*` decoration, then split off the tag section.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let body: Vec<&str> = text.lines().map(undecorate).collect();
        let tags_at = body
            .iter()
            .position(|line| starts_tag(line))
            .unwrap_or(body.len());

        Self {
            description: body[..tags_at].join("\n").trim().to_string(),
            tag_section: body[tags_at..].join("\n"),
            raw: text.to_string(),
        }
    }
}

fn undecorate(line: &str) -> &str {
    let mut line = line.trim();
    if let Some(rest) = line.strip_prefix("/*") {
        line = rest.trim_start_matches('*');
    }
    if let Some(rest) = line.strip_suffix("*/") {
        line = rest;
    }
    line.trim_start_matches(|c: char| c == '*' || c.is_whitespace())
        .trim_end()
}

fn starts_tag(line: &str) -> bool {
    line.strip_prefix('@')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
}
