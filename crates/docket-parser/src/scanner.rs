//! Single-pass lexical scanner over source lines.
//!
//! Classifies every character as code, line comment, block comment, string
//! literal or char literal, carrying the open-construct state from one line to
//! the next. Everything above this module works on its aggregate outputs only:
//! the code projection, the literal-masked skeleton and delimiter counts.

/// Lexical construct still open at the end of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexState {
    pub in_block_comment: bool,
    pub in_string: bool,
    pub in_char: bool,
}

/// One scanned line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedLine {
    /// The line with comments removed (each comment becomes one space).
    /// Literals are kept verbatim.
    pub code: String,
    /// Same bytes as `code`, but with literal contents replaced by spaces.
    /// Quote characters stay, so byte offsets line up with `code`.
    pub skeleton: String,
    pub open_braces: usize,
    pub close_braces: usize,
    pub open_parens: usize,
    pub close_parens: usize,
    /// State to carry into the next line.
    pub state: LexState,
}

impl ScannedLine {
    #[must_use]
    pub fn brace_delta(&self) -> i64 {
        count_delta(self.open_braces, self.close_braces)
    }

    #[must_use]
    pub fn paren_delta(&self) -> i64 {
        count_delta(self.open_parens, self.close_parens)
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn count_delta(open: usize, close: usize) -> i64 {
    open as i64 - close as i64
}

/// Scan one line starting from `state`.
#[must_use]
pub fn scan_line(line: &str, state: LexState) -> ScannedLine {
    let mut out = ScannedLine {
        state,
        ..ScannedLine::default()
    };
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if out.state.in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                out.state.in_block_comment = false;
                push_both(&mut out, ' ');
            }
            continue;
        }

        if out.state.in_string || out.state.in_char {
            let quote = if out.state.in_string { '"' } else { '\'' };
            if c == '\\' {
                out.code.push(c);
                mask(&mut out.skeleton, c);
                if let Some(escaped) = chars.next() {
                    out.code.push(escaped);
                    mask(&mut out.skeleton, escaped);
                }
            } else if c == quote {
                push_both(&mut out, c);
                out.state.in_string = false;
                out.state.in_char = false;
            } else {
                out.code.push(c);
                mask(&mut out.skeleton, c);
            }
            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                out.state.in_block_comment = true;
            }
            '"' => {
                out.state.in_string = true;
                push_both(&mut out, c);
            }
            '\'' => {
                out.state.in_char = true;
                push_both(&mut out, c);
            }
            '{' => {
                out.open_braces += 1;
                push_both(&mut out, c);
            }
            '}' => {
                out.close_braces += 1;
                push_both(&mut out, c);
            }
            '(' => {
                out.open_parens += 1;
                push_both(&mut out, c);
            }
            ')' => {
                out.close_parens += 1;
                push_both(&mut out, c);
            }
            _ => push_both(&mut out, c),
        }
    }

    out
}

fn push_both(out: &mut ScannedLine, c: char) {
    out.code.push(c);
    out.skeleton.push(c);
}

fn mask(skeleton: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        skeleton.push(' ');
    }
}

/// Stateful scanner over consecutive lines.
#[derive(Debug, Clone, Default)]
pub struct LineScanner {
    state: LexState,
}

impl LineScanner {
    pub fn scan(&mut self, line: &str) -> ScannedLine {
        let scanned = scan_line(line, self.state);
        self.state = scanned.state;
        scanned
    }

    #[must_use]
    pub const fn state(&self) -> LexState {
        self.state
    }
}

/// Literal-masked view of comment-free `text` with identical byte offsets.
///
/// Falls back to `text` itself when it contains comments, since the offsets
/// would no longer line up.
#[must_use]
pub fn literal_mask(text: &str) -> String {
    let scanned = scan_line(text, LexState::default());
    if scanned.code.len() == text.len() {
        scanned.skeleton
    } else {
        text.to_string()
    }
}
