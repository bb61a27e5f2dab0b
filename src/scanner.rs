//! Single-pass comment stripper.
//!
//! The scanner walks the input once, left to right, and copies everything
//! that is not part of a comment. String literals are copied verbatim so
//! comment markers inside them survive. There is no nesting: a position is
//! either code, inside one string, or inside one comment.
//!
//! Unterminated strings and comments simply run to the end of the input.

use crate::syntax::SyntaxConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Code,
    /// Inside a string opened (and to be closed) by this delimiter.
    InString(char),
    InLineComment,
    InBlockComment,
}

/// Remove comments from `input`, keeping code and string literals intact.
///
/// Blank lines are left in place; see [`crate::lines::compact`].
pub fn strip_comments(input: &str, syntax: &SyntaxConfig) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = ScanState::Code;
    let mut pos = 0;

    while let Some(ch) = input[pos..].chars().next() {
        let (next, consumed) = step(state, &input[pos..], ch, syntax, &mut out);
        state = next;
        pos += consumed;
    }

    out
}

/// Apply one transition at the start of `rest` (whose first char is `ch`).
///
/// Returns the next state and how many bytes of input were consumed.
fn step(
    state: ScanState,
    rest: &str,
    ch: char,
    syntax: &SyntaxConfig,
    out: &mut String,
) -> (ScanState, usize) {
    let width = ch.len_utf8();

    match state {
        ScanState::Code => {
            // Block start first: Lua's `--[[` also begins with `--`.
            if marker_at(rest, syntax.block_comment_start) {
                return (
                    ScanState::InBlockComment,
                    syntax.block_comment_start.len(),
                );
            }
            if marker_at(rest, syntax.single_line_comment) {
                trim_line_end(out);
                return (ScanState::InLineComment, syntax.single_line_comment.len());
            }
            if syntax.string_delimiters.contains(&ch) {
                out.push(ch);
                return (ScanState::InString(ch), width);
            }
            if syntax.long_brackets && (rest.starts_with("[[") || rest.starts_with("]]")) {
                out.push_str(&rest[..2]);
                return (ScanState::Code, 2);
            }
            out.push(ch);
            (ScanState::Code, width)
        }
        ScanState::InString(delim) => {
            // `\` is one byte, so `rest[1..]` is on a char boundary.
            if ch == '\\' && rest[1..].starts_with(delim) {
                out.push(ch);
                out.push(delim);
                return (ScanState::InString(delim), 1 + delim.len_utf8());
            }
            out.push(ch);
            if ch == delim {
                (ScanState::Code, width)
            } else {
                (ScanState::InString(delim), width)
            }
        }
        ScanState::InLineComment => {
            if ch == '\n' {
                out.push('\n');
                (ScanState::Code, 1)
            } else {
                (ScanState::InLineComment, width)
            }
        }
        ScanState::InBlockComment => {
            if marker_at(rest, syntax.block_comment_end) {
                (ScanState::Code, syntax.block_comment_end.len())
            } else {
                (ScanState::InBlockComment, width)
            }
        }
    }
}

/// An empty marker never matches.
fn marker_at(rest: &str, marker: &str) -> bool {
    !marker.is_empty() && rest.starts_with(marker)
}

/// Drop spaces and tabs left on the current output line before a line comment.
fn trim_line_end(out: &mut String) {
    let kept = out.trim_end_matches([' ', '\t']).len();
    out.truncate(kept);
}
