//! Shell-style word splitting.
//!
//! Handles single quotes, double quotes, ANSI-C `$'...'` quoting, backslash
//! escapes and backslash-newline continuations, which covers what browsers
//! and API tools emit for "copy as cURL".

use std::{iter::Peekable, mem, str::Chars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between words
    Blank,
    /// Inside an unquoted run of a word
    Word,
    Single,
    Double,
    AnsiC,
}

/// Result of splitting command text into words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub words: Vec<String>,

    /// Opening quote of a word that never closed. That word is dropped.
    pub unterminated_quote: Option<char>,
}

/// Split `input` into shell words
pub fn tokenize(input: &str) -> Tokens {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Blank;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Blank | State::Word => match c {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(mem::take(&mut current));
                    }
                    State::Blank
                }
                '\'' => State::Single,
                '"' => State::Double,
                '$' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    State::AnsiC
                }
                '\\' => match chars.next() {
                    // line continuation
                    Some('\n') => state,
                    Some('\r') if chars.peek() == Some(&'\n') => {
                        chars.next();
                        state
                    }
                    Some(escaped) => {
                        current.push(escaped);
                        State::Word
                    }
                    None => state,
                },
                _ => {
                    current.push(c);
                    State::Word
                }
            },
            State::Single => {
                if c == '\'' {
                    State::Word
                } else {
                    current.push(c);
                    State::Single
                }
            }
            State::Double => match c {
                '"' => State::Word,
                '\\' => {
                    push_double_quoted_escape(&mut chars, &mut current);
                    State::Double
                }
                _ => {
                    current.push(c);
                    State::Double
                }
            },
            State::AnsiC => match c {
                '\'' => State::Word,
                '\\' => {
                    push_ansi_c_escape(&mut chars, &mut current);
                    State::AnsiC
                }
                _ => {
                    current.push(c);
                    State::AnsiC
                }
            },
        };
    }

    let unterminated_quote = match state {
        State::Word => {
            words.push(current);
            None
        }
        State::Blank => None,
        State::Single | State::AnsiC => Some('\''),
        State::Double => Some('"'),
    };

    Tokens { words, unterminated_quote }
}

/// Inside double quotes a backslash only escapes `"`, `\`, `$`, `` ` `` and
/// newline; otherwise it is literal.
fn push_double_quoted_escape(chars: &mut Peekable<Chars<'_>>, current: &mut String) {
    match chars.peek().copied() {
        Some(next @ ('"' | '\\' | '$' | '`')) => {
            chars.next();
            current.push(next);
        }
        Some('\n') => {
            chars.next();
        }
        _ => current.push('\\'),
    }
}

fn push_ansi_c_escape(chars: &mut Peekable<Chars<'_>>, current: &mut String) {
    match chars.next() {
        Some('n') => current.push('\n'),
        Some('t') => current.push('\t'),
        Some('r') => current.push('\r'),
        Some(next @ ('\\' | '\'' | '"')) => current.push(next),
        Some(other) => {
            current.push('\\');
            current.push(other);
        }
        None => current.push('\\'),
    }
}
