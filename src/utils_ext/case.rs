// String case conversions for element and page names
//
// The conversions are lossy: `to_camel_case(&to_dash_case(s))` does not
// give back `s` for multi-word input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[ _]+").unwrap();
}

/// `"Foo Bar_Baz"` -> `"foo-bar-baz"`
pub fn to_dash_case(s: &str) -> String {
    SEPARATOR_RUN.replace_all(&s.to_lowercase(), "-").into_owned()
}

/// `"foo-bar-baz"` -> `"fooBarBaz"`
///
/// A hyphen followed by a line terminator, or trailing, is kept.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(&next)) if !is_line_terminator(next) => {
                out.extend(next.to_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// `"foo-bar-baz"` -> `"Foo Bar Baz"`
pub fn from_dash_case(s: &str) -> String {
    let lower: Vec<char> = s.to_lowercase().chars().collect();
    let mut out = String::with_capacity(lower.len());
    let mut i = 0;

    if let Some(&first) = lower.first() {
        if is_word_char(first) {
            out.extend(first.to_uppercase());
            i = 1;
        }
    }

    while i < lower.len() {
        let c = lower[i];
        match lower.get(i + 1) {
            Some(&next) if c == '-' && is_word_char(next) => {
                out.push(' ');
                out.extend(next.to_uppercase());
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
