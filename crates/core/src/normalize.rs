//! Normalization of form-style text input.
//!
//! Customers type quantities into free-text fields, often with full-width
//! digits (２０．５) or Japanese dash/period variants. Everything here is
//! total: malformed input degrades to the caller-supplied fallback and no
//! function ever panics or returns an error.

use rust_decimal::Decimal;

/// Folds full-width digits and punctuation variants into their ASCII
/// equivalents and trims surrounding whitespace.
///
/// Full-width digits U+FF10..=U+FF19 map by a fixed code-point offset;
/// `．`/`。` become `.` and `ー`/`−`/`―` become `-`.
pub fn to_half_width(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|ch| match ch {
            '０'..='９' => {
                char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch)
            }
            '．' | '。' => '.',
            'ー' | '−' | '―' => '-',
            other => other,
        })
        .collect();
    folded.trim().to_string()
}

/// Parses a decimal quantity from the leading numeric prefix of `text`,
/// after full-width folding. Trailing junk is ignored (`"3.5km"` parses
/// as `3.5`), matching how the estimate form has always treated input.
pub fn parse_number(text: &str, fallback: Decimal) -> Decimal {
    let folded = to_half_width(text);
    match numeric_prefix(&folded, true) {
        Some(prefix) => prefix.parse::<Decimal>().unwrap_or(fallback),
        None => fallback,
    }
}

/// Parses an integer from the leading digit prefix of `text`, after
/// full-width folding (`"３階"` parses as `3`).
pub fn parse_integer(text: &str, fallback: i64) -> i64 {
    let folded = to_half_width(text);
    match numeric_prefix(&folded, false) {
        Some(prefix) => prefix.parse::<i64>().unwrap_or(fallback),
        None => fallback,
    }
}

/// Extracts a leading `-?digits[.digits]` prefix, or `None` when the text
/// carries no digit at all. A bare leading `.` is expanded to `0.` so the
/// prefix always parses.
fn numeric_prefix(text: &str, allow_fraction: bool) -> Option<String> {
    let mut out = String::new();
    let mut chars = text.chars().peekable();
    let mut saw_digit = false;
    let mut saw_point = false;

    if matches!(chars.peek(), Some('-')) {
        out.push('-');
        chars.next();
    }

    while let Some(&ch) = chars.peek() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
            chars.next();
        } else if allow_fraction && ch == '.' && !saw_point {
            if out.is_empty() || out == "-" {
                out.push('0');
            }
            out.push('.');
            saw_point = true;
            chars.next();
        } else {
            break;
        }
    }

    if !saw_digit {
        return None;
    }
    if out.ends_with('.') {
        out.pop();
    }
    Some(out)
}
