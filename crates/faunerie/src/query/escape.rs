//! Escaping between query values, `LIKE` patterns, and stored text.

/// Escapes a user value for a `LIKE '...' ESCAPE '\'` pattern.
///
/// Single quotes are doubled, literal `%` and `_` are backslash-escaped, and
/// the query language wildcard `*` becomes `%`. Backslashes never reach this
/// point: terms containing one are rejected before compilation.
pub fn escape_like_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '\'' => escaped.push_str("''"),
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            '*' => escaped.push('%'),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Reverses the escape sequences found in stored free-text columns.
pub fn unescape_stored_text(value: &str) -> String {
    value
        .replace("\\_", "_")
        .replace("\\%", "%")
        .replace("\\'", "'")
}
