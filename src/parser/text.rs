use regex::Regex;
use std::sync::LazyLock;

static ASIDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("aside pattern"));

static LEADING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:customer\s+name|receiver\s+name|delivery\s+address|name|nam|customer|receiver|address|addr|mobile|phone|cell|contact|number|location|ঠিকানা|নাম)\s*[:\-.]+\s*",
    )
    .expect("leading label pattern")
});

/// Removes "(who will receive the parcel)" style asides.
pub(crate) fn strip_asides(text: &str) -> String {
    ASIDE_RE.replace_all(text, " ").into_owned()
}

pub(crate) fn strip_leading_label(chunk: &str) -> &str {
    match LEADING_LABEL_RE.find(chunk) {
        Some(m) => &chunk[m.end()..],
        None => chunk,
    }
}

pub(crate) fn split_chunks(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', '\n', '\r'])
}

/// Trims whitespace and stray separators left behind by removals.
pub(crate) fn tidy(chunk: &str) -> &str {
    chunk.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ':' | '-' | ';' | '|'))
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    let cut: String = text.chars().take(max).collect();
    cut.trim_end().to_string()
}

pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(char::is_numeric)
}

pub(crate) fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}
