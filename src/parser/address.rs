use super::name::{find_label, single_line, MAX_NAME_LEN};
use super::rules::ParserRules;
use super::text::{has_digit, split_chunks, strip_leading_label, tidy, truncate_chars};

pub const MAX_ADDRESS_LEN: usize = 120;

/// Chunks longer than this are address-like even without a keyword.
const LONG_CHUNK_LEN: usize = 30;

/// `cleaned` is the input with phone numbers and asides already removed.
pub(crate) fn extract_from_cleaned(
    cleaned: &str,
    name: &str,
    phone: &str,
    rules: &ParserRules,
) -> String {
    if single_line(cleaned, rules).is_some() {
        return String::new();
    }

    let mut working = if phone.is_empty() {
        cleaned.to_string()
    } else {
        cleaned.replace(phone, "")
    };
    if let Some(label) = find_label(&working, rules) {
        working.replace_range(label.span, "");
    }

    let parts: Vec<&str> = split_chunks(&working)
        .map(|chunk| tidy(strip_leading_label(chunk)))
        .filter(|chunk| chunk.chars().any(char::is_alphanumeric))
        .filter(|chunk| !is_name_chunk(chunk, name, rules))
        .filter(|chunk| is_address_like(chunk, rules))
        .collect();

    let joined = parts.join(", ");
    truncate_chars(&joined, MAX_ADDRESS_LEN)
        .trim_end_matches([',', ' '])
        .to_string()
}

fn is_address_like(chunk: &str, rules: &ParserRules) -> bool {
    rules.has_address_keyword(chunk) || has_digit(chunk) || chunk.chars().count() > LONG_CHUNK_LEN
}

fn is_name_chunk(chunk: &str, name: &str, rules: &ParserRules) -> bool {
    if name.is_empty() {
        return false;
    }
    let name = name.to_lowercase();
    let stripped = truncate_chars(&rules.strip_fillers(chunk), MAX_NAME_LEN).to_lowercase();
    chunk.to_lowercase() == name || stripped == name
}
