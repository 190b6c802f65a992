use regex::Regex;
use std::sync::LazyLock;

// Separators (spaces, hyphens) may sit anywhere inside the digit run. A bare
// "88" prefix must touch the number, otherwise it is some other figure.
static LOOSE_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+88[ \-]*|88)?0[ \-]*1[ \-]*[3-9](?:[ \-]*[0-9]){8}").expect("phone pattern")
});

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[3-9][0-9]{8}$").expect("mobile pattern"));

/// Returns the first Bangladeshi mobile number in local 11-digit form, or an
/// empty string.
pub fn extract_phone(text: &str) -> String {
    LOOSE_PHONE_RE
        .find(text)
        .map(|m| normalize(m.as_str()))
        .unwrap_or_default()
}

pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_RE.is_match(phone)
}

/// Deletes every phone-looking run from the text.
pub(crate) fn remove_phones(text: &str) -> String {
    LOOSE_PHONE_RE.replace_all(text, "").into_owned()
}

fn normalize(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    // The pattern guarantees the last eleven digits are the local number.
    digits[digits.len() - 11..].iter().collect()
}
