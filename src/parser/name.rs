use super::rules::ParserRules;
use super::text::{has_digit, has_letter, split_chunks, strip_leading_label, tidy, truncate_chars};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub const MAX_NAME_LEN: usize = 30;

/// Lines this short with no comma or address keyword are a bare name.
pub(crate) const SINGLE_LINE_NAME_LEN: usize = 25;

static NAME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:customer\s+name|receiver\s+name|name|nam|customer|receiver|bhai)(?:\s*[:.\-]+\s*|\s+)(?:is\s+)?([\p{L}\p{M}][\p{L}\p{M} .']*)",
    )
    .expect("name label pattern")
});

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("word pattern"));

/// A "Name: X" hit: the cleaned name and the byte span covering label and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelMatch {
    pub name: String,
    pub span: Range<usize>,
}

/// Ways of guessing the customer name, tried in [`NAME_STRATEGIES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// "Name: Rafiq", "Customer - Kamal", "nam Karim".
    Label,
    /// First comma/newline chunk that cannot be a phone, address or filler.
    Elimination,
    /// The whole input is one short line.
    SingleLine,
}

pub const NAME_STRATEGIES: [NameStrategy; 3] = [
    NameStrategy::Label,
    NameStrategy::Elimination,
    NameStrategy::SingleLine,
];

impl NameStrategy {
    /// `text` must already have phone numbers and asides removed.
    pub fn extract(self, text: &str, rules: &ParserRules) -> Option<String> {
        match self {
            NameStrategy::Label => find_label(text, rules).map(|label| label.name),
            NameStrategy::Elimination => eliminate(text, rules),
            NameStrategy::SingleLine => {
                let line = single_line(text, rules)?;
                accept(&rules.strip_fillers(strip_leading_label(line)))
            }
        }
    }
}

pub(crate) fn find_label(text: &str, rules: &ParserRules) -> Option<LabelMatch> {
    let caps = NAME_LABEL_RE.captures(text)?;
    let whole = caps.get(0)?;
    let value = caps.get(1)?;

    // "Name: Rafiq Hossain House 5" keeps only the words before the address.
    let mut end = None;
    for word in WORD_RE.find_iter(value.as_str()) {
        if rules.has_address_keyword(word.as_str()) {
            break;
        }
        end = Some(word.end());
    }
    let end = end?;

    let name = tidy(&value.as_str()[..end]);
    if !has_letter(name) {
        return None;
    }

    Some(LabelMatch {
        name: truncate_chars(name, MAX_NAME_LEN),
        span: whole.start()..value.start() + end,
    })
}

fn eliminate(text: &str, rules: &ParserRules) -> Option<String> {
    for chunk in split_chunks(text) {
        let chunk = tidy(strip_leading_label(chunk));
        if chunk.chars().count() < 2 || has_digit(chunk) || rules.has_address_keyword(chunk) {
            continue;
        }
        if let Some(name) = accept(&rules.strip_fillers(chunk)) {
            return Some(name);
        }
    }
    None
}

/// The degenerate one-chunk input shared by name and address extraction.
pub(crate) fn single_line<'a>(text: &'a str, rules: &ParserRules) -> Option<&'a str> {
    let line = tidy(text);
    if line.is_empty()
        || line.contains([',', '\n', '\r'])
        || line.chars().count() >= SINGLE_LINE_NAME_LEN
        || rules.has_address_keyword(line)
    {
        return None;
    }
    Some(line)
}

fn accept(candidate: &str) -> Option<String> {
    let candidate = tidy(candidate);
    if candidate.is_empty() || !has_letter(candidate) {
        return None;
    }
    Some(truncate_chars(candidate, MAX_NAME_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ParserRules {
        ParserRules::default()
    }

    #[test]
    fn test_label_stops_at_comma() {
        let label = find_label("Name: Rafiq Hossain, House 5, Dhaka", &rules()).unwrap();
        assert_eq!(label.name, "Rafiq Hossain");
        assert_eq!(
            &"Name: Rafiq Hossain, House 5, Dhaka"[label.span],
            "Name: Rafiq Hossain"
        );
    }

    #[test]
    fn test_label_variants() {
        let r = rules();
        assert_eq!(
            NameStrategy::Label.extract("Customer: Kamal\n", &r).as_deref(),
            Some("Kamal")
        );
        assert_eq!(
            NameStrategy::Label.extract("customer name - Daraz Admin", &r).as_deref(),
            Some("Daraz Admin")
        );
        assert_eq!(
            NameStrategy::Label.extract("amar nam Karim", &r).as_deref(),
            Some("Karim")
        );
    }

    #[test]
    fn test_label_skips_leading_is() {
        let r = rules();
        let label = find_label("my name is Hasan", &r).unwrap();
        assert_eq!(label.name, "Hasan");
        assert_eq!(&"my name is Hasan"[label.span], "name is Hasan");
        assert_eq!(
            NameStrategy::Label.extract("Name: Isabel", &r).as_deref(),
            Some("Isabel")
        );
    }

    #[test]
    fn test_label_drops_trailing_address_words() {
        let r = rules();
        let label = find_label("Name: Rafiq Hossain House 5", &r).unwrap();
        assert_eq!(label.name, "Rafiq Hossain");
    }

    #[test]
    fn test_label_requires_word_boundary() {
        let r = rules();
        assert!(find_label("Username was Rahim", &r).is_none());
        assert!(find_label("Rahim bhai, Mirpur", &r).is_none());
    }

    #[test]
    fn test_elimination_skips_digits_and_keywords() {
        let r = rules();
        let text = "House 5, Road 7, Mirpur, Sharmin Akter";
        assert_eq!(
            NameStrategy::Elimination.extract(text, &r).as_deref(),
            Some("Sharmin Akter")
        );
    }

    #[test]
    fn test_elimination_keeps_names_containing_filler_substrings() {
        let r = rules();
        assert_eq!(
            NameStrategy::Elimination.extract("Hi Shino", &r).as_deref(),
            Some("Shino")
        );
        assert_eq!(
            NameStrategy::Elimination
                .extract("Please send to Hasan urgently", &r)
                .as_deref(),
            Some("Hasan")
        );
    }

    #[test]
    fn test_elimination_skips_filler_only_chunks() {
        let r = rules();
        assert_eq!(
            NameStrategy::Elimination
                .extract("please send\nTanvir Ahmed\nUttara", &r)
                .as_deref(),
            Some("Tanvir Ahmed")
        );
    }

    #[test]
    fn test_single_line_accepts_short_line_with_digits() {
        let r = rules();
        assert_eq!(
            NameStrategy::SingleLine.extract("Rahim 2", &r).as_deref(),
            Some("Rahim 2")
        );
        assert!(NameStrategy::SingleLine.extract("Mirpur 10", &r).is_none());
        assert!(NameStrategy::SingleLine
            .extract("a very long single line without any comma", &r)
            .is_none());
    }

    #[test]
    fn test_name_is_truncated() {
        let r = rules();
        let name = NameStrategy::Label
            .extract("Name: Abcdefghij Klmnopqrst Uvwxyzabcd Efgh", &r)
            .unwrap();
        assert!(name.chars().count() <= MAX_NAME_LEN);
        assert_eq!(name, "Abcdefghij Klmnopqrst Uvwxyzab");
    }
}
