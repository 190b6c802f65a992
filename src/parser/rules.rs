//! Keyword data driving the heuristics.
//!
//! The lists are locale-specific guesses, so they live here as data rather than
//! inside the matching code. `[parser]` in the TOML config can extend them.

use serde::{Deserialize, Serialize};

/// Neighbourhoods that put an address inside the Dhaka delivery zone.
pub const DHAKA_AREAS: &[&str] = &[
    "dhaka",
    "dhanmondi",
    "mirpur",
    "uttara",
    "banani",
    "bonani",
    "bunani",
    "gulshan",
    "bashundhara",
    "mohammadpur",
    "badda",
    "rampura",
    "farmgate",
    "motijheel",
    "lalmatia",
    "dilkusha",
    "mohakhali",
    "tejgaon",
    "baridhara",
    "aftabnagar",
    "nikunja",
    "shantinagar",
    "malibagh",
    "maghbazar",
    "moghbazar",
    "khilgaon",
    "jatrabari",
    "shyamoli",
    "kallyanpur",
    "agargaon",
    "paltan",
    "lalbagh",
    "azimpur",
    "khilkhet",
    "karwan bazar",
    "kawran bazar",
    "ঢাকা",
    "ধানমন্ডি",
    "মিরপুর",
    "উত্তরা",
    "বনানী",
    "গুলশান",
    "বসুন্ধরা",
    "মোহাম্মদপুর",
    "বাড্ডা",
    "রামপুরা",
    "মতিঝিল",
    "তেজগাঁও",
    "খিলগাঁও",
    "যাত্রাবাড়ী",
];

/// Words that mark a chunk as part of an address. Dhaka areas count too.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "road",
    "house",
    "holding",
    "flat",
    "floor",
    "sector",
    "block",
    "village",
    "thana",
    "upazila",
    "district",
    "zilla",
    "post office",
    "bazar",
    "market",
    "tower",
    "building",
    "colony",
    "avenue",
    "street",
    "mohalla",
    "chattogram",
    "chittagong",
    "sylhet",
    "khulna",
    "rajshahi",
    "barishal",
    "barisal",
    "rangpur",
    "mymensingh",
    "comilla",
    "cumilla",
    "gazipur",
    "narayanganj",
    "bogura",
    "bogra",
    "jessore",
    "jashore",
    "noakhali",
    "রোড",
    "বাসা",
    "বাড়ি",
    "গ্রাম",
    "থানা",
    "জেলা",
    "উপজেলা",
    "সেক্টর",
    "ব্লক",
    "বাজার",
    "চট্টগ্রাম",
    "সিলেট",
    "খুলনা",
    "রাজশাহী",
    "বরিশাল",
    "রংপুর",
    "ময়মনসিংহ",
];

/// Chatter around a name. Only ever matched against whole words.
pub const FILLER_WORDS: &[&str] = &[
    "send",
    "sent",
    "to",
    "plz",
    "pls",
    "please",
    "urgent",
    "urgently",
    "hi",
    "hello",
    "hey",
    "salam",
    "assalamualaikum",
    "dear",
    "sir",
    "madam",
    "vai",
    "bhai",
    "bhaiya",
    "apu",
    "order",
    "parcel",
    "thanks",
    "thank",
    "you",
    "the",
    "for",
    "my",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserRules {
    pub dhaka_areas: Vec<String>,
    pub address_keywords: Vec<String>,
    pub filler_words: Vec<String>,
}

/// Additions merged on top of the built-in lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverrides {
    #[serde(default)]
    pub extra_dhaka_areas: Vec<String>,
    #[serde(default)]
    pub extra_address_keywords: Vec<String>,
    #[serde(default)]
    pub extra_filler_words: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl Default for ParserRules {
    fn default() -> Self {
        Self {
            dhaka_areas: owned(DHAKA_AREAS),
            address_keywords: owned(ADDRESS_KEYWORDS),
            filler_words: owned(FILLER_WORDS),
        }
    }
}

impl ParserRules {
    pub fn with_overrides(overrides: &RuleOverrides) -> Self {
        let mut rules = Self::default();
        rules.extend(overrides);
        rules
    }

    pub fn extend(&mut self, overrides: &RuleOverrides) {
        merge_into(&mut self.dhaka_areas, &overrides.extra_dhaka_areas);
        merge_into(&mut self.address_keywords, &overrides.extra_address_keywords);
        merge_into(&mut self.filler_words, &overrides.extra_filler_words);
    }

    pub fn is_dhaka_area(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.dhaka_areas.iter().any(|area| lower.contains(area.as_str()))
    }

    /// True when the text mentions any address keyword or Dhaka area.
    pub fn has_address_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.address_keywords
            .iter()
            .chain(self.dhaka_areas.iter())
            .any(|kw| lower.contains(kw.as_str()))
    }

    pub fn is_filler(&self, word: &str) -> bool {
        let bare = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        !bare.is_empty() && self.filler_words.iter().any(|f| *f == bare)
    }

    /// Drops filler words, keeping the remaining words in order.
    pub fn strip_fillers(&self, chunk: &str) -> String {
        chunk
            .split_whitespace()
            .filter(|word| !self.is_filler(word))
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end_matches(['.', '!', '?', ':', '-'])
            .to_string()
    }
}

fn merge_into(target: &mut Vec<String>, extra: &[String]) {
    for word in extra {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !target.contains(&word) {
            target.push(word);
        }
    }
}
