//! Free-text order parsing: phone, name, address and delivery zone.
//!
//! Everything here is pure: no input makes these functions fail, ambiguous
//! text simply yields empty fields for a human to fill in.

mod address;
mod name;
mod phone;
pub mod rules;
mod text;
mod zone;

pub use address::MAX_ADDRESS_LEN;
pub use name::{NameStrategy, MAX_NAME_LEN, NAME_STRATEGIES};
pub use phone::{extract_phone, is_valid_mobile};
pub use rules::{ParserRules, RuleOverrides};
pub use zone::{City, DeliveryZone, DHAKA_CHARGE, OUTSIDE_DHAKA_CHARGE};

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DEFAULT_PARSER: LazyLock<TextParser> = LazyLock::new(TextParser::default);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContact {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Parser bound to a set of keyword lists.
#[derive(Debug, Clone, Default)]
pub struct TextParser {
    rules: ParserRules,
}

impl TextParser {
    pub fn new(rules: ParserRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ParserRules {
        &self.rules
    }

    pub fn parse(&self, text: &str) -> ParsedContact {
        let phone = extract_phone(text);
        let cleaned = clean(text);
        let name = self.name_from_cleaned(&cleaned);
        let address = address::extract_from_cleaned(&cleaned, &name, &phone, &self.rules);

        tracing::trace!(%name, %phone, %address, "parsed order text");
        ParsedContact {
            name,
            phone,
            address,
        }
    }

    pub fn extract_name(&self, text: &str) -> String {
        self.name_from_cleaned(&clean(text))
    }

    pub fn extract_address(&self, text: &str, name: &str, phone: &str) -> String {
        address::extract_from_cleaned(&clean(text), name, phone, &self.rules)
    }

    pub fn classify_zone(&self, address: &str) -> DeliveryZone {
        zone::classify(address, &self.rules)
    }

    fn name_from_cleaned(&self, cleaned: &str) -> String {
        NAME_STRATEGIES
            .iter()
            .find_map(|strategy| strategy.extract(cleaned, &self.rules))
            .unwrap_or_default()
    }
}

fn clean(text: &str) -> String {
    text::strip_asides(&phone::remove_phones(text))
}

pub fn extract_name(text: &str) -> String {
    DEFAULT_PARSER.extract_name(text)
}

pub fn extract_address(text: &str, name: &str, phone: &str) -> String {
    DEFAULT_PARSER.extract_address(text, name, phone)
}

pub fn parse_order_text(text: &str) -> ParsedContact {
    DEFAULT_PARSER.parse(text)
}

pub fn classify_zone(address: &str) -> DeliveryZone {
    DEFAULT_PARSER.classify_zone(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ORDERS: [&str; 4] = [
        "Sharmin shaba\nHolding 36, block D Adarsha Chashara chanmari, Narayanganj\n01749336026\n( who will receive the parcel only)",
        "House # 76, Road #11, Block E, Banani, Dhaka 1213.\nName: Daraz Admin\n01711000000",
        "546, Jahangir Gate, Bir Shrestha Shaheed Jahangir Gate, Dhaka 1206.\nCustomer: Kamal\n01999888777",
        "97, Buddhist Temple Road, Nandonkanon, Chattogram 4000.\nName: Zentexx Design\n01812345678",
    ];

    #[test]
    fn test_label_name_takes_priority() {
        assert_eq!(extract_name("Name: Rafiq Hossain, House 5, Dhaka"), "Rafiq Hossain");
    }

    #[test]
    fn test_filler_words_do_not_eat_names() {
        assert_eq!(extract_name("Please send to Hasan urgently"), "Hasan");
        assert_eq!(extract_name("hi\nShino Akter\n01712345678"), "Shino Akter");
    }

    #[test]
    fn test_end_to_end_outside_dhaka() {
        let contact = parse_order_text("Sharmin shaba, Holding 36, block D, Narayanganj, 01749336026");
        assert_eq!(contact.phone, "01749336026");
        assert_eq!(contact.name, "Sharmin shaba");
        assert!(contact.address.contains("Holding 36"));
        assert!(contact.address.contains("Narayanganj"));
        assert_eq!(classify_zone(&contact.address), DeliveryZone::OUTSIDE_DHAKA);
    }

    #[test]
    fn test_postal_code_in_longer_number_is_dhaka() {
        let contact = parse_order_text("Rina, Holding 12070, 01712345678");
        assert!(contact.address.contains("12070"));
        assert_eq!(classify_zone(&contact.address), DeliveryZone::DHAKA);
    }

    #[test]
    fn test_house_number_before_phone_is_kept() {
        let contact = parse_order_text("House 88 01712345678");
        assert_eq!(contact.phone, "01712345678");
        assert!(contact.address.contains("88"), "address: {}", contact.address);
    }

    #[test]
    fn test_sample_orders() {
        let first = parse_order_text(SAMPLE_ORDERS[0]);
        assert_eq!(first.name, "Sharmin shaba");
        assert_eq!(first.phone, "01749336026");
        assert_eq!(
            first.address,
            "Holding 36, block D Adarsha Chashara chanmari, Narayanganj"
        );

        let second = parse_order_text(SAMPLE_ORDERS[1]);
        assert_eq!(second.name, "Daraz Admin");
        assert_eq!(second.phone, "01711000000");
        assert_eq!(classify_zone(&second.address), DeliveryZone::DHAKA);

        let third = parse_order_text(SAMPLE_ORDERS[2]);
        assert_eq!(third.name, "Kamal");
        assert_eq!(third.phone, "01999888777");
        // "Jahangir Gate" alone is too short and keyword-free to count
        assert_eq!(third.address, "546, Bir Shrestha Shaheed Jahangir Gate, Dhaka 1206");
        assert_eq!(classify_zone(&third.address), DeliveryZone::DHAKA);

        let fourth = parse_order_text(SAMPLE_ORDERS[3]);
        assert_eq!(fourth.name, "Zentexx Design");
        assert_eq!(fourth.phone, "01812345678");
        assert_eq!(classify_zone(&fourth.address), DeliveryZone::OUTSIDE_DHAKA);
    }

    #[test]
    fn test_parse_is_idempotent() {
        for text in SAMPLE_ORDERS {
            assert_eq!(parse_order_text(text), parse_order_text(text));
        }
    }

    #[test]
    fn test_name_and_address_are_disjoint() {
        for text in SAMPLE_ORDERS {
            let contact = parse_order_text(text);
            assert!(!contact.name.is_empty());
            assert!(!contact.address.contains(&contact.name), "{:?}", contact);
            assert!(!contact.address.contains(&contact.phone));
        }
    }

    #[test]
    fn test_phone_only_message() {
        let contact = parse_order_text("01712345678");
        assert_eq!(
            contact,
            ParsedContact {
                name: String::new(),
                phone: "01712345678".to_string(),
                address: String::new(),
            }
        );
    }

    #[test]
    fn test_single_short_line_is_a_name() {
        let contact = parse_order_text("Rahim Uddin 01712345678");
        assert_eq!(contact.name, "Rahim Uddin");
        assert_eq!(contact.address, "");
    }

    #[test]
    fn test_configured_rules_change_zone() {
        let mut rules = ParserRules::default();
        rules.extend(&RuleOverrides {
            extra_dhaka_areas: vec!["savar".to_string()],
            ..Default::default()
        });
        let parser = TextParser::new(rules);
        assert_eq!(parser.classify_zone("Savar Cantonment"), DeliveryZone::DHAKA);
        assert_eq!(classify_zone("Savar Cantonment"), DeliveryZone::OUTSIDE_DHAKA);
    }
}
