use super::rules::ParserRules;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const DHAKA_CHARGE: u32 = 60;
pub const OUTSIDE_DHAKA_CHARGE: u32 = 120;

// Dhaka postal codes run 1000-1399. Any ASCII digit run containing one counts.
static DHAKA_POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"1[0-3][0-9]{2}").expect("postal pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "Dhaka")]
    Dhaka,
    #[serde(rename = "Outside Dhaka")]
    OutsideDhaka,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Dhaka => "Dhaka",
            City::OutsideDhaka => "Outside Dhaka",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub city: City,
    pub charge: u32,
}

impl DeliveryZone {
    pub const DHAKA: DeliveryZone = DeliveryZone {
        city: City::Dhaka,
        charge: DHAKA_CHARGE,
    };

    pub const OUTSIDE_DHAKA: DeliveryZone = DeliveryZone {
        city: City::OutsideDhaka,
        charge: OUTSIDE_DHAKA_CHARGE,
    };
}

pub(crate) fn classify(address: &str, rules: &ParserRules) -> DeliveryZone {
    if rules.is_dhaka_area(address) || DHAKA_POSTAL_RE.is_match(address) {
        DeliveryZone::DHAKA
    } else {
        DeliveryZone::OUTSIDE_DHAKA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(address: &str) -> DeliveryZone {
        classify(address, &ParserRules::default())
    }

    #[test]
    fn test_postal_code_inside_range() {
        assert_eq!(zone("Farm View, 1207"), DeliveryZone::DHAKA);
        assert_eq!(zone("Road 3, Dhaka-1000"), DeliveryZone::DHAKA);
        assert_eq!(zone("Sector 9, 1399"), DeliveryZone::DHAKA);
    }

    #[test]
    fn test_postal_code_outside_range() {
        assert_eq!(zone("Cox's Bazar, 4700"), DeliveryZone::OUTSIDE_DHAKA);
        assert_eq!(zone("Chattogram 4000"), DeliveryZone::OUTSIDE_DHAKA);
        assert_eq!(zone("Holding 1400"), DeliveryZone::OUTSIDE_DHAKA);
        // Bangla digits never count as a postal code
        assert_eq!(zone("Holding ১২০৭"), DeliveryZone::OUTSIDE_DHAKA);
    }

    #[test]
    fn test_postal_code_inside_longer_number() {
        assert_eq!(zone("Plot 212070"), DeliveryZone::DHAKA);
        assert_eq!(zone("Holding 12070"), DeliveryZone::DHAKA);
    }

    #[test]
    fn test_area_keywords() {
        assert_eq!(zone("House 5, MIRPUR 10"), DeliveryZone::DHAKA);
        assert_eq!(zone("বনানী, রোড ১১"), DeliveryZone::DHAKA);
        assert_eq!(zone("Holding 36, block D, Narayanganj"), DeliveryZone::OUTSIDE_DHAKA);
        assert_eq!(zone(""), DeliveryZone::OUTSIDE_DHAKA);
    }

    #[test]
    fn test_zone_serializes_with_display_names() {
        let json = serde_json::to_value(DeliveryZone::OUTSIDE_DHAKA).unwrap();
        assert_eq!(json, serde_json::json!({"city": "Outside Dhaka", "charge": 120}));
    }
}
