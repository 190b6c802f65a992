//! Product extraction through a generative-language API.
//!
//! The model answers with loosely shaped JSON, so every field of
//! [`ProductDraft`] is optional and numbers may arrive as strings.

mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Message length sent for a single product.
pub const MAX_SINGLE_INPUT_CHARS: usize = 800;
/// Message length sent when several products are expected.
pub const MAX_MULTI_INPUT_CHARS: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl ProductDraft {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let digits: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().ok()
        }
        _ => None,
    })
}

/// Collapses all whitespace runs and caps the length in characters.
pub fn normalize_message(raw: &str, max_chars: usize) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

/// Drops Markdown code fences the model likes to wrap JSON in.
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_product_reply(reply: &str) -> Option<ProductDraft> {
    let cleaned = strip_code_fences(reply);
    match serde_json::from_str::<ProductDraft>(&cleaned) {
        Ok(draft) if !draft.is_empty() => Some(draft),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("⚠️ Could not parse product reply: {}", e);
            None
        }
    }
}

pub fn parse_products_reply(reply: &str) -> Vec<ProductDraft> {
    let cleaned = strip_code_fences(reply);
    let array = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned.as_str(),
    };

    match serde_json::from_str::<Vec<ProductDraft>>(array) {
        Ok(drafts) => drafts.into_iter().filter(|d| !d.is_empty()).collect(),
        Err(e) => {
            tracing::warn!("⚠️ Could not parse product list reply: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_reply_is_parsed() {
        let reply = "```json\n{\"name\": \"Red Shirt\", \"price\": 500, \"quantity\": \"50 pcs\", \"color\": \"red\", \"category\": null}\n```";
        let draft = parse_product_reply(reply).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Red Shirt"));
        assert_eq!(draft.price, Some(500.0));
        assert_eq!(draft.quantity, Some(50.0));
        assert_eq!(draft.category, None);
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let draft = parse_product_reply("{\"name\": \"Kettle\"}").unwrap();
        assert_eq!(draft.price, None);
        assert_eq!(draft.color, None);
    }

    #[test]
    fn test_garbage_reply_is_none() {
        assert!(parse_product_reply("Sorry, I cannot help with that").is_none());
        assert!(parse_product_reply("{}").is_none());
    }

    #[test]
    fn test_array_is_sliced_out_of_chatter() {
        let reply = "Here you go:\n[{\"name\": \"Pen\", \"price\": 10}, {\"name\": \"Book\", \"price\": \"120tk\"}]\nThanks";
        let drafts = parse_products_reply(reply);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].price, Some(120.0));
    }

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("lal shirt\n\t50 ta   500tk", 100), "lal shirt 50 ta 500tk");
        assert_eq!(normalize_message("abcdef", 3), "abc");
    }
}
