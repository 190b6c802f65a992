use crate::ai::ProductDraft;
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inventory values get a looser ceiling than order amounts.
pub const MAX_INVENTORY_NUMBER: f64 = 10_000_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Clothing,
    Electronics,
    Home,
    Beauty,
    Grocery,
    Accessories,
    Kids,
    Sports,
    Stationery,
    Health,
    Footwear,
    Bags,
    Kitchen,
    Tools,
    Mobile,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Clothing,
        Category::Electronics,
        Category::Home,
        Category::Beauty,
        Category::Grocery,
        Category::Accessories,
        Category::Kids,
        Category::Sports,
        Category::Stationery,
        Category::Health,
        Category::Footwear,
        Category::Bags,
        Category::Kitchen,
        Category::Tools,
        Category::Mobile,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Electronics => "Electronics",
            Category::Home => "Home",
            Category::Beauty => "Beauty",
            Category::Grocery => "Grocery",
            Category::Accessories => "Accessories",
            Category::Kids => "Kids",
            Category::Sports => "Sports",
            Category::Stationery => "Stationery",
            Category::Health => "Health",
            Category::Footwear => "Footwear",
            Category::Bags => "Bags",
            Category::Kitchen => "Kitchen",
            Category::Tools => "Tools",
            Category::Mobile => "Mobile",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup; anything unknown is `Other`.
    pub fn normalize(raw: &str) -> Category {
        let raw = raw.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn sanitize_inventory_number(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value.min(MAX_INVENTORY_NUMBER)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    pub buying_price: f64,
    pub quantity: f64,
    pub category: Category,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub supplier_phone: String,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub discount_price: f64,
}

impl InventoryItem {
    /// Copies whatever the extraction service found; absent fields keep the
    /// current form value.
    pub fn merge_draft(&mut self, draft: &ProductDraft) {
        if let Some(name) = draft.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(price) = draft.price {
            self.buying_price = sanitize_inventory_number(price);
        }
        if let Some(quantity) = draft.quantity {
            self.quantity = sanitize_inventory_number(quantity);
        }
        if let Some(category) = draft.category.as_deref() {
            self.category = Category::normalize(category);
        }
    }

    pub fn from_draft(draft: &ProductDraft) -> Self {
        let mut item = InventoryItem::default();
        item.merge_draft(draft);
        item
    }

    /// Clamps numbers and trims text fields before the item is stored.
    pub fn sanitized(mut self) -> Self {
        self.buying_price = sanitize_inventory_number(self.buying_price);
        self.quantity = sanitize_inventory_number(self.quantity);
        self.selling_price = sanitize_inventory_number(self.selling_price);
        self.discount_price = sanitize_inventory_number(self.discount_price);
        for field in [
            &mut self.name,
            &mut self.subcategory,
            &mut self.sku,
            &mut self.batch_number,
            &mut self.unit,
            &mut self.expiry_date,
            &mut self.supplier,
            &mut self.supplier_phone,
        ] {
            *field = field.trim().to_string();
        }
        self
    }

    pub fn stock_value(&self) -> f64 {
        sanitize_inventory_number(self.buying_price) * sanitize_inventory_number(self.quantity)
    }
}

impl Validate for InventoryItem {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        if sanitize_inventory_number(self.buying_price) <= 0.0 {
            return Err(OptimizerError::ValidationError {
                message: "buying price must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: f64,
    pub total_value: f64,
}

pub fn summarize_inventory<'a, I>(items: I) -> InventorySummary
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items
        .into_iter()
        .fold(InventorySummary::default(), |mut acc, item| {
            acc.total_items += sanitize_inventory_number(item.quantity);
            acc.total_value += item.stock_value();
            acc
        })
}

/// `(wholesale + additional) / quantity` for one unit of a purchased batch.
pub fn unit_cost(wholesale_price: f64, additional_costs: f64, quantity: f64) -> Result<f64> {
    let quantity = sanitize_inventory_number(quantity);
    if quantity <= 0.0 {
        return Err(OptimizerError::ValidationError {
            message: "quantity must be greater than 0".to_string(),
        });
    }
    let total = sanitize_inventory_number(wholesale_price) + sanitize_inventory_number(additional_costs);
    Ok(total / quantity)
}
