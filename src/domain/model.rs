use crate::parser::{DeliveryZone, ParsedContact};
use crate::profit::{
    compute_profit_with, sanitize_amount, DashboardSummary, OrderAmounts, ProfitBreakdown,
    ProfitOptions,
};
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery lifecycle. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "delivered" => Ok(OrderStatus::Delivered),
            "returned" => Ok(OrderStatus::Returned),
            other => Err(OptimizerError::ValidationError {
                message: format!("unknown order status '{}'", other),
            }),
        }
    }
}

/// A saved order as the document store holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned by the store; `None` until persisted.
    pub id: Option<String>,
    pub workspace_id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub original_text: String,
    pub selling_price: f64,
    pub product_cost: f64,
    pub delivery_cost: f64,
    pub ad_cost: f64,
    pub discount_price: f64,
    pub status: OrderStatus,
}

impl Order {
    pub fn amounts(&self) -> OrderAmounts {
        OrderAmounts {
            selling_price: self.selling_price,
            product_cost: self.product_cost,
            delivery_cost: self.delivery_cost,
            ad_cost: self.ad_cost,
        }
    }

    pub fn profit(&self, options: &ProfitOptions) -> ProfitBreakdown {
        compute_profit_with(&self.amounts(), options)
    }
}

/// Form state between parsing and saving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub contact: ParsedContact,
    pub original_text: String,
    pub amounts: OrderAmounts,
    pub discount_price: f64,
    pub status: OrderStatus,
}

impl Validate for OrderDraft {
    fn validate(&self) -> Result<()> {
        let selling = self.amounts.selling_price;
        if !selling.is_finite() || selling <= 0.0 {
            return Err(OptimizerError::ValidationError {
                message: "a selling price greater than 0 is required".to_string(),
            });
        }
        Ok(())
    }
}

impl OrderDraft {
    /// Validates, then caps every amount before it is stored.
    pub fn into_order(self, workspace_id: &str, created_at: DateTime<Utc>) -> Result<Order> {
        self.validate()?;
        let amounts = self.amounts.sanitized();

        Ok(Order {
            id: None,
            workspace_id: workspace_id.to_string(),
            created_at,
            name: self.contact.name,
            phone: self.contact.phone,
            address: self.contact.address,
            original_text: self.original_text,
            selling_price: amounts.selling_price,
            product_cost: amounts.product_cost,
            delivery_cost: amounts.delivery_cost,
            ad_cost: amounts.ad_cost,
            discount_price: sanitize_amount(self.discount_price),
            status: self.status,
        })
    }
}

/// One row of the order import CSV. Amounts stay text until parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderInput {
    pub text: String,
    #[serde(default)]
    pub selling_price: String,
    #[serde(default)]
    pub product_cost: String,
    /// Empty means "use the delivery zone charge".
    #[serde(default)]
    pub delivery_cost: Option<String>,
    #[serde(default)]
    pub ad_cost: String,
    #[serde(default)]
    pub discount_price: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub order: Order,
    pub zone: DeliveryZone,
    pub profit: ProfitBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub orders: Vec<PricedOrder>,
    pub summary: DashboardSummary,
    pub skipped: Vec<SkippedRow>,
    pub csv_output: String,
    pub tsv_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(selling: f64) -> OrderDraft {
        OrderDraft {
            contact: ParsedContact {
                name: "Kamal".to_string(),
                phone: "01999888777".to_string(),
                address: "Dhaka 1206".to_string(),
            },
            original_text: "Customer: Kamal".to_string(),
            amounts: OrderAmounts {
                selling_price: selling,
                product_cost: 400.0,
                delivery_cost: 60.0,
                ad_cost: 2_000_000.0,
            },
            discount_price: -5.0,
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_selling_price_is_required() {
        assert!(draft(0.0).validate().is_err());
        assert!(draft(f64::NAN).validate().is_err());
        assert!(draft(850.0).validate().is_ok());
    }

    #[test]
    fn test_into_order_caps_amounts() {
        let order = draft(850.0).into_order("shop-1", Utc::now()).unwrap();
        assert_eq!(order.workspace_id, "shop-1");
        assert_eq!(order.ad_cost, 1_000_000.0);
        assert_eq!(order.discount_price, 0.0);
        assert!(order.id.is_none());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!(" Returned ".parse::<OrderStatus>().unwrap(), OrderStatus::Returned);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
