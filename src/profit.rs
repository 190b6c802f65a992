//! Per-order and dashboard profit arithmetic.
//!
//! Inputs are sanitized before any arithmetic so a NaN or a negative cost can
//! never leak into an aggregate.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Fixed per-order packaging cost.
pub const DEFAULT_PACKAGING_FEE: f64 = 15.0;

/// Sanity ceiling for any stored monetary value.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Average cost per result suggested before the user enters their own.
pub const DEFAULT_AVERAGE_CPR: f64 = 150.0;

static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern")
});

pub fn sanitize_amount(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value.min(MAX_AMOUNT)
}

/// Reads the leading number of free-form text ("1,200", "500tk", " 99.5 ").
pub fn parse_amount(raw: &str) -> f64 {
    let compact = raw.trim().replace(',', "");
    NUMBER_PREFIX_RE
        .find(&compact)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(sanitize_amount)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAmounts {
    pub selling_price: f64,
    pub product_cost: f64,
    pub delivery_cost: f64,
    pub ad_cost: f64,
}

impl OrderAmounts {
    pub fn sanitized(self) -> Self {
        Self {
            selling_price: sanitize_amount(self.selling_price),
            product_cost: sanitize_amount(self.product_cost),
            delivery_cost: sanitize_amount(self.delivery_cost),
            ad_cost: sanitize_amount(self.ad_cost),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AdCostMode {
    /// The ad cost stored with the order.
    #[default]
    Locked,
    /// One display-time CPR applied to every order in view.
    Dynamic { average_cpr: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitOptions {
    pub packaging_fee: f64,
    pub ad_cost_mode: AdCostMode,
}

impl Default for ProfitOptions {
    fn default() -> Self {
        Self {
            packaging_fee: DEFAULT_PACKAGING_FEE,
            ad_cost_mode: AdCostMode::Locked,
        }
    }
}

impl ProfitOptions {
    pub fn dynamic(average_cpr: f64) -> Self {
        Self {
            ad_cost_mode: AdCostMode::Dynamic { average_cpr },
            ..Self::default()
        }
    }

    fn effective_ad_cost(&self, stored: f64) -> f64 {
        match self.ad_cost_mode {
            AdCostMode::Locked => sanitize_amount(stored),
            AdCostMode::Dynamic { average_cpr } => sanitize_amount(average_cpr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    /// Ad cost actually charged, which differs from the stored one in dynamic mode.
    pub ad_cost: f64,
    pub packaging_fee: f64,
    pub total_cost: f64,
    pub net_profit: f64,
}

pub fn compute_profit(amounts: &OrderAmounts, packaging_fee: f64) -> ProfitBreakdown {
    compute_profit_with(
        amounts,
        &ProfitOptions {
            packaging_fee,
            ad_cost_mode: AdCostMode::Locked,
        },
    )
}

pub fn compute_profit_with(amounts: &OrderAmounts, options: &ProfitOptions) -> ProfitBreakdown {
    let amounts = amounts.sanitized();
    let ad_cost = options.effective_ad_cost(amounts.ad_cost);
    let packaging_fee = sanitize_amount(options.packaging_fee);

    let total_cost = amounts.product_cost + amounts.delivery_cost + ad_cost + packaging_fee;
    ProfitBreakdown {
        ad_cost,
        packaging_fee,
        total_cost,
        net_profit: amounts.selling_price - total_cost,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub order_count: usize,
    pub total_revenue: f64,
    pub total_product_cost: f64,
    pub total_delivery_cost: f64,
    pub total_ad_cost: f64,
    pub total_packaging_cost: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percent of revenue, one decimal place.
    pub profit_margin: f64,
}

pub fn summarize<'a, I>(orders: I, options: &ProfitOptions) -> DashboardSummary
where
    I: IntoIterator<Item = &'a OrderAmounts>,
{
    let mut summary = DashboardSummary::default();

    for amounts in orders {
        let clean = amounts.sanitized();
        let breakdown = compute_profit_with(&clean, options);

        summary.order_count += 1;
        summary.total_revenue += clean.selling_price;
        summary.total_product_cost += clean.product_cost;
        summary.total_delivery_cost += clean.delivery_cost;
        summary.total_ad_cost += breakdown.ad_cost;
        summary.total_packaging_cost += breakdown.packaging_fee;
    }

    summary.total_expenses = summary.total_product_cost
        + summary.total_delivery_cost
        + summary.total_ad_cost
        + summary.total_packaging_cost;
    summary.net_profit = summary.total_revenue - summary.total_expenses;
    summary.profit_margin = profit_margin(summary.net_profit, summary.total_revenue);
    summary
}

pub fn profit_margin(net_profit: f64, revenue: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    (net_profit / revenue * 1000.0).round() / 10.0
}
