//! Spreadsheet rows and the ZIP bundle handed to the storage backend.

use crate::domain::model::PricedOrder;
use crate::utils::error::{OptimizerError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Selling Price")]
    pub selling_price: String,
    #[serde(rename = "Product Cost")]
    pub product_cost: String,
    #[serde(rename = "Delivery Cost")]
    pub delivery_cost: String,
    #[serde(rename = "Ad Cost")]
    pub ad_cost: String,
    #[serde(rename = "Packaging")]
    pub packaging: String,
    #[serde(rename = "Total Cost")]
    pub total_cost: String,
    #[serde(rename = "Net Profit")]
    pub net_profit: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Two decimals at most, no trailing ".0" for whole taka.
fn money(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

impl From<&PricedOrder> for ExportRow {
    fn from(priced: &PricedOrder) -> Self {
        let order = &priced.order;
        Self {
            date: order.created_at.format("%d/%m/%Y").to_string(),
            customer: order.name.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            city: priced.zone.city.to_string(),
            selling_price: money(order.selling_price),
            product_cost: money(order.product_cost),
            delivery_cost: money(order.delivery_cost),
            ad_cost: money(priced.profit.ad_cost),
            packaging: money(priced.profit.packaging_fee),
            total_cost: money(priced.profit.total_cost),
            net_profit: money(priced.profit.net_profit),
            status: order.status.to_string(),
        }
    }
}

fn write_delimited(orders: &[PricedOrder], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    // 空資料也要輸出表頭
    writer.write_record([
        "Date",
        "Customer",
        "Phone",
        "Address",
        "City",
        "Selling Price",
        "Product Cost",
        "Delivery Cost",
        "Ad Cost",
        "Packaging",
        "Total Cost",
        "Net Profit",
        "Status",
    ])?;
    for priced in orders {
        writer.serialize(ExportRow::from(priced))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OptimizerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| OptimizerError::ProcessingError {
        message: format!("export produced invalid UTF-8: {}", e),
    })
}

pub fn to_csv(orders: &[PricedOrder]) -> Result<String> {
    write_delimited(orders, b',')
}

pub fn to_tsv(orders: &[PricedOrder]) -> Result<String> {
    write_delimited(orders, b'\t')
}

/// Packs named files into one in-memory ZIP archive, in the given order.
pub fn bundle_zip(entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, data) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Order, OrderStatus};
    use crate::parser::DeliveryZone;
    use crate::profit::{compute_profit, DEFAULT_PACKAGING_FEE};
    use chrono::{TimeZone, Utc};
    use std::io::Read;

    fn priced(name: &str, address: &str) -> PricedOrder {
        let order = Order {
            id: None,
            workspace_id: "shop-1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap(),
            name: name.to_string(),
            phone: "01712345678".to_string(),
            address: address.to_string(),
            original_text: String::new(),
            selling_price: 1200.0,
            product_cost: 600.0,
            delivery_cost: 60.0,
            ad_cost: 100.0,
            discount_price: 0.0,
            status: OrderStatus::Delivered,
        };
        let profit = compute_profit(&order.amounts(), DEFAULT_PACKAGING_FEE);
        PricedOrder {
            order,
            zone: DeliveryZone::DHAKA,
            profit,
        }
    }

    #[test]
    fn test_export_row_fields() {
        let row = ExportRow::from(&priced("Rahim", "Mirpur 10"));
        assert_eq!(row.date, "07/03/2024");
        assert_eq!(row.city, "Dhaka");
        assert_eq!(row.total_cost, "775");
        assert_eq!(row.net_profit, "425");
        assert_eq!(row.status, "Delivered");
    }

    #[test]
    fn test_csv_quotes_addresses_with_commas() {
        let csv = to_csv(&[priced("Rahim", "House 12, Road 5, Mirpur")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date,Customer,Phone,Address,City"));
        assert!(lines[1].contains("\"House 12, Road 5, Mirpur\""));
    }

    #[test]
    fn test_tsv_and_empty_export() {
        let tsv = to_tsv(&[priced("Rahim", "House 12, Road 5")]).unwrap();
        assert!(tsv.lines().nth(1).unwrap().contains("\tHouse 12, Road 5\t"));

        let empty = to_csv(&[]).unwrap();
        assert_eq!(empty.lines().count(), 1);
    }

    #[test]
    fn test_bundle_zip_roundtrip_names() {
        let data = bundle_zip(&[("orders.csv", &b"a,b"[..]), ("summary.json", &b"{}"[..])]).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("orders.csv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "a,b");
    }
}
