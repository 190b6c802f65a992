use crate::core::{ConfigProvider, Pipeline, Storage, TransformResult};
use crate::domain::model::{OrderDraft, OrderInput, OrderStatus, PricedOrder, SkippedRow};
use crate::export::{bundle_zip, to_csv, to_tsv};
use crate::parser::TextParser;
use crate::profit::{parse_amount, summarize, OrderAmounts, ProfitOptions};
use crate::utils::error::{OptimizerError, Result};
use chrono::{DateTime, Utc};

pub const REPORT_FILENAME: &str = "order_report.zip";

/// Reads pasted orders from a CSV file, parses and prices them, and bundles
/// the report into a ZIP archive.
pub struct OrderImportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    parser: TextParser,
}

impl<S: Storage, C: ConfigProvider> OrderImportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let parser = TextParser::new(config.parser_rules());
        Self {
            storage,
            config,
            parser,
        }
    }

    fn price_row(
        &self,
        input: OrderInput,
        options: &ProfitOptions,
        created_at: DateTime<Utc>,
    ) -> Result<PricedOrder> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(OptimizerError::ValidationError {
                message: "order text is empty".to_string(),
            });
        }

        let contact = self.parser.parse(text);
        let zone = self.parser.classify_zone(&contact.address);
        tracing::debug!(
            "Parsed contact name={:?} phone={:?} zone={}",
            contact.name,
            contact.phone,
            zone.city
        );

        // 沒填運費時跟表單一樣自動帶入區域運費
        let delivery_cost = match non_empty(input.delivery_cost.as_deref()) {
            Some(raw) => parse_amount(raw),
            None => f64::from(zone.charge),
        };
        let status = match non_empty(input.status.as_deref()) {
            Some(raw) => raw.parse::<OrderStatus>()?,
            None => OrderStatus::default(),
        };

        let draft = OrderDraft {
            contact,
            original_text: text.to_string(),
            amounts: OrderAmounts {
                selling_price: parse_amount(&input.selling_price),
                product_cost: parse_amount(&input.product_cost),
                delivery_cost,
                ad_cost: parse_amount(&input.ad_cost),
            },
            discount_price: parse_amount(&input.discount_price),
            status,
        };

        let order = draft.into_order(self.config.workspace_id(), created_at)?;
        let profit = order.profit(options);
        Ok(PricedOrder {
            order,
            zone,
            profit,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for OrderImportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<OrderInput>> {
        let path = self.config.input_path();
        tracing::debug!("Reading order rows from: {}", path);
        let data = self.storage.read_file(path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        for record in reader.deserialize::<OrderInput>() {
            rows.push(record?);
        }
        Ok(rows)
    }

    async fn transform(&self, data: Vec<OrderInput>) -> Result<TransformResult> {
        let options = self.config.profit_options();
        let created_at = Utc::now();
        let mut orders = Vec::new();
        let mut skipped = Vec::new();

        for (index, input) in data.into_iter().enumerate() {
            let row = index + 1;
            match self.price_row(input, &options, created_at) {
                Ok(priced) => orders.push(priced),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping row {}: {}", row, e);
                    skipped.push(SkippedRow {
                        row,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let amounts: Vec<OrderAmounts> = orders.iter().map(|p| p.order.amounts()).collect();
        let summary = summarize(&amounts, &options);

        Ok(TransformResult {
            csv_output: to_csv(&orders)?,
            tsv_output: to_tsv(&orders)?,
            orders,
            summary,
            skipped,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), REPORT_FILENAME);

        let mut files: Vec<(&str, Vec<u8>)> = Vec::new();
        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => files.push(("orders.csv", result.csv_output.clone().into_bytes())),
                "tsv" => files.push(("orders.tsv", result.tsv_output.clone().into_bytes())),
                "json" => files.push(("orders.json", serde_json::to_vec_pretty(&result.orders)?)),
                other => tracing::warn!("⚠️ Ignoring unsupported output format: {}", other),
            }
        }
        files.push(("summary.json", serde_json::to_vec_pretty(&result.summary)?));
        if !result.skipped.is_empty() {
            files.push(("skipped.json", serde_json::to_vec_pretty(&result.skipped)?));
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());
        let entries: Vec<(&str, &[u8])> = files
            .iter()
            .map(|(name, data)| (*name, data.as_slice()))
            .collect();
        let zip_data = bundle_zip(&entries)?;

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&output_path, &zip_data).await?;

        Ok(output_path)
    }
}
