use anyhow::{bail, Context};
use clap::Parser;
use profit_optimizer::core::ProductExtractor;
use profit_optimizer::domain::inventory::{summarize_inventory, unit_cost, InventoryItem};
use profit_optimizer::utils::{logger, validation::Validate};
use profit_optimizer::{GeminiClient, GeminiConfig, TomlConfig};
use std::io::Read;

#[derive(Parser)]
#[command(name = "magic-fill")]
#[command(about = "Fill inventory fields from a supplier message using the Gemini API")]
struct Args {
    /// Supplier message; read from stdin when omitted
    text: Option<String>,

    /// TOML file whose [ai] section configures the client
    #[arg(short, long)]
    config: Option<String>,

    /// API key, falls back to GEMINI_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Extract every product in the message instead of one
    #[arg(long)]
    multi: bool,

    /// Shipping and other batch costs spread over the quantity
    #[arg(long, default_value_t = 0.0)]
    additional_cost: f64,

    #[arg(short, long)]
    verbose: bool,
}

/// Form-ready item plus whatever still blocks saving it.
fn describe(item: InventoryItem, additional_cost: f64) -> serde_json::Value {
    let item = item.sanitized();
    let issue = item.validate().err().map(|e| e.to_string());
    let landed = unit_cost(item.buying_price * item.quantity, additional_cost, item.quantity).ok();
    serde_json::json!({ "item": item, "unit_cost": landed, "issue": issue })
}

fn client_config(args: &Args) -> anyhow::Result<GeminiConfig> {
    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)?.ai_config()?.clone(),
        None => {
            let key = match &args.api_key {
                Some(key) => key.clone(),
                None => std::env::var("GEMINI_API_KEY")
                    .context("set GEMINI_API_KEY or pass --api-key")?,
            };
            GeminiConfig::new(key)
        }
    };
    if let Some(key) = &args.api_key {
        config.api_key = key.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let text = match args.text.clone() {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read message from stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("the supplier message is empty");
    }

    let client = GeminiClient::new(client_config(&args)?);

    let result = if args.multi {
        client.extract_products(&text).await.map(|drafts| {
            let items: Vec<InventoryItem> = drafts
                .iter()
                .map(|d| InventoryItem::from_draft(d).sanitized())
                .collect();
            let summary = summarize_inventory(&items);
            let described: Vec<serde_json::Value> = items
                .into_iter()
                .map(|item| describe(item, args.additional_cost))
                .collect();
            serde_json::json!({ "items": described, "summary": summary })
        })
    } else {
        client.extract_product(&text).await.map(|draft| match draft {
            Some(draft) => {
                tracing::debug!("Model returned: {:?}", draft);
                describe(InventoryItem::from_draft(&draft), args.additional_cost)
            }
            None => {
                tracing::warn!("⚠️ No product details found in the message");
                serde_json::json!({ "item": null })
            }
        })
    };

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Product extraction failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }
}
