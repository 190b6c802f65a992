use anyhow::Context;
use clap::Parser;
use profit_optimizer::parser::is_valid_mobile;
use profit_optimizer::profit::{compute_profit, parse_amount, DEFAULT_PACKAGING_FEE};
use profit_optimizer::utils::logger;
use profit_optimizer::{parse_order_text, classify_zone, OrderAmounts};
use std::io::Read;

#[derive(Parser)]
#[command(name = "parse-order")]
#[command(about = "Parse one pasted order and print the extracted fields as JSON")]
struct Args {
    /// Order text; read from stdin when omitted
    text: Option<String>,

    /// Selling price, enables the profit preview
    #[arg(long)]
    selling_price: Option<String>,

    #[arg(long, default_value = "0")]
    product_cost: String,

    /// Defaults to the delivery zone charge
    #[arg(long)]
    delivery_cost: Option<String>,

    #[arg(long, default_value = "0")]
    ad_cost: String,

    #[arg(long, default_value_t = DEFAULT_PACKAGING_FEE)]
    packaging_fee: f64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let text = match args.text.clone() {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read order text from stdin")?;
            buffer
        }
    };

    let contact = parse_order_text(&text);
    let zone = classify_zone(&contact.address);

    let profit = args.selling_price.as_deref().map(|selling| {
        let delivery_cost = args
            .delivery_cost
            .as_deref()
            .map(parse_amount)
            .unwrap_or_else(|| f64::from(zone.charge));
        let amounts = OrderAmounts {
            selling_price: parse_amount(selling),
            product_cost: parse_amount(&args.product_cost),
            delivery_cost,
            ad_cost: parse_amount(&args.ad_cost),
        };
        compute_profit(&amounts, args.packaging_fee)
    });

    let output = serde_json::json!({
        "contact": contact,
        "phone_valid": is_valid_mobile(&contact.phone),
        "zone": zone,
        "profit": profit,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
