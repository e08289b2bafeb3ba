use clap::Parser;
use dealmind::utils::logger;
use dealmind::DealMindClient;

#[derive(Parser)]
#[command(name = "summary-probe")]
#[command(about = "Query a running DealMind server for contract summaries")]
struct Args {
    #[arg(long, default_value = "http://localhost:5000")]
    base_url: String,

    #[arg(short, long)]
    brand: Option<String>,

    /// Needs --brand; without a model every model of the brand is fetched
    #[arg(short, long, requires = "brand")]
    model: Option<String>,

    /// Ask the assistant a question as well
    #[arg(long)]
    ask: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = match DealMindClient::new(&args.base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    };

    println!("🚀 Probing DealMind API at {}", client.base_url());
    if !client.health().await? {
        anyhow::bail!("health check failed at {}", client.base_url());
    }

    // 沒指定 brand/model 時掃過整份目錄
    let pairs: Vec<(String, String)> = match (&args.brand, &args.model) {
        (None, Some(_)) => anyhow::bail!("--model needs --brand"),
        (Some(brand), Some(model)) => vec![(brand.clone(), model.clone())],
        (brand, None) => {
            let listing = client.catalog().await?;
            listing
                .brands
                .into_iter()
                .filter(|entry| brand.as_ref().map_or(true, |b| b == &entry.brand))
                .flat_map(|entry| {
                    let brand = entry.brand;
                    entry
                        .models
                        .into_iter()
                        .map(move |model| (brand.clone(), model))
                })
                .collect()
        }
    };

    for (brand, model) in &pairs {
        let summary = client.summary(brand, model).await?;
        println!("📋 {} {}", summary.brand, summary.model);
        for point in &summary.points {
            println!("    - {}", point);
        }
    }

    if let Some(question) = &args.ask {
        let reply = client.chat(question).await?;
        println!("🤖 {}", reply.reply);
    }

    println!("✅ {} summaries fetched", pairs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_brand() {
        let err = Args::try_parse_from(["summary-probe", "--model", "iPhone 15"]).err();
        assert!(err.is_some());
    }

    #[test]
    fn test_brand_and_model_together() {
        let args =
            Args::try_parse_from(["summary-probe", "-b", "Apple", "-m", "iPhone 15"]).unwrap();
        assert_eq!(args.brand.as_deref(), Some("Apple"));
        assert_eq!(args.model.as_deref(), Some("iPhone 15"));
        assert_eq!(args.base_url, "http://localhost:5000");
    }
}
