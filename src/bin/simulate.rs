use clap::{Parser, ValueEnum};
use dealmind::core::projection::project;
use dealmind::domain::model::{Brand, RiskLevel, SimulationInput, SimulationResult};
use dealmind::utils::format::{format_inr, format_optional};
use dealmind::utils::logger;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "dealmind-simulate")]
#[command(about = "What-if margin simulator for brand partnerships")]
struct Args {
    /// Brand preset (apple, samsung, oppo, vivo, xiaomi)
    #[arg(short, long, default_value = "apple")]
    brand: Brand,

    /// Run every brand preset instead of a single one
    #[arg(long, conflicts_with = "brand")]
    all_brands: bool,

    #[arg(long)]
    current_margin: Option<f64>,

    #[arg(long)]
    margin_drop: Option<f64>,

    #[arg(long)]
    units_sold: Option<f64>,

    #[arg(long)]
    avg_selling_price: Option<f64>,

    #[arg(long)]
    operational_cost: Option<f64>,

    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

/// Flat CSV row: input and result side by side.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationRow {
    brand: Brand,
    current_margin: f64,
    margin_drop: f64,
    units_sold: f64,
    avg_selling_price: f64,
    operational_cost: f64,
    current_revenue: f64,
    current_profit: f64,
    new_profit: f64,
    profit_loss: f64,
    percentage_loss: Option<f64>,
    new_margin: f64,
    break_even_units: Option<f64>,
    additional_units_needed: Option<f64>,
    operational_efficiency: f64,
    risk_level: RiskLevel,
}

impl SimulationRow {
    fn new(input: &SimulationInput, result: &SimulationResult) -> Self {
        Self {
            brand: input.brand,
            current_margin: input.current_margin,
            margin_drop: input.margin_drop,
            units_sold: input.units_sold,
            avg_selling_price: input.avg_selling_price,
            operational_cost: input.operational_cost,
            current_revenue: result.current_revenue,
            current_profit: result.current_profit,
            new_profit: result.new_profit,
            profit_loss: result.profit_loss,
            percentage_loss: result.percentage_loss,
            new_margin: result.new_margin,
            break_even_units: result.break_even_units,
            additional_units_needed: result.additional_units_needed,
            operational_efficiency: result.operational_efficiency,
            risk_level: result.risk_level,
        }
    }
}

fn build_input(brand: Brand, args: &Args) -> SimulationInput {
    let mut input = SimulationInput::for_brand(brand);
    if let Some(v) = args.current_margin {
        input.current_margin = v;
    }
    if let Some(v) = args.margin_drop {
        input.margin_drop = v;
    }
    if let Some(v) = args.units_sold {
        input.units_sold = v.trunc();
    }
    if let Some(v) = args.avg_selling_price {
        input.avg_selling_price = v.trunc();
    }
    if let Some(v) = args.operational_cost {
        input.operational_cost = v.trunc();
    }
    input
}

fn render_table(rows: &[SimulationRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let risk_icon = match row.risk_level {
            RiskLevel::High => "🔴",
            RiskLevel::Medium => "🟠",
            RiskLevel::Low => "🟢",
        };
        out.push_str(&format!("📱 {}\n", row.brand.display_name()));
        out.push_str(&format!(
            "  Margin:            {}% -> {}% (drop {}%)\n",
            row.current_margin, row.new_margin, row.margin_drop
        ));
        out.push_str(&format!("  Units sold:        {}\n", row.units_sold));
        out.push_str(&format!("  Avg selling price: {}\n", format_inr(row.avg_selling_price)));
        out.push_str(&format!("  Operational cost:  {}\n", format_inr(row.operational_cost)));
        out.push_str(&format!("  Current revenue:   {}\n", format_inr(row.current_revenue)));
        out.push_str(&format!("  Current profit:    {}\n", format_inr(row.current_profit)));
        out.push_str(&format!("  New profit:        {}\n", format_inr(row.new_profit)));
        out.push_str(&format!(
            "  Profit loss:       {} ({}% decrease)\n",
            format_inr(row.profit_loss),
            format_optional(row.percentage_loss, 1)
        ));
        out.push_str(&format!(
            "  Break-even units:  {} (additional {})\n",
            format_optional(row.break_even_units, 0),
            format_optional(row.additional_units_needed, 0)
        ));
        out.push_str(&format!(
            "  Op. efficiency:    {}%\n",
            row.operational_efficiency
        ));
        out.push_str(&format!("  Risk level:        {} {}\n\n", risk_icon, row.risk_level));
    }
    out
}

fn render_csv(rows: &[SimulationRow]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let brands: Vec<Brand> = if args.all_brands {
        Brand::ALL.to_vec()
    } else {
        vec![args.brand]
    };

    let rows = brands
        .into_iter()
        .map(|brand| {
            let input = build_input(brand, &args);
            let result = project(&input)?;
            tracing::debug!("Simulated {}: {:?}", brand, result);
            Ok::<_, anyhow::Error>(SimulationRow::new(&input, &result))
        })
        .collect::<anyhow::Result<Vec<SimulationRow>>>()?;

    let rendered = match args.format {
        OutputFormat::Table => render_table(&rows),
        OutputFormat::Json => serde_json::to_string_pretty(&rows)? + "\n",
        OutputFormat::Csv => render_csv(&rows)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("📁 Simulation saved to: {}", path.display());
        }
        None => {
            std::io::stdout().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("dealmind-simulate").chain(extra.iter().copied()))
    }

    fn row_for(input: SimulationInput) -> SimulationRow {
        SimulationRow::new(&input, &project(&input).unwrap())
    }

    #[test]
    fn test_build_input_uses_preset_without_overrides() {
        let input = build_input(Brand::Samsung, &args(&[]));
        assert_eq!(input, SimulationInput::for_brand(Brand::Samsung));
    }

    #[test]
    fn test_build_input_truncates_integer_overrides() {
        let input = build_input(
            Brand::Apple,
            &args(&[
                "--current-margin",
                "12.5",
                "--margin-drop",
                "1.5",
                "--units-sold",
                "1234.9",
                "--avg-selling-price=-99.7",
                "--operational-cost",
                "5000.5",
            ]),
        );

        // 毛利類欄位保留小數
        assert_eq!(input.current_margin, 12.5);
        assert_eq!(input.margin_drop, 1.5);
        assert_eq!(input.units_sold, 1234.0);
        assert_eq!(input.avg_selling_price, -99.0);
        assert_eq!(input.operational_cost, 5000.0);
    }

    #[test]
    fn test_render_csv_has_header_and_one_row_per_brand() {
        let rows = vec![
            row_for(SimulationInput::for_brand(Brand::Apple)),
            row_for(SimulationInput::for_brand(Brand::Vivo)),
        ];
        let csv = render_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "brand,currentMargin,marginDrop,unitsSold,avgSellingPrice,operationalCost,\
             currentRevenue,currentProfit,newProfit,profitLoss,percentageLoss,newMargin,\
             breakEvenUnits,additionalUnitsNeeded,operationalEfficiency,riskLevel"
        );
        assert!(lines[1].starts_with("apple,"));
        assert!(lines[1].ends_with(",medium"));
        assert!(lines[2].starts_with("vivo,"));
    }

    #[test]
    fn test_render_csv_leaves_missing_metrics_empty() {
        let mut input = SimulationInput::for_brand(Brand::Oppo);
        input.margin_drop = input.current_margin;
        let csv = render_csv(&[row_for(input)]).unwrap();
        let fields: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();

        assert_eq!(fields.len(), 16);
        // breakEvenUnits, additionalUnitsNeeded
        assert_eq!(fields[12], "");
        assert_eq!(fields[13], "");
        assert_eq!(fields[15], "high");
    }
}
