use crate::utils::error::DealMindError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Composite key into the summary catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrandModelKey {
    pub brand: String,
    pub model: String,
}

impl BrandModelKey {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
        }
    }
}

/// Exactly three display lines: margin, SLA and license expiry.
pub type SummaryPoints = [String; 3];

/// Each field is read on its own: a number or boolean keeps its JSON text,
/// anything else that is not a string becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: String,
}

pub fn text_or_empty(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(text_or_empty).unwrap_or_default())
}

impl SummaryRequest {
    pub fn key(&self) -> BrandModelKey {
        BrandModelKey::new(self.brand.clone(), self.model.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub brand: String,
    pub model: String,
    pub points: SummaryPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub brand: String,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogListing {
    pub brands: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Brand {
    #[default]
    Apple,
    Samsung,
    Oppo,
    Vivo,
    Xiaomi,
}

impl Brand {
    pub const ALL: [Brand; 5] = [
        Brand::Apple,
        Brand::Samsung,
        Brand::Oppo,
        Brand::Vivo,
        Brand::Xiaomi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Apple => "apple",
            Brand::Samsung => "samsung",
            Brand::Oppo => "oppo",
            Brand::Vivo => "vivo",
            Brand::Xiaomi => "xiaomi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::Apple => "Apple",
            Brand::Samsung => "Samsung",
            Brand::Oppo => "Oppo",
            Brand::Vivo => "Vivo",
            Brand::Xiaomi => "Xiaomi",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = DealMindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Brand::ALL
            .into_iter()
            .find(|brand| brand.as_str() == normalized)
            .ok_or_else(|| DealMindError::UnknownBrand {
                brand: s.to_string(),
            })
    }
}

impl TryFrom<String> for Brand {
    type Error = DealMindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Simulator preset loaded when a brand is picked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrandDefaults {
    pub margin: f64,
    pub units: f64,
    pub price: f64,
    pub cost: f64,
}

/// Caller-supplied projection parameters. Numeric fields fall back to zero
/// when missing or unparsable; the integer-valued ones are truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    #[serde(default)]
    pub brand: Brand,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_margin: f64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub margin_drop: f64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub units_sold: f64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub avg_selling_price: f64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub operational_cost: f64,
}

/// 數字、數字字串皆可；其他一律視為 0
pub fn number_or_zero(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Text input variant: fractional part dropped toward zero.
pub fn integer_or_zero(value: &serde_json::Value) -> f64 {
    number_or_zero(value).trunc()
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_or_zero).unwrap_or(0.0))
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(integer_or_zero).unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DealMindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(DealMindError::InvalidRequest {
                message: format!("unknown risk level '{}'", other),
            }),
        }
    }
}

/// Derived projection. `None` marks a metric with no finite value for the
/// given inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub current_revenue: f64,
    pub current_profit: f64,
    pub new_profit: f64,
    pub profit_loss: f64,
    pub percentage_loss: Option<f64>,
    pub new_margin: f64,
    pub break_even_units: Option<f64>,
    pub additional_units_needed: Option<f64>,
    pub cash_flow_impact: f64,
    pub operational_efficiency: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
    pub id: &'static str,
    pub brand: &'static str,
    pub model: &'static str,
    pub risk_level: RiskLevel,
    pub risk_type: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub days_left: Option<u32>,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub total_risks: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub total_impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub risks: Vec<RiskEntry>,
    pub metrics: RiskMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DealMindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DealMindError::InvalidRequest {
                message: format!("unknown difficulty '{}'", other),
            }),
        }
    }
}

/// One negotiation play: the situation, the approach, and what to expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookCard {
    pub id: &'static str,
    pub category: &'static str,
    pub scenario: &'static str,
    pub strategy: &'static str,
    pub tactics: [&'static str; 4],
    pub expected_outcome: &'static str,
    pub difficulty: Difficulty,
    /// Percent of past negotiations that reached the expected outcome.
    pub success_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playbook {
    /// Every category in the full playbook, in first-seen order.
    pub categories: Vec<&'static str>,
    pub cards: Vec<PlaybookCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreRating {
    NeedsImprovement,
    Good,
    Excellent,
}

/// Contract terms of one brand side by side with the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandComparison {
    pub brand: Brand,
    pub margin_percent: u8,
    pub sla_hours: u8,
    pub territory_states: u8,
    pub payment_terms_days: u8,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    #[serde(flatten)]
    pub terms: BrandComparison,
    pub rating: ScoreRating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub brands: Vec<ComparisonRow>,
    pub highest_margin: Brand,
    pub lowest_margin: Brand,
    pub widest_territory: Brand,
    pub longest_payment_terms: Brand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brand_parses_case_insensitively() {
        assert_eq!("Apple".parse::<Brand>().unwrap(), Brand::Apple);
        assert_eq!(" XIAOMI ".parse::<Brand>().unwrap(), Brand::Xiaomi);
        assert!("nokia".parse::<Brand>().is_err());
    }

    #[test]
    fn test_simulation_input_accepts_strings_and_garbage() {
        let input: SimulationInput = serde_json::from_value(json!({
            "brand": "Samsung",
            "currentMargin": "12.5",
            "marginDrop": null,
            "unitsSold": "45000.9",
            "avgSellingPrice": "abc",
        }))
        .unwrap();

        assert_eq!(input.brand, Brand::Samsung);
        assert_eq!(input.current_margin, 12.5);
        assert_eq!(input.margin_drop, 0.0);
        assert_eq!(input.units_sold, 45000.0);
        assert_eq!(input.avg_selling_price, 0.0);
        assert_eq!(input.operational_cost, 0.0);
    }

    #[test]
    fn test_simulation_input_rejects_unknown_brand() {
        let result: Result<SimulationInput, _> =
            serde_json::from_value(json!({ "brand": "nokia" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_number_or_zero_ignores_non_finite_strings() {
        assert_eq!(number_or_zero(&json!("NaN")), 0.0);
        assert_eq!(number_or_zero(&json!("inf")), 0.0);
        assert_eq!(number_or_zero(&json!(true)), 0.0);
        assert_eq!(integer_or_zero(&json!(-7.8)), -7.0);
    }

    #[test]
    fn test_summary_request_defaults_missing_fields() {
        let request: SummaryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, SummaryRequest::default());
    }

    #[test]
    fn test_summary_request_reads_fields_independently() {
        let request: SummaryRequest =
            serde_json::from_value(json!({ "brand": "Apple", "model": 15 })).unwrap();
        assert_eq!(request.brand, "Apple");
        assert_eq!(request.model, "15");

        let request: SummaryRequest =
            serde_json::from_value(json!({ "brand": ["Apple"], "model": "iPhone 15" })).unwrap();
        assert_eq!(request.brand, "");
        assert_eq!(request.model, "iPhone 15");

        let request: SummaryRequest =
            serde_json::from_value(json!({ "brand": null, "model": true })).unwrap();
        assert_eq!(request.brand, "");
        assert_eq!(request.model, "true");
    }
}
