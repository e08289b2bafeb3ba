//! What-if margin projection.
//!
//! A single pass over [`SimulationInput`]: revenue and profit at the current
//! margin, profit at the reduced margin, and the unit volume needed to win the
//! lost profit back. Inputs are not range-checked; negative values flow
//! through the arithmetic. Denominators that reach zero yield `None` instead
//! of NaN or infinity; inputs large enough to overflow any other figure are
//! rejected with [`DealMindError::InvalidRequest`].

use crate::domain::model::{Brand, BrandDefaults, RiskLevel, SimulationInput, SimulationResult};
use crate::utils::error::{DealMindError, Result};

pub const HIGH_RISK_THRESHOLD: f64 = 25.0;
pub const MEDIUM_RISK_THRESHOLD: f64 = 15.0;
pub const DEFAULT_MARGIN_DROP: f64 = 2.0;

impl Brand {
    pub fn defaults(&self) -> BrandDefaults {
        let (margin, units, price, cost) = match self {
            Brand::Apple => (12.0, 50_000.0, 80_000.0, 2_000_000.0),
            Brand::Samsung => (15.0, 45_000.0, 75_000.0, 1_800_000.0),
            Brand::Oppo => (8.0, 60_000.0, 25_000.0, 1_200_000.0),
            Brand::Vivo => (10.0, 55_000.0, 30_000.0, 1_500_000.0),
            Brand::Xiaomi => (9.0, 70_000.0, 20_000.0, 1_000_000.0),
        };
        BrandDefaults {
            margin,
            units,
            price,
            cost,
        }
    }
}

impl SimulationInput {
    /// Preset for `brand` with the standard 2 point margin drop.
    pub fn for_brand(brand: Brand) -> Self {
        let defaults = brand.defaults();
        Self {
            brand,
            current_margin: defaults.margin,
            margin_drop: DEFAULT_MARGIN_DROP,
            units_sold: defaults.units,
            avg_selling_price: defaults.price,
            operational_cost: defaults.cost,
        }
    }
}

/// Missing percentages classify as low.
pub fn classify_risk(percentage_loss: Option<f64>) -> RiskLevel {
    match percentage_loss {
        Some(p) if p >= HIGH_RISK_THRESHOLD => RiskLevel::High,
        Some(p) if p >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn checked(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DealMindError::InvalidRequest {
            message: format!("inputs overflow {}", field),
        })
    }
}

pub fn project(input: &SimulationInput) -> Result<SimulationResult> {
    let current_revenue = checked("currentRevenue", input.units_sold * input.avg_selling_price)?;
    let current_profit = checked("currentProfit", current_revenue * input.current_margin / 100.0)?;
    let new_margin = checked("newMargin", input.current_margin - input.margin_drop)?;
    let new_profit = checked("newProfit", current_revenue * new_margin / 100.0)?;
    let profit_loss = checked("profitLoss", current_profit - new_profit)?;

    let percentage_loss = if current_profit == 0.0 {
        None
    } else {
        finite(profit_loss / current_profit * 100.0)
    };

    // 新毛利下每台利潤 <= 0 時，賣再多也回不到原利潤
    let unit_profit = input.avg_selling_price * new_margin / 100.0;
    let break_even_units = if unit_profit > 0.0 {
        finite((current_profit / unit_profit).ceil())
    } else {
        None
    };
    let additional_units_needed = break_even_units.map(|units| (units - input.units_sold).max(0.0));

    let operational_efficiency =
        checked("operationalEfficiency", (100.0 - input.margin_drop * 10.0).max(0.0))?;
    let risk_level = classify_risk(percentage_loss);

    tracing::debug!(
        brand = %input.brand,
        new_margin,
        ?percentage_loss,
        %risk_level,
        "Projection computed"
    );

    Ok(SimulationResult {
        current_revenue,
        current_profit,
        new_profit,
        profit_loss,
        percentage_loss,
        new_margin,
        break_even_units,
        additional_units_needed,
        cash_flow_impact: profit_loss,
        operational_efficiency,
        risk_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(margin: f64, drop: f64, units: f64, price: f64) -> SimulationInput {
        SimulationInput {
            brand: Brand::Apple,
            current_margin: margin,
            margin_drop: drop,
            units_sold: units,
            avg_selling_price: price,
            operational_cost: 2_000_000.0,
        }
    }

    #[test]
    fn test_apple_reference_scenario() {
        let result = project(&input(12.0, 2.0, 50_000.0, 80_000.0)).unwrap();

        assert_eq!(result.current_revenue, 4_000_000_000.0);
        assert_eq!(result.current_profit, 480_000_000.0);
        assert_eq!(result.new_margin, 10.0);
        assert_eq!(result.new_profit, 400_000_000.0);
        assert_eq!(result.profit_loss, 80_000_000.0);
        assert_eq!(result.cash_flow_impact, 80_000_000.0);

        let pct = result.percentage_loss.unwrap();
        assert!((pct - 16.666_666).abs() < 1e-3);
        assert_eq!(result.risk_level, RiskLevel::Medium);

        assert_eq!(result.break_even_units, Some(60_000.0));
        assert_eq!(result.additional_units_needed, Some(10_000.0));
        assert_eq!(result.operational_efficiency, 80.0);
    }

    #[test]
    fn test_zero_margin_drop_is_low_risk() {
        let result = project(&input(12.0, 0.0, 50_000.0, 80_000.0)).unwrap();

        assert_eq!(result.new_profit, result.current_profit);
        assert_eq!(result.profit_loss, 0.0);
        assert_eq!(result.percentage_loss, Some(0.0));
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.additional_units_needed, Some(0.0));
        assert_eq!(result.operational_efficiency, 100.0);
    }

    #[test]
    fn test_zero_current_profit_has_no_percentage() {
        let result = project(&input(0.0, 2.0, 50_000.0, 80_000.0)).unwrap();

        assert_eq!(result.current_profit, 0.0);
        assert_eq!(result.percentage_loss, None);
        assert_eq!(result.risk_level, RiskLevel::Low);
        // 新毛利為負
        assert_eq!(result.break_even_units, None);
    }

    #[test]
    fn test_zero_new_margin_has_no_break_even() {
        let result = project(&input(10.0, 10.0, 50_000.0, 80_000.0)).unwrap();

        assert_eq!(result.new_margin, 0.0);
        assert_eq!(result.new_profit, 0.0);
        assert_eq!(result.percentage_loss, Some(100.0));
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.break_even_units, None);
        assert_eq!(result.additional_units_needed, None);
    }

    #[test]
    fn test_zero_units_sold() {
        let result = project(&input(12.0, 2.0, 0.0, 80_000.0)).unwrap();

        assert_eq!(result.current_revenue, 0.0);
        assert_eq!(result.percentage_loss, None);
        assert_eq!(result.break_even_units, Some(0.0));
        assert_eq!(result.additional_units_needed, Some(0.0));
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let result = project(&input(12.0, -3.0, 1_000.0, 100.0)).unwrap();

        assert_eq!(result.new_margin, 15.0);
        assert!(result.profit_loss < 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.break_even_units, Some(800.0));
    }

    #[test]
    fn test_risk_thresholds_are_inclusive() {
        assert_eq!(classify_risk(Some(25.0)), RiskLevel::High);
        assert_eq!(classify_risk(Some(24.99)), RiskLevel::Medium);
        assert_eq!(classify_risk(Some(15.0)), RiskLevel::Medium);
        assert_eq!(classify_risk(Some(14.99)), RiskLevel::Low);
        assert_eq!(classify_risk(None), RiskLevel::Low);
    }

    #[test]
    fn test_large_margin_drop_clamps_efficiency() {
        let result = project(&input(12.0, 11.0, 50_000.0, 80_000.0)).unwrap();
        assert_eq!(result.operational_efficiency, 0.0);
    }

    #[test]
    fn test_overflowing_inputs_are_rejected() {
        let err = project(&input(12.0, 2.0, 1e200, 1e200)).unwrap_err();
        assert!(matches!(err, DealMindError::InvalidRequest { .. }));
        assert!(err.to_string().contains("currentRevenue"));

        // 營收有限但乘上毛利後溢位
        let err = project(&input(1e300, 2.0, 1e10, 1e10)).unwrap_err();
        assert!(err.to_string().contains("currentProfit"));
    }

    #[test]
    fn test_near_limit_inputs_stay_finite() {
        let result = project(&input(12.0, 2.0, 1e150, 1e150)).unwrap();
        for value in [
            result.current_revenue,
            result.current_profit,
            result.new_profit,
            result.profit_loss,
            result.cash_flow_impact,
            result.new_margin,
            result.operational_efficiency,
        ] {
            assert!(value.is_finite());
        }
        assert!(result.break_even_units.map_or(true, f64::is_finite));
    }

    #[test]
    fn test_brand_presets() {
        let preset = SimulationInput::for_brand(Brand::Xiaomi);
        assert_eq!(preset.current_margin, 9.0);
        assert_eq!(preset.units_sold, 70_000.0);
        assert_eq!(preset.avg_selling_price, 20_000.0);
        assert_eq!(preset.operational_cost, 1_000_000.0);
        assert_eq!(preset.margin_drop, DEFAULT_MARGIN_DROP);
    }
}
