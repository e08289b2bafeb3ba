use crate::domain::model::{RiskEntry, RiskLevel, RiskMetrics, RiskReport};

pub const TOTAL_IMPACT: &str = "₹4,50,00,000";

/// Contract risk register, ordered by priority.
pub const RISK_REGISTER: [RiskEntry; 5] = [
    RiskEntry {
        id: "1",
        brand: "Samsung",
        model: "Galaxy S24",
        risk_level: RiskLevel::High,
        risk_type: "Contract Expiring",
        description: "Contract expires in 5 months",
        impact: "Revenue Loss: ₹2,50,00,000",
        days_left: Some(150),
        priority: 1,
    },
    RiskEntry {
        id: "2",
        brand: "Apple",
        model: "iPhone 16",
        risk_level: RiskLevel::Medium,
        risk_type: "SLA Stricter",
        description: "SLA requirement increased to 10 hours",
        impact: "Operational Cost: ₹15,00,000",
        days_left: Some(30),
        priority: 2,
    },
    RiskEntry {
        id: "3",
        brand: "Oppo",
        model: "Reno X",
        risk_level: RiskLevel::Medium,
        risk_type: "Margin Pressure",
        description: "Margin dropped from 10% to 8%",
        impact: "Profit Loss: ₹80,00,000",
        days_left: None,
        priority: 3,
    },
    RiskEntry {
        id: "4",
        brand: "Vivo",
        model: "V-Series",
        risk_level: RiskLevel::Low,
        risk_type: "Payment Terms",
        description: "Payment terms extended to Net 60",
        impact: "Cash Flow: ₹50,00,000",
        days_left: None,
        priority: 4,
    },
    RiskEntry {
        id: "5",
        brand: "Xiaomi",
        model: "Redmi Pro",
        risk_level: RiskLevel::Low,
        risk_type: "Territory Restriction",
        description: "Territory reduced by 2 states",
        impact: "Market Share: 15% reduction",
        days_left: None,
        priority: 5,
    },
];

pub fn risk_metrics(entries: &[RiskEntry]) -> RiskMetrics {
    let count = |level: RiskLevel| entries.iter().filter(|r| r.risk_level == level).count();
    RiskMetrics {
        total_risks: entries.len(),
        high_risk: count(RiskLevel::High),
        medium_risk: count(RiskLevel::Medium),
        low_risk: count(RiskLevel::Low),
        total_impact: TOTAL_IMPACT,
    }
}

/// Metrics always describe the whole register; `level` only filters the list.
pub fn risk_report(level: Option<RiskLevel>) -> RiskReport {
    let risks = RISK_REGISTER
        .iter()
        .filter(|r| level.map_or(true, |l| r.risk_level == l))
        .cloned()
        .collect();

    RiskReport {
        risks,
        metrics: risk_metrics(&RISK_REGISTER),
    }
}
