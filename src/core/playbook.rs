use crate::domain::model::{Difficulty, Playbook, PlaybookCard};

/// Category value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Negotiation playbook, one card per recurring contract situation.
pub const PLAYBOOK: [PlaybookCard; 6] = [
    PlaybookCard {
        id: "1",
        category: "Margin Improvement",
        scenario: "Oppo margin currently at 8%, industry average is 12%",
        strategy: "Volume-based margin scaling with performance incentives",
        tactics: [
            "Present market analysis showing competitor margins",
            "Propose tiered volume discounts in exchange for margin increase",
            "Highlight your consistent performance and payment history",
            "Suggest pilot program for 6 months to prove mutual value",
        ],
        expected_outcome: "Margin increase to 10-11% with volume commitments",
        difficulty: Difficulty::Medium,
        success_rate: 75,
    },
    PlaybookCard {
        id: "2",
        category: "SLA Negotiation",
        scenario: "Apple demanding 10-hour SLA, current capability is 12 hours",
        strategy: "Operational efficiency showcase with phased improvement plan",
        tactics: [
            "Present current performance metrics and improvement trend",
            "Propose 11-hour SLA with premium pricing for 10-hour service",
            "Offer enhanced reporting and transparency for compliance",
            "Request infrastructure support or margin adjustment for faster SLA",
        ],
        expected_outcome: "11-hour SLA accepted with 0.5% margin increase",
        difficulty: Difficulty::Hard,
        success_rate: 60,
    },
    PlaybookCard {
        id: "3",
        category: "Payment Terms",
        scenario: "Vivo extending payment terms from Net 30 to Net 60",
        strategy: "Cash flow impact analysis with alternative solutions",
        tactics: [
            "Calculate and present cash flow impact in rupees",
            "Propose early payment discounts (2% for Net 15)",
            "Suggest invoice factoring or supply chain financing options",
            "Request margin increase to offset financing costs",
        ],
        expected_outcome: "Net 45 compromise with early payment incentives",
        difficulty: Difficulty::Easy,
        success_rate: 85,
    },
    PlaybookCard {
        id: "4",
        category: "Territory Expansion",
        scenario: "Samsung restricting territory coverage to 2 states",
        strategy: "Performance-based territory expansion proposal",
        tactics: [
            "Demonstrate successful performance in current territories",
            "Present market opportunity analysis for new regions",
            "Propose gradual expansion with performance milestones",
            "Offer exclusive partnership in underperformed regions",
        ],
        expected_outcome: "Expansion to 3-4 states with performance conditions",
        difficulty: Difficulty::Medium,
        success_rate: 70,
    },
    PlaybookCard {
        id: "5",
        category: "Contract Renewal",
        scenario: "Xiaomi contract expiring, competitor offering better terms",
        strategy: "Relationship value and switching cost analysis",
        tactics: [
            "Highlight relationship history and trust built over time",
            "Calculate switching costs and transition risks for Xiaomi",
            "Present performance improvements and future roadmap",
            "Offer loyalty bonuses and long-term partnership benefits",
        ],
        expected_outcome: "Contract renewal with improved terms",
        difficulty: Difficulty::Medium,
        success_rate: 80,
    },
    PlaybookCard {
        id: "6",
        category: "Risk Mitigation",
        scenario: "Samsung contract with penalty clauses for SLA breaches",
        strategy: "Risk-sharing and mutual accountability framework",
        tactics: [
            "Propose graduated penalty structure based on severity",
            "Request force majeure clauses for external factors",
            "Suggest mutual penalty system for delayed payments",
            "Offer insurance or bond arrangements for major risks",
        ],
        expected_outcome: "Balanced risk framework with shared accountability",
        difficulty: Difficulty::Hard,
        success_rate: 65,
    },
];

pub fn categories() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for card in &PLAYBOOK {
        if !seen.contains(&card.category) {
            seen.push(card.category);
        }
    }
    seen
}

/// Category match is exact; `None` or `"all"` keeps every card. The category
/// list always covers the whole playbook.
pub fn playbook(category: Option<&str>, difficulty: Option<Difficulty>) -> Playbook {
    let category = category.filter(|c| *c != ALL_CATEGORIES);
    let cards = PLAYBOOK
        .iter()
        .filter(|card| category.map_or(true, |c| card.category == c))
        .filter(|card| difficulty.map_or(true, |d| card.difficulty == d))
        .cloned()
        .collect();

    Playbook {
        categories: categories(),
        cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_in_table_order() {
        assert_eq!(
            categories(),
            vec![
                "Margin Improvement",
                "SLA Negotiation",
                "Payment Terms",
                "Territory Expansion",
                "Contract Renewal",
                "Risk Mitigation",
            ]
        );
    }

    #[test]
    fn test_filter_by_category() {
        let book = playbook(Some("Payment Terms"), None);
        assert_eq!(book.cards.len(), 1);
        assert_eq!(book.cards[0].id, "3");
        assert_eq!(book.cards[0].success_rate, 85);
        assert_eq!(book.categories.len(), 6);

        assert_eq!(playbook(Some("all"), None).cards.len(), 6);
        assert_eq!(playbook(None, None).cards.len(), 6);
        // 大小寫需完全一致
        assert!(playbook(Some("payment terms"), None).cards.is_empty());
    }

    #[test]
    fn test_filter_by_difficulty() {
        let hard = playbook(None, Some(Difficulty::Hard));
        let ids: Vec<&str> = hard.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["2", "6"]);

        let medium_margin = playbook(Some("Margin Improvement"), Some(Difficulty::Medium));
        assert_eq!(medium_margin.cards.len(), 1);
        assert!(playbook(Some("Margin Improvement"), Some(Difficulty::Easy))
            .cards
            .is_empty());
    }
}
