use crate::domain::model::{Brand, BrandComparison, ComparisonReport, ComparisonRow, ScoreRating};

pub const EXCELLENT_SCORE: u8 = 80;
pub const GOOD_SCORE: u8 = 70;

/// Current contract terms per brand.
pub const BRAND_COMPARISON: [BrandComparison; 5] = [
    BrandComparison {
        brand: Brand::Apple,
        margin_percent: 12,
        sla_hours: 12,
        territory_states: 3,
        payment_terms_days: 30,
        score: 85,
    },
    BrandComparison {
        brand: Brand::Samsung,
        margin_percent: 15,
        sla_hours: 18,
        territory_states: 2,
        payment_terms_days: 45,
        score: 78,
    },
    BrandComparison {
        brand: Brand::Oppo,
        margin_percent: 8,
        sla_hours: 24,
        territory_states: 5,
        payment_terms_days: 30,
        score: 65,
    },
    BrandComparison {
        brand: Brand::Vivo,
        margin_percent: 10,
        sla_hours: 20,
        territory_states: 4,
        payment_terms_days: 60,
        score: 70,
    },
    BrandComparison {
        brand: Brand::Xiaomi,
        margin_percent: 9,
        sla_hours: 16,
        territory_states: 6,
        payment_terms_days: 30,
        score: 72,
    },
];

pub fn rate_score(score: u8) -> ScoreRating {
    if score >= EXCELLENT_SCORE {
        ScoreRating::Excellent
    } else if score >= GOOD_SCORE {
        ScoreRating::Good
    } else {
        ScoreRating::NeedsImprovement
    }
}

/// Brand with the largest `key`; the earlier row wins a tie.
fn leader<F>(key: F) -> Brand
where
    F: Fn(&BrandComparison) -> i32,
{
    BRAND_COMPARISON[1..]
        .iter()
        .fold(&BRAND_COMPARISON[0], |best, row| {
            if key(row) > key(best) {
                row
            } else {
                best
            }
        })
        .brand
}

pub fn comparison_report() -> ComparisonReport {
    let brands = BRAND_COMPARISON
        .iter()
        .map(|terms| ComparisonRow {
            terms: *terms,
            rating: rate_score(terms.score),
        })
        .collect();

    ComparisonReport {
        brands,
        highest_margin: leader(|r| i32::from(r.margin_percent)),
        lowest_margin: leader(|r| -i32::from(r.margin_percent)),
        widest_territory: leader(|r| i32::from(r.territory_states)),
        longest_payment_terms: leader(|r| i32::from(r.payment_terms_days)),
    }
}
