use crate::domain::model::{BrandModelKey, CatalogEntry, CatalogListing, SummaryPoints};
use crate::domain::ports::SummarySource;
use std::collections::HashMap;

/// (brand, [(model, margin %, SLA hours, license days)])
const BUILTIN_TABLE: &[(&str, &[(&str, u32, u32, u32)])] = &[
    (
        "Apple",
        &[
            ("iPhone 15", 11, 12, 100),
            ("iPhone 16", 12, 12, 90),
            ("iPhone 17", 13, 10, 80),
        ],
    ),
    (
        "Samsung",
        &[
            ("Galaxy S23", 9, 18, 120),
            ("Galaxy S24", 10, 16, 110),
            ("Galaxy Z Flip 5", 12, 20, 95),
        ],
    ),
    (
        "Oppo",
        &[
            ("Reno 10", 8, 22, 130),
            ("Find X6", 9, 20, 125),
            ("A98", 7, 24, 140),
        ],
    ),
    (
        "Vivo",
        &[("X100", 9, 22, 115), ("V29", 10, 20, 110), ("Y78", 8, 24, 130)],
    ),
    (
        "Xiaomi",
        &[
            ("Mi 13", 8, 24, 150),
            ("Redmi Note 13", 7, 26, 160),
            ("Poco F5", 9, 22, 140),
        ],
    ),
];

pub fn summary_points(margin_percent: u32, sla_hours: u32, license_days: u32) -> SummaryPoints {
    [
        format!("Margin: {}%", margin_percent),
        format!("SLA = {}h", sla_hours),
        format!("License expires in {} days", license_days),
    ]
}

/// Immutable brand → model → points table, built once at start-up.
#[derive(Debug, Clone)]
pub struct SummaryCatalog {
    entries: HashMap<String, HashMap<String, SummaryPoints>>,
    // HashMap 不保留順序，列表輸出依這裡
    order: Vec<(String, Vec<String>)>,
}

impl SummaryCatalog {
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        let mut order = Vec::with_capacity(BUILTIN_TABLE.len());

        for (brand, models) in BUILTIN_TABLE {
            let mut by_model = HashMap::with_capacity(models.len());
            let mut model_names = Vec::with_capacity(models.len());
            for (model, margin, sla, license) in *models {
                by_model.insert(model.to_string(), summary_points(*margin, *sla, *license));
                model_names.push(model.to_string());
            }
            entries.insert(brand.to_string(), by_model);
            order.push((brand.to_string(), model_names));
        }

        Self { entries, order }
    }

    pub fn brand_count(&self) -> usize {
        self.order.len()
    }

    pub fn model_count(&self) -> usize {
        self.order.iter().map(|(_, models)| models.len()).sum()
    }
}

impl Default for SummaryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SummarySource for SummaryCatalog {
    fn points(&self, key: &BrandModelKey) -> Option<&SummaryPoints> {
        self.entries
            .get(&key.brand)
            .and_then(|models| models.get(&key.model))
    }

    fn listing(&self) -> CatalogListing {
        CatalogListing {
            brands: self
                .order
                .iter()
                .map(|(brand, models)| CatalogEntry {
                    brand: brand.clone(),
                    models: models.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_size() {
        let catalog = SummaryCatalog::builtin();
        assert_eq!(catalog.brand_count(), 5);
        assert_eq!(catalog.model_count(), 15);
    }

    #[test]
    fn test_points_lookup_is_case_sensitive() {
        let catalog = SummaryCatalog::builtin();
        assert!(catalog
            .points(&BrandModelKey::new("Vivo", "V29"))
            .is_some());
        assert!(catalog
            .points(&BrandModelKey::new("vivo", "V29"))
            .is_none());
    }

    #[test]
    fn test_listing_keeps_table_order() {
        let listing = SummaryCatalog::builtin().listing();
        let brands: Vec<&str> = listing.brands.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(brands, vec!["Apple", "Samsung", "Oppo", "Vivo", "Xiaomi"]);
        assert_eq!(
            listing.brands[2].models,
            vec!["Reno 10".to_string(), "Find X6".to_string(), "A98".to_string()]
        );
    }
}
