use crate::domain::model::{SummaryPoints, SummaryRequest, SummaryResponse};
use crate::domain::ports::SummarySource;

pub const DEFAULT_POINTS: [&str; 3] = [
    "Margin: 5% (baseline)",
    "SLA = 24h",
    "License expires in 180 days",
];

pub fn default_points() -> SummaryPoints {
    DEFAULT_POINTS.map(String::from)
}

/// Lookup service over any [`SummarySource`]. Unknown pairs, including empty
/// strings, get [`DEFAULT_POINTS`]; there is no failure path.
pub struct SummaryService<S: SummarySource> {
    source: S,
}

impl<S: SummarySource> SummaryService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn summarize(&self, request: SummaryRequest) -> SummaryResponse {
        tracing::info!(
            "📥 Request for brand: {}, model: {}",
            request.brand,
            request.model
        );

        let points = match self.source.points(&request.key()) {
            Some(points) => points.clone(),
            None => {
                tracing::debug!("No catalog entry, using baseline summary");
                default_points()
            }
        };

        SummaryResponse {
            brand: request.brand,
            model: request.model,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::SummaryCatalog;

    fn request(brand: &str, model: &str) -> SummaryRequest {
        SummaryRequest {
            brand: brand.to_string(),
            model: model.to_string(),
        }
    }

    #[test]
    fn test_known_pair_returns_table_entry_in_order() {
        let service = SummaryService::new(SummaryCatalog::builtin());
        let response = service.summarize(request("Apple", "iPhone 17"));

        assert_eq!(response.brand, "Apple");
        assert_eq!(response.model, "iPhone 17");
        assert_eq!(
            response.points,
            [
                "Margin: 13%".to_string(),
                "SLA = 10h".to_string(),
                "License expires in 80 days".to_string()
            ]
        );
    }

    #[test]
    fn test_every_catalog_entry_round_trips() {
        let service = SummaryService::new(SummaryCatalog::builtin());
        for entry in service.source().listing().brands {
            for model in entry.models {
                let response = service.summarize(request(&entry.brand, &model));
                assert_ne!(response.points, default_points(), "{} {}", entry.brand, model);
            }
        }
    }

    #[test]
    fn test_unknown_pairs_fall_back_to_default() {
        let service = SummaryService::new(SummaryCatalog::builtin());
        for (brand, model) in [
            ("Nokia", "3310"),
            ("Apple", "iPhone 3G"),
            ("", ""),
            ("apple", "iphone 15"),
        ] {
            let response = service.summarize(request(brand, model));
            assert_eq!(response.points, default_points());
            assert_eq!(response.brand, brand);
            assert_eq!(response.model, model);
        }
    }
}
