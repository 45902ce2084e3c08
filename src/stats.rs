//! Summary figures over a catalog snapshot

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Catalog;

/// Price spread over records with a usable price
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub priced: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingSummary {
    pub total_products: usize,
    pub products_with_reviews: usize,
    pub avg_rating: f64,
    /// "3-4" -> count. A perfect 5.0 lands in "4-5".
    pub distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub price: PriceRange,
    pub ratings: RatingSummary,
}

impl CatalogStats {
    pub fn compute(catalog: &Catalog) -> Self {
        let prices: Vec<f64> = catalog
            .all()
            .iter()
            .map(|r| r.price())
            .filter(|p| *p > 0.0)
            .collect();
        let ratings: Vec<f64> = catalog
            .all()
            .iter()
            .map(|r| r.rating())
            .filter(|r| *r > 0.0)
            .collect();

        let price = if prices.is_empty() {
            PriceRange::default()
        } else {
            PriceRange {
                min: prices.iter().copied().fold(f64::INFINITY, f64::min),
                max: prices.iter().copied().fold(0.0, f64::max),
                avg: prices.iter().sum::<f64>() / prices.len() as f64,
                priced: prices.len(),
            }
        };

        let mut distribution = BTreeMap::new();
        for rating in &ratings {
            let floor = (rating.floor() as usize).min(4);
            *distribution
                .entry(format!("{}-{}", floor, floor + 1))
                .or_insert(0) += 1;
        }

        let avg_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        Self {
            price,
            ratings: RatingSummary {
                total_products: catalog.len(),
                products_with_reviews: ratings.len(),
                avg_rating,
                distribution,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilterOptions;
    use crate::record::Record;
    use serde_json::json;

    fn catalog(values: serde_json::Value) -> Catalog {
        let records = values
            .as_array()
            .unwrap()
            .iter()
            .map(Record::from_value)
            .collect();
        Catalog::new(records, FilterOptions::default())
    }

    #[test]
    fn test_stats_skip_unusable_values() {
        let catalog = catalog(json!([
            {"price_details": {"Current Price": "$500"}, "review_details": "4.5 out of 5 stars"},
            {"price_details": {"Current Price": "$1,500"}, "review_details": {"Overall Rating": "5/5"}},
            {"price_details": "Not Available", "review_details": "-"},
            {"review_details": "3.2 out of 5 stars"}
        ]));

        let stats = CatalogStats::compute(&catalog);
        assert_eq!(stats.price.min, 500.0);
        assert_eq!(stats.price.max, 1500.0);
        assert_eq!(stats.price.avg, 1000.0);
        assert_eq!(stats.price.priced, 2);

        assert_eq!(stats.ratings.total_products, 4);
        assert_eq!(stats.ratings.products_with_reviews, 3);
        assert_eq!(stats.ratings.distribution.get("4-5"), Some(&2));
        assert_eq!(stats.ratings.distribution.get("3-4"), Some(&1));
        assert!(stats.ratings.distribution.get("5-6").is_none());
    }

    #[test]
    fn test_stats_of_empty_catalog() {
        let stats = CatalogStats::compute(&Catalog::empty());
        assert_eq!(stats, CatalogStats::default());
    }
}
