//! Aggregate readings use case.
//!
//! Fans one [`AqiSource::fetch`] out per configured city, joins at a single
//! barrier, and collects the valid numeric results into an
//! [`AggregateReport`]. This join is the only synchronization point in the
//! whole pipeline; each fetch owns its own result slot and no mutable state
//! is shared across the concurrent branches.

use crate::ports::aqi_source::AqiSource;
use futures::future::join_all;
use herald_domain::AggregateReport;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for concurrently collecting per-city readings.
///
/// Never fails: cities whose fetch produced no valid numeric reading are
/// simply absent from the report, and the worst case is an empty report.
/// For fixed underlying page contents the output is fully determined,
/// independent of fetch completion order.
pub struct AggregateReadingsUseCase {
    source: Arc<dyn AqiSource>,
}

impl AggregateReadingsUseCase {
    pub fn new(source: Arc<dyn AqiSource>) -> Self {
        Self { source }
    }

    /// Fetch all cities concurrently and build the aggregate report.
    pub async fn execute(&self, cities: &[String]) -> AggregateReport {
        let fetches = cities.iter().map(|city| {
            let source = Arc::clone(&self.source);
            async move {
                let outcome = source.fetch(city).await;
                (city.clone(), outcome)
            }
        });

        let results = join_all(fetches).await;

        let mut report = AggregateReport::new();
        for (city, outcome) in results {
            match outcome.into_valid_reading() {
                Some(reading) => report.insert(city, reading),
                None => debug!("Dropping {}: no valid numeric reading", city),
            }
        }

        info!(
            "Aggregated {} valid readings from {} cities",
            report.len(),
            cities.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use herald_domain::FetchOutcome;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Stub source returning canned outcomes, with an optional per-city
    /// delay so tests can force arbitrary completion orders.
    struct StubSource {
        outcomes: HashMap<String, FetchOutcome>,
        delays_ms: HashMap<String, u64>,
    }

    impl StubSource {
        fn new(outcomes: Vec<(&str, FetchOutcome)>) -> Self {
            Self {
                outcomes: outcomes
                    .into_iter()
                    .map(|(c, o)| (c.to_string(), o))
                    .collect(),
                delays_ms: HashMap::new(),
            }
        }

        fn with_delay(mut self, city: &str, ms: u64) -> Self {
            self.delays_ms.insert(city.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl AqiSource for StubSource {
        async fn fetch(&self, city: &str) -> FetchOutcome {
            if let Some(ms) = self.delays_ms.get(city) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.outcomes
                .get(city)
                .cloned()
                .unwrap_or(FetchOutcome::NotFound)
        }
    }

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn collects_only_valid_numeric_readings() {
        let source = StubSource::new(vec![
            ("jakarta", FetchOutcome::Value("55".into())),
            ("bandung", FetchOutcome::Value("N/A".into())),
            ("medan", FetchOutcome::Value("-".into())),
            ("surabaya", FetchOutcome::NotFound),
            ("semarang", FetchOutcome::HttpStatus(503)),
            ("batam", FetchOutcome::Transport("timed out".into())),
            ("bogor", FetchOutcome::Value("42".into())),
        ]);

        let use_case = AggregateReadingsUseCase::new(Arc::new(source));
        let report = use_case
            .execute(&cities(&[
                "jakarta", "bandung", "medan", "surabaya", "semarang", "batam", "bogor",
            ]))
            .await;

        assert_eq!(report.len(), 2);
        let readings: Vec<(&str, &str)> = report.iter().collect();
        assert_eq!(readings, vec![("bogor", "42"), ("jakarta", "55")]);
    }

    #[tokio::test]
    async fn all_not_found_yields_empty_report() {
        let source = StubSource::new(vec![
            ("jakarta", FetchOutcome::NotFound),
            ("bandung", FetchOutcome::NotFound),
        ]);

        let use_case = AggregateReadingsUseCase::new(Arc::new(source));
        let report = use_case.execute(&cities(&["jakarta", "bandung"])).await;

        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn completion_order_does_not_affect_result() {
        // First city resolves last, last resolves first; the report must
        // come out identical to the undelayed run.
        let delayed = StubSource::new(vec![
            ("jakarta", FetchOutcome::Value("55".into())),
            ("bandung", FetchOutcome::Value("120".into())),
            ("medan", FetchOutcome::Value("30".into())),
        ])
        .with_delay("jakarta", 30)
        .with_delay("medan", 5);

        let plain = StubSource::new(vec![
            ("jakarta", FetchOutcome::Value("55".into())),
            ("bandung", FetchOutcome::Value("120".into())),
            ("medan", FetchOutcome::Value("30".into())),
        ]);

        let city_list = cities(&["jakarta", "bandung", "medan"]);
        let a = AggregateReadingsUseCase::new(Arc::new(delayed))
            .execute(&city_list)
            .await;
        let b = AggregateReadingsUseCase::new(Arc::new(plain))
            .execute(&city_list)
            .await;

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[tokio::test]
    async fn empty_city_list_yields_empty_report() {
        let source = StubSource::new(vec![]);
        let use_case = AggregateReadingsUseCase::new(Arc::new(source));
        let report = use_case.execute(&[]).await;
        assert!(report.is_empty());
    }
}
