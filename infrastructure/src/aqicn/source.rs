//! AQI source adapter scraping per-city pages.
//!
//! Issues one GET per city against `{base_url}/{city}` and scans the HTML
//! for the value container carrying the `aqivalue` CSS class. Every failure
//! mode is captured as a [`FetchOutcome`] variant; nothing escapes as an
//! error.

use async_trait::async_trait;
use herald_application::AqiSource;
use herald_domain::FetchOutcome;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// CSS class of the element holding the numeric AQI text.
const AQI_VALUE_SELECTOR: &str = "div.aqivalue";

/// Scraping source for AQI readings.
pub struct AqicnSource {
    client: reqwest::Client,
    base_url: String,
}

impl AqicnSource {
    /// Create a source for the given base URL with a fresh HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a source with an existing HTTP client (useful for testing).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn city_url(&self, city: &str) -> String {
        format!("{}/{}", self.base_url, city)
    }
}

#[async_trait]
impl AqiSource for AqicnSource {
    async fn fetch(&self, city: &str) -> FetchOutcome {
        let url = self.city_url(city);
        debug!("Fetching AQI page: {}", url);

        let response = match self
            .client
            .get(&url)
            .header("User-Agent", "aqi-herald/0.1 (AQI reporter)")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Transport error fetching {}: {}", city, e);
                return FetchOutcome::Transport(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} fetching {}", status.as_u16(), city);
            return FetchOutcome::HttpStatus(status.as_u16());
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read body for {}: {}", city, e);
                return FetchOutcome::Transport(e.to_string());
            }
        };

        match extract_aqi_value(&html) {
            Some(text) => FetchOutcome::Value(text),
            None => {
                debug!("No AQI value container found for {}", city);
                FetchOutcome::NotFound
            }
        }
    }
}

/// Extract the text of the first `aqivalue` element, verbatim.
///
/// Numeric validation is deliberately deferred to the aggregation step, so
/// placeholder texts like `"-"` come back as-is.
fn extract_aqi_value(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(AQI_VALUE_SELECTOR).unwrap();

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}
