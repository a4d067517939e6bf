//! Statements API client with retries

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use finsight_statements::StatementsResponse;

use crate::config::Config;
use crate::constants;

/// `{base}/api/statements/{ticker}/{year}`
pub fn statements_url(base_url: &str, ticker: &str, year: i32) -> String {
    format!(
        "{}{}/{}/{}",
        base_url.trim_end_matches('/'),
        constants::STATEMENTS_PATH,
        ticker.trim().to_uppercase(),
        year
    )
}

/// Rate limiting and server errors are worth another attempt
pub fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Delay before the given attempt (0-based); the first attempt is immediate
pub fn backoff(attempt: u32) -> Duration {
    if attempt == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(2u64.pow(attempt))
    }
}

pub fn status_message(status: StatusCode) -> String {
    format!("Backend returned {}", status.as_u16())
}

pub struct StatementsClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl StatementsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Fetch the statements payload for one company and fiscal year
    pub async fn fetch_statements(&self, ticker: &str, year: i32) -> Result<StatementsResponse> {
        let url = statements_url(&self.base_url, ticker, year);
        info!(%url, "fetching statements");

        let body = self.get_with_retry(&url).await?;
        let response = StatementsResponse::from_json(&body)
            .with_context(|| format!("Invalid statements payload for {} {}", ticker, year))?;

        debug!(
            company = %response.company,
            standard = response.standard().as_str(),
            rows = response.count,
            "statements loaded"
        );
        Ok(response)
    }

    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            let delay = backoff(attempt);
            if !delay.is_zero() {
                warn!(attempt, delay_secs = delay.as_secs(), "retrying statements request");
                sleep(delay).await;
            }

            match self.http.get(url).header("Accept", "application/json").send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.context("Failed to read response body");
                    }

                    last_error = Some(anyhow!(status_message(status)));
                    if !is_retryable(status) {
                        break;
                    }
                }
                Err(e) => {
                    last_error = Some(anyhow!("Request failed: {}", e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Failed after {} retries", self.max_retries)))
    }
}
