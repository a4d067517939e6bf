//! Statements API access from the browser

use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use finsight_statements::StatementsResponse;

use crate::config::CONFIG;

/// `{base}/api/statements/{ticker}/{year}`
pub fn statements_url(api_base: &str, ticker: &str, year: i32) -> String {
    format!(
        "{}/api/statements/{}/{}",
        api_base.trim_end_matches('/'),
        ticker.trim().to_uppercase(),
        year
    )
}

fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Fetch one company's statements; the error is shown to the user as is
pub async fn get_statements(ticker: &str, year: i32) -> Result<StatementsResponse, String> {
    let url = statements_url(CONFIG.api_base, ticker, year);

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            log_error(&format!("HTTP error: {}", e));
            "Failed to load statements".to_string()
        })?;

    if !response.ok() {
        let message = format!("Backend returned {}", response.status());
        log_error(&message);
        return Err(message);
    }

    let body = response.text().await.map_err(|e| e.to_string())?;
    StatementsResponse::from_json(&body).map_err(|e| {
        log_error(&e.to_string());
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_url() {
        assert_eq!(
            statements_url("https://api.example.com/", " aapl ", 2023),
            "https://api.example.com/api/statements/AAPL/2023"
        );
    }
}
