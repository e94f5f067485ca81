//! Loading the rendered locator page.
//!
//! Driving a browser through the region picker is outside this crate. The
//! page either comes straight over HTTP (when the locator URL already serves
//! the outlet cards) or from a snapshot saved after rendering elsewhere.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Build the HTTP client used to fetch the locator page.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Fetch the locator page body.
///
/// A failure here is fatal to a scrape run; nothing is retried.
///
/// # Errors
///
/// - [`ScraperError::Http`] on network failure.
/// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
/// - [`ScraperError::EmptyPage`] when the body is blank.
/// - [`ScraperError::BotChallenge`] when an anti-bot interstitial was served.
pub async fn fetch_locator_html(client: &Client, url: &str) -> Result<String, ScraperError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    check_usable(body, url)
}

/// Read a rendered page snapshot from disk.
///
/// # Errors
///
/// Returns [`ScraperError::Snapshot`] if the file cannot be read, or
/// [`ScraperError::EmptyPage`] if it is blank.
pub async fn load_html_file(path: &Path) -> Result<String, ScraperError> {
    let display = path.display().to_string();
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScraperError::Snapshot {
            path: display.clone(),
            source,
        })?;
    check_usable(body, &display)
}

fn check_usable(body: String, url: &str) -> Result<String, ScraperError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ScraperError::EmptyPage {
            url: url.to_owned(),
        });
    }
    if looks_like_bot_challenge(trimmed) {
        return Err(ScraperError::BotChallenge {
            url: url.to_owned(),
        });
    }
    tracing::debug!(url, bytes = body.len(), "locator page loaded");
    Ok(body)
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    // A page that already lists outlet cards is usable whatever else it says.
    if lowered.contains("addressbox") {
        return false;
    }
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");

    has_cloudflare_banner || has_challenge_platform || (has_just_a_moment && has_cookie_gate)
}
