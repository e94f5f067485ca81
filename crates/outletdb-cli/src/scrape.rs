//! `scrape`: load the locator page, extract outlets, upsert them.
//!
//! A page-load failure aborts the run. Per-card problems are already folded
//! into the extraction report and only show up in the summary.

use std::path::Path;

use outletdb_core::{AppConfig, OutletRecord};
use outletdb_scraper::{
    build_client, extract_outlets, fetch_locator_html, load_html_file, ExtractionReport, Geocoder,
    GoogleGeocoder, NoGeocoder,
};

/// Run one scrape.
///
/// # Errors
///
/// Returns an error if the page cannot be loaded, the geocoder cannot be
/// constructed, or (unless `dry_run`) the database write fails.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    html_file: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let html = match html_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading locator snapshot");
            load_html_file(path).await?
        }
        None => {
            tracing::info!(url = %config.locator_url, "fetching locator page");
            let client = build_client(
                config.scraper_request_timeout_secs,
                &config.scraper_user_agent,
            )?;
            fetch_locator_html(&client, &config.locator_url).await?
        }
    };

    let geocoder = build_geocoder(config)?;
    let report = extract_outlets(&html, geocoder.as_ref()).await;

    for outlet in &report.outlets {
        println!("{}", format_outlet_line(outlet));
    }

    if dry_run {
        println!("{}", format_summary(&report, None));
        return Ok(());
    }

    let pool = crate::connect(config).await?;
    let counts = outletdb_db::upsert_outlets(&pool, &report.outlets).await?;
    println!("{}", format_summary(&report, Some(counts)));
    Ok(())
}

fn build_geocoder(config: &AppConfig) -> anyhow::Result<Box<dyn Geocoder>> {
    match config.google_api_key.as_deref() {
        Some(key) => Ok(Box::new(GoogleGeocoder::new(
            key,
            config.scraper_request_timeout_secs,
        )?)),
        None => {
            tracing::warn!("GOOGLE_API_KEY not set; outlets without coordinates stay unresolved");
            Ok(Box::new(NoGeocoder))
        }
    }
}

pub(crate) fn format_outlet_line(outlet: &OutletRecord) -> String {
    let coords = outlet.coordinates().map_or_else(
        || "no coordinates".to_string(),
        |(lat, lon)| format!("{lat},{lon}"),
    );
    let features: Vec<&str> = outlet.features.enabled().map(|k| k.as_str()).collect();
    let features = if features.is_empty() {
        "-".to_string()
    } else {
        features.join(",")
    };
    format!("{:<40} {:<24} {}", outlet.name, coords, features)
}

pub(crate) fn format_summary(report: &ExtractionReport, stored: Option<(u64, u64)>) -> String {
    let stored = match stored {
        Some((new_count, updated_count)) => format!("{new_count} new, {updated_count} updated"),
        None => "dry run, nothing stored".to_string(),
    };
    format!(
        "{} card(s), {} outlet(s), {} skipped ({} failed), {} geocoded, {} without coordinates; \
         {stored}",
        report.cards,
        report.outlets.len(),
        report.skipped.len(),
        report.failed(),
        report.geocoded,
        report.unresolved,
    )
}
