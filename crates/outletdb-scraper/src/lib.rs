//! Store-locator scraping: page loading, outlet extraction and geocoding.

pub mod error;
pub mod extract;
pub mod geocode;
pub mod page;

pub use error::ScraperError;
pub use extract::{extract_outlets, CardOutcome, ExtractionReport, SkipReason};
pub use geocode::{GeocodeError, Geocoder, GoogleGeocoder, NoGeocoder};
pub use page::{build_client, fetch_locator_html, load_html_file};
