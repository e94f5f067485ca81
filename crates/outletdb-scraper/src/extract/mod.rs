//! Outlet extraction from a rendered locator page.
//!
//! Parsing is synchronous and produces plain per-card data, so no DOM handle
//! is held across the geocoding awaits that follow.

mod cards;
mod jsonld;

use std::fmt;

use outletdb_core::{FeatureSet, OutletRecord};

use crate::geocode::Geocoder;
use cards::RawCard;
use jsonld::RestaurantData;

/// Why a card produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The card has no `Restaurant`-typed JSON-LD block.
    NotAnOutlet,
    /// A JSON-LD block in the card failed to parse.
    MalformedStructuredData(String),
    /// The `Restaurant` block lacks a required field.
    MissingField(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnOutlet => f.write_str("no Restaurant structured data"),
            Self::MalformedStructuredData(detail) => {
                write!(f, "malformed structured data: {detail}")
            }
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
        }
    }
}

/// Result of processing one card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    Outlet(OutletRecord),
    Skipped(SkipReason),
}

/// Everything one extraction run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// Number of outlet cards found on the page.
    pub cards: usize,
    pub outlets: Vec<OutletRecord>,
    /// `(card index, reason)` for each card that produced no record.
    pub skipped: Vec<(usize, SkipReason)>,
    /// Records whose coordinates came from the geocoder.
    pub geocoded: usize,
    /// Records stored without coordinates.
    pub unresolved: usize,
}

impl ExtractionReport {
    fn push(&mut self, index: usize, outcome: CardOutcome) {
        match outcome {
            CardOutcome::Outlet(record) => self.outlets.push(record),
            CardOutcome::Skipped(reason) => self.skipped.push((index, reason)),
        }
    }

    /// Count of skipped cards whose reason is anything but [`SkipReason::NotAnOutlet`].
    #[must_use]
    pub fn failed(&self) -> usize {
        self.skipped
            .iter()
            .filter(|(_, reason)| *reason != SkipReason::NotAnOutlet)
            .count()
    }
}

/// Extract every outlet on the page.
///
/// Per-card problems never fail the call; they are logged and reported in
/// [`ExtractionReport::skipped`]. Geocoding runs one card at a time, only for
/// records missing a coordinate.
pub async fn extract_outlets(html: &str, geocoder: &dyn Geocoder) -> ExtractionReport {
    let cards = cards::parse_cards(html);
    let mut report = ExtractionReport {
        cards: cards.len(),
        ..ExtractionReport::default()
    };

    for card in &cards {
        let outcome = match jsonld::find_restaurant(&card.blocks) {
            Ok(Some(data)) => {
                CardOutcome::Outlet(build_record(card, data, geocoder, &mut report).await)
            }
            Ok(None) => {
                tracing::debug!(card = card.index, "card has no Restaurant block; skipping");
                CardOutcome::Skipped(SkipReason::NotAnOutlet)
            }
            Err(reason) => {
                tracing::warn!(card = card.index, %reason, "skipping outlet card");
                CardOutcome::Skipped(reason)
            }
        };
        report.push(card.index, outcome);
    }

    tracing::info!(
        cards = report.cards,
        outlets = report.outlets.len(),
        skipped = report.skipped.len(),
        geocoded = report.geocoded,
        unresolved = report.unresolved,
        "extraction complete"
    );
    report
}

async fn build_record(
    card: &RawCard,
    data: RestaurantData,
    geocoder: &dyn Geocoder,
    report: &mut ExtractionReport,
) -> OutletRecord {
    let coordinates = match data.latitude.zip(data.longitude) {
        Some(pair) => Some(pair),
        None => {
            let resolved = resolve(geocoder, &data.address).await;
            if resolved.is_some() {
                report.geocoded += 1;
            }
            resolved
        }
    };
    if coordinates.is_none() {
        report.unresolved += 1;
    }

    OutletRecord::new(
        data.name,
        data.address,
        coordinates,
        data.telephone,
        FeatureSet::from_icons(card.icon_pairs()),
    )
}

async fn resolve(geocoder: &dyn Geocoder, address: &str) -> Option<(f64, f64)> {
    match geocoder.geocode(address).await {
        Ok(Some(pair)) => Some(pair),
        Ok(None) => {
            tracing::warn!(address, "geocoder found no coordinates");
            None
        }
        Err(e) => {
            tracing::warn!(address, error = %e, "geocoding failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
