use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use outletdb_core::FeatureKey;

use super::*;
use crate::geocode::{GeocodeError, NoGeocoder};

/// Answers every address with the same pair and counts calls.
struct FixedGeocoder {
    answer: Option<(f64, f64)>,
    fail: bool,
    calls: AtomicUsize,
}

impl FixedGeocoder {
    fn returning(answer: Option<(f64, f64)>) -> Self {
        Self {
            answer,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            answer: None,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeocodeError::Api {
                status: "REQUEST_DENIED".to_string(),
                message: "bad key".to_string(),
            });
        }
        Ok(self.answer)
    }
}

fn card(json_ld: &str, icons: &str) -> String {
    format!(
        r#"<div class="addressBox"><script type="application/ld+json">{json_ld}</script>{icons}</div>"#
    )
}

fn page(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.concat())
}

#[tokio::test]
async fn restaurant_with_geo_and_wifi_icon() {
    let html = page(&[card(
        r#"{"@type":"Restaurant","name":"X","address":"Y","geo":{"latitude":3.1,"longitude":101.6}}"#,
        r#"<img class="addressIcon" src="https://cdn.example.com/icons/wifi.png">"#,
    )]);
    let geocoder = FixedGeocoder::returning(Some((0.0, 0.0)));

    let report = extract_outlets(&html, &geocoder).await;

    assert_eq!(report.cards, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(report.outlets.len(), 1);
    assert_eq!(geocoder.calls(), 0, "coordinates were present");

    let outlet = &report.outlets[0];
    assert_eq!(outlet.name, "X");
    assert_eq!(outlet.address, "Y");
    assert_eq!(outlet.latitude, Some(3.1));
    assert_eq!(outlet.longitude, Some(101.6));
    assert_eq!(
        outlet.google_map_link.as_deref(),
        Some("https://www.google.com/maps?q=3.1,101.6")
    );
    assert_eq!(
        outlet.waze_link.as_deref(),
        Some("https://waze.com/ul?ll=3.1,101.6&navigate=yes")
    );
    assert_eq!(outlet.features.len(), FeatureKey::ALL.len());
    assert_eq!(
        outlet.features.enabled().collect::<Vec<_>>(),
        vec![FeatureKey::Wifi]
    );
}

#[tokio::test]
async fn card_without_restaurant_is_skipped_quietly() {
    let html = page(&[
        card(r#"{"@type":"Organization","name":"HQ"}"#, ""),
        card(r#"{"@type":"Restaurant","name":"A","address":"B","geo":{"latitude":1,"longitude":2}}"#, ""),
    ]);

    let report = extract_outlets(&html, &NoGeocoder).await;

    assert_eq!(report.cards, 2);
    assert_eq!(report.outlets.len(), 1);
    assert_eq!(report.skipped, vec![(0, SkipReason::NotAnOutlet)]);
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn malformed_card_does_not_stop_the_run() {
    let html = page(&[
        card("{broken", ""),
        card(r#"{"@type":"Restaurant","address":"no name"}"#, ""),
        card(r#"{"@type":"Restaurant","name":"Ok","address":"Somewhere"}"#, ""),
    ]);

    let report = extract_outlets(&html, &NoGeocoder).await;

    assert_eq!(report.outlets.len(), 1);
    assert_eq!(report.outlets[0].name, "Ok");
    assert_eq!(report.skipped.len(), 2);
    assert!(matches!(
        report.skipped[0],
        (0, SkipReason::MalformedStructuredData(_))
    ));
    assert_eq!(report.skipped[1], (1, SkipReason::MissingField("name")));
    assert_eq!(report.failed(), 2);
}

#[tokio::test]
async fn missing_coordinates_fall_back_to_geocoder() {
    let html = page(&[card(
        r#"{"@type":"Restaurant","name":"A","address":"Jalan Sultan Ismail","geo":{"latitude":"3.2"}}"#,
        "",
    )]);
    let geocoder = FixedGeocoder::returning(Some((3.15, 101.70)));

    let report = extract_outlets(&html, &geocoder).await;

    assert_eq!(geocoder.calls(), 1);
    assert_eq!(report.geocoded, 1);
    assert_eq!(report.unresolved, 0);
    let outlet = &report.outlets[0];
    assert_eq!(outlet.coordinates(), Some((3.15, 101.70)));
    assert!(outlet.google_map_link.is_some());
}

#[tokio::test]
async fn geocoder_failure_leaves_both_coordinates_unset() {
    let html = page(&[card(
        r#"{"@type":"Restaurant","name":"A","address":"B","geo":{"latitude":3.2}}"#,
        "",
    )]);
    let geocoder = FixedGeocoder::failing();

    let report = extract_outlets(&html, &geocoder).await;

    assert_eq!(geocoder.calls(), 1);
    assert_eq!(report.unresolved, 1);
    let outlet = &report.outlets[0];
    assert_eq!(outlet.latitude, None);
    assert_eq!(outlet.longitude, None);
    assert!(outlet.google_map_link.is_none());
    assert!(outlet.waze_link.is_none());
}

#[tokio::test]
async fn unmatched_icons_leave_every_feature_false() {
    let html = page(&[card(
        r#"{"@type":"Restaurant","name":"A","address":"B"}"#,
        r#"<img class="addressIcon" src="/icons/parking.png" alt="Parking">"#,
    )]);

    let report = extract_outlets(&html, &NoGeocoder).await;

    let features = &report.outlets[0].features;
    assert_eq!(features.len(), FeatureKey::ALL.len());
    assert_eq!(features.enabled().count(), 0);
}

#[tokio::test]
async fn icon_alt_text_matches_case_insensitively() {
    let html = page(&[card(
        r#"{"@type":"Restaurant","name":"A","address":"B"}"#,
        r#"<img class="addressIcon" src="/i/1.png" alt="McCafe"><img class="addressIcon" src="/i/24H.svg">"#,
    )]);

    let report = extract_outlets(&html, &NoGeocoder).await;

    let features = &report.outlets[0].features;
    assert!(features.get(FeatureKey::McCafe));
    assert!(features.get(FeatureKey::Open24h));
    assert!(!features.get(FeatureKey::Wifi));
}

#[tokio::test]
async fn empty_page_yields_empty_report() {
    let report = extract_outlets("<html></html>", &NoGeocoder).await;
    assert_eq!(report, ExtractionReport::default());
}
