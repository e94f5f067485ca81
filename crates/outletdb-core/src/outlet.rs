use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;

/// A normalized outlet as produced by one scrape.
///
/// `(name, address)` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletRecord {
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub telephone: Option<String>,
    pub waze_link: Option<String>,
    pub google_map_link: Option<String>,
    pub features: FeatureSet,
}

impl OutletRecord {
    /// Assemble a record, deriving both map links from the coordinates.
    #[must_use]
    pub fn new(
        name: String,
        address: String,
        coordinates: Option<(f64, f64)>,
        telephone: Option<String>,
        features: FeatureSet,
    ) -> Self {
        let (latitude, longitude) =
            coordinates.map_or((None, None), |(lat, lon)| (Some(lat), Some(lon)));
        let links = map_links(latitude, longitude);
        Self {
            name,
            address,
            latitude,
            longitude,
            telephone,
            waze_link: links.as_ref().map(|l| l.waze.clone()),
            google_map_link: links.map(|l| l.google),
            features,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Navigation links for a pair of coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    pub google: String,
    pub waze: String,
}

/// Build both map links, or `None` unless both coordinates are present.
#[must_use]
pub fn map_links(latitude: Option<f64>, longitude: Option<f64>) -> Option<MapLinks> {
    let (lat, lon) = latitude.zip(longitude)?;
    Some(MapLinks {
        google: format!("https://www.google.com/maps?q={lat},{lon}"),
        waze: format!("https://waze.com/ul?ll={lat},{lon}&navigate=yes"),
    })
}
