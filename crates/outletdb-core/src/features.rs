//! Outlet amenity flags and the icon lookup table that feeds them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CoreError;

/// One amenity an outlet may advertise on the locator page.
///
/// Wire names are the persisted JSON keys; they never change once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKey {
    Open24h,
    Birthday,
    Breakfast,
    Cashless,
    Dessert,
    DriveThru,
    McCafe,
    McDelivery,
    Surau,
    Wifi,
    OrderKiosk,
    EvCharging,
}

impl FeatureKey {
    /// Every key, in display order.
    pub const ALL: [FeatureKey; 12] = [
        FeatureKey::Open24h,
        FeatureKey::Birthday,
        FeatureKey::Breakfast,
        FeatureKey::Cashless,
        FeatureKey::Dessert,
        FeatureKey::OrderKiosk,
        FeatureKey::DriveThru,
        FeatureKey::EvCharging,
        FeatureKey::McCafe,
        FeatureKey::McDelivery,
        FeatureKey::Surau,
        FeatureKey::Wifi,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKey::Open24h => "is_24h",
            FeatureKey::Birthday => "has_birthday",
            FeatureKey::Breakfast => "has_breakfast",
            FeatureKey::Cashless => "has_cashless",
            FeatureKey::Dessert => "has_dessert",
            FeatureKey::DriveThru => "has_drive_thru",
            FeatureKey::McCafe => "has_mccafe",
            FeatureKey::McDelivery => "has_mc_delivery",
            FeatureKey::Surau => "has_surau",
            FeatureKey::Wifi => "has_wifi",
            FeatureKey::OrderKiosk => "has_order_kiosk",
            FeatureKey::EvCharging => "has_ev",
        }
    }

    /// Human-readable label used in API answers.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            FeatureKey::Open24h => "24 Hours",
            FeatureKey::Birthday => "Birthday Party",
            FeatureKey::Breakfast => "Breakfast",
            FeatureKey::Cashless => "Cashless Facility",
            FeatureKey::Dessert => "Dessert Center",
            FeatureKey::DriveThru => "Drive-Thru",
            FeatureKey::McCafe => "McCafe",
            FeatureKey::McDelivery => "McDelivery",
            FeatureKey::Surau => "Surau",
            FeatureKey::Wifi => "WiFi",
            FeatureKey::OrderKiosk => "Digital Order Kiosk",
            FeatureKey::EvCharging => "Electric Vehicle",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `has_suara` is a legacy misspelling of `has_surau`; accepted on input only.
        if s == "has_suara" {
            return Ok(FeatureKey::Surau);
        }
        FeatureKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}

impl Serialize for FeatureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FeatureKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Icon identifier fragments and the key each one sets.
///
/// Matched case-insensitively as substrings of an icon's `src` or `alt`.
pub const ICON_FEATURES: &[(&str, FeatureKey)] = &[
    ("24h", FeatureKey::Open24h),
    ("birthday", FeatureKey::Birthday),
    ("breakfast", FeatureKey::Breakfast),
    ("cashless", FeatureKey::Cashless),
    ("dessert", FeatureKey::Dessert),
    ("dt", FeatureKey::DriveThru),
    ("mccafe", FeatureKey::McCafe),
    ("mcdelivery", FeatureKey::McDelivery),
    ("surau", FeatureKey::Surau),
    ("wifi", FeatureKey::Wifi),
    ("kiosk", FeatureKey::OrderKiosk),
    ("ev", FeatureKey::EvCharging),
];

/// Total map from every [`FeatureKey`] to a flag.
///
/// There is no way to build one with a key missing: construction starts from
/// [`FeatureKey::ALL`] set to `false`, and deserialization fills any key the
/// stored JSON lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet(BTreeMap<FeatureKey, bool>);

impl FeatureSet {
    /// All keys present, all `false`.
    #[must_use]
    pub fn new() -> Self {
        Self(FeatureKey::ALL.into_iter().map(|key| (key, false)).collect())
    }

    /// Build a set from icon attributes (`src`, `alt`) pairs.
    ///
    /// Icons that match no identifier leave the set untouched.
    #[must_use]
    pub fn from_icons<'a, I>(icons: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut features = Self::new();
        for (src, alt) in icons {
            let src = src.to_lowercase();
            let alt = alt.to_lowercase();
            for (identifier, key) in ICON_FEATURES {
                if src.contains(identifier) || alt.contains(identifier) {
                    features.set(*key, true);
                }
            }
        }
        features
    }

    pub fn set(&mut self, key: FeatureKey, value: bool) {
        self.0.insert(key, value);
    }

    #[must_use]
    pub fn get(&self, key: FeatureKey) -> bool {
        self.0.get(&key).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, bool)> + '_ {
        self.0.iter().map(|(key, value)| (*key, *value))
    }

    /// Keys currently set to `true`.
    pub fn enabled(&self) -> impl Iterator<Item = FeatureKey> + '_ {
        self.iter().filter_map(|(key, on)| on.then_some(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key.as_str(), *value)))
    }
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut features = Self::new();
        for (raw_key, value) in stored {
            // Unknown keys come from older scrapes; they carry nothing we can filter on.
            if let Ok(key) = raw_key.parse::<FeatureKey>() {
                features.set(key, value);
            }
        }
        Ok(features)
    }
}
