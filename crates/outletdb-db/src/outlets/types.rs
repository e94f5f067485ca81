//! Row types for the `outlets` table.

use outletdb_core::{FeatureSet, OutletRecord};

use crate::DbError;

/// A row from the `outlets` table.
///
/// `features` holds the raw stored JSON; use [`OutletRow::features`] or
/// [`OutletRow::into_record`] to get the total feature map back.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutletRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub telephone: Option<String>,
    pub waze_link: Option<String>,
    pub google_map_link: Option<String>,
    pub features: String,
}

impl OutletRow {
    /// Decode the stored feature map. Keys missing from storage read as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptFeatures`] if the column is not a JSON object
    /// of booleans.
    pub fn features(&self) -> Result<FeatureSet, DbError> {
        serde_json::from_str(&self.features).map_err(|source| DbError::CorruptFeatures {
            id: self.id,
            source,
        })
    }

    /// Convert the row back into the domain record, dropping the surrogate id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptFeatures`] if the stored features cannot be decoded.
    pub fn into_record(self) -> Result<OutletRecord, DbError> {
        let features = self.features()?;
        Ok(OutletRecord {
            name: self.name,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            telephone: self.telephone,
            waze_link: self.waze_link,
            google_map_link: self.google_map_link,
            features,
        })
    }
}

/// What an upsert did to the `(name, address)` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i64),
    Updated(i64),
}

impl UpsertOutcome {
    #[must_use]
    pub fn id(self) -> i64 {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => id,
        }
    }

    #[must_use]
    pub fn is_new(self) -> bool {
        matches!(self, UpsertOutcome::Inserted(_))
    }
}
