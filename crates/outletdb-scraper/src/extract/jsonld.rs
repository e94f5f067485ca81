//! Reading a `Restaurant` entity out of a card's JSON-LD blocks.

use serde_json::Value;

use super::SkipReason;

/// The fields the extractor needs from a `Restaurant` block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RestaurantData {
    pub name: String,
    pub address: String,
    pub telephone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Scan `blocks` in document order and return the first `Restaurant` entity.
///
/// A block that fails to parse stops the scan and skips the card, as does a
/// `Restaurant` block without a usable `name` or `address`. `Ok(None)` means
/// the card carries no `Restaurant` at all.
pub(crate) fn find_restaurant(blocks: &[String]) -> Result<Option<RestaurantData>, SkipReason> {
    for block in blocks {
        let text = block.trim();
        if text.is_empty() {
            return Err(SkipReason::MalformedStructuredData(
                "empty JSON-LD block".to_string(),
            ));
        }
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SkipReason::MalformedStructuredData(e.to_string()))?;

        if is_restaurant(&value) {
            return restaurant_fields(&value).map(Some);
        }
    }
    Ok(None)
}

fn is_restaurant(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(s)) => s == "Restaurant",
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s == "Restaurant"),
        _ => false,
    }
}

fn restaurant_fields(item: &Value) -> Result<RestaurantData, SkipReason> {
    let name = non_empty_str(item.get("name")).ok_or(SkipReason::MissingField("name"))?;
    let address = item
        .get("address")
        .and_then(address_text)
        .ok_or(SkipReason::MissingField("address"))?;
    let telephone = non_empty_str(item.get("telephone"));

    let geo = item.get("geo");
    let latitude = geo.and_then(|g| g.get("latitude")).and_then(coordinate);
    let longitude = geo.and_then(|g| g.get("longitude")).and_then(coordinate);

    Ok(RestaurantData {
        name,
        address,
        telephone,
        latitude,
        longitude,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// `address` is either plain text or a schema.org `PostalAddress`.
fn address_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Object(_) => {
            let parts: Vec<&str> = [
                "streetAddress",
                "addressLocality",
                "postalCode",
                "addressRegion",
                "addressCountry",
            ]
            .iter()
            .filter_map(|field| value.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

// Numbers or numeric strings; "" means absent.
fn coordinate(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|v| v.is_finite())
}
