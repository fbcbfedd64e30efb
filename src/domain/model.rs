use serde::{Deserialize, Deserializer, Serialize};

/// 地圖座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A listing as the business directory stores it. Coordinates and display
/// metadata are all optional on the directory side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: u64,
    pub title: String,
    #[serde(default, alias = "lat", deserialize_with = "deserialize_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", deserialize_with = "deserialize_coordinate")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub maps_uri: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Business {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            latitude: None,
            longitude: None,
            address: None,
            permalink: String::new(),
            maps_uri: None,
            thumbnail: None,
            categories: Vec::new(),
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.latitude = Some(lat);
        self.longitude = Some(lng);
        self
    }

    /// Both coordinates, when both are present and finite.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint::new(lat, lng))
            }
            _ => None,
        }
    }

    pub fn is_plottable(&self) -> bool {
        self.coordinates().is_some()
    }

    pub fn in_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c == slug)
    }

    /// The client-facing view of this business, or `None` when it cannot be
    /// placed on a map.
    pub fn pin(&self) -> Option<BusinessPin> {
        let point = self.coordinates()?;
        Some(BusinessPin {
            id: self.id,
            title: self.title.clone(),
            lat: point.lat,
            lng: point.lng,
            maps_uri: non_empty(&self.maps_uri),
            permalink: self.permalink.clone(),
            address: non_empty(&self.address),
            thumbnail: non_empty(&self.thumbnail),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One entry of the `businesses` array handed to the client script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPin {
    pub id: u64,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_uri: Option<String>,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl BusinessPin {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Initialization payload for one map container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub clustering: bool,
    pub businesses: Vec<BusinessPin>,
}

/// A marker ready to be placed by the client, popup HTML included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
}

/// Directory filter used by the multi-business map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessQuery {
    pub category: Option<String>,
    pub limit: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

/// Directories store coordinates as numbers or as text meta values; blank or
/// unparsable text counts as absent.
fn deserialize_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCoordinate>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCoordinate::Number(v)) => Some(v),
        Some(RawCoordinate::Text(s)) => parse_coordinate(&s),
        None => None,
    })
}

pub fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_accepts_text_and_numeric_coordinates() {
        let json = serde_json::json!([
            {"id": 1, "title": "Cafe", "latitude": "40.5", "longitude": -74.25, "permalink": "/cafe"},
            {"id": 2, "title": "Bakery", "lat": 41, "lng": "-73", "permalink": "/bakery"},
            {"id": 3, "title": "Nowhere", "latitude": "", "longitude": null}
        ]);

        let businesses: Vec<Business> = serde_json::from_value(json).unwrap();

        assert_eq!(businesses[0].coordinates(), Some(GeoPoint::new(40.5, -74.25)));
        assert_eq!(businesses[1].coordinates(), Some(GeoPoint::new(41.0, -73.0)));
        assert!(!businesses[2].is_plottable());
    }

    #[test]
    fn test_zero_is_a_valid_coordinate() {
        let business = Business::new(7, "Null Island").with_coordinates(0.0, 0.0);
        assert!(business.is_plottable());
    }

    #[test]
    fn test_missing_one_coordinate_is_not_plottable() {
        let mut business = Business::new(1, "Half");
        business.latitude = Some(40.0);
        assert!(business.pin().is_none());
    }

    #[test]
    fn test_pin_omits_empty_optionals() {
        let mut business = Business::new(3, "Diner").with_coordinates(40.0, -74.0);
        business.permalink = "https://example.com/diner".to_string();
        business.address = Some("  ".to_string());
        business.maps_uri = Some("https://maps.example.com/diner".to_string());

        let pin = business.pin().unwrap();
        let value = serde_json::to_value(&pin).unwrap();

        assert_eq!(value["maps_uri"], "https://maps.example.com/diner");
        assert!(value.get("address").is_none());
        assert!(value.get("thumbnail").is_none());
        assert_eq!(value["lat"], 40.0);
    }
}
