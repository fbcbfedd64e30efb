use crate::core::html::html_escape;
use crate::domain::model::{BusinessPin, MapMarker};

const DIRECTIONS_BASE: &str = "https://www.openstreetmap.org/directions?from=&to=";

/// OpenStreetMap directions to the given point, `lat%2Clng`.
pub fn directions_url(lat: f64, lng: f64) -> String {
    format!("{}{}%2C{}", DIRECTIONS_BASE, lat, lng)
}

/// Popup markup for one business.
pub fn build_popup_html(pin: &BusinessPin) -> String {
    let title = html_escape(&pin.title);

    let mut html = String::new();
    html.push_str("<div class=\"bizmap-popup\">");

    html.push_str("<h4>");
    html.push_str(&title);
    html.push_str("</h4>");

    if let Some(address) = pin.address.as_deref().filter(|a| !a.is_empty()) {
        html.push_str("<p class=\"bizmap-address\">");
        html.push_str(&html_escape(address));
        html.push_str("</p>");
    }

    html.push_str("<div class=\"bizmap-popup-buttons\">");

    html.push_str("<a href=\"");
    html.push_str(&html_escape(&pin.permalink));
    html.push_str("\" class=\"bizmap-view-business\">View Details</a>");

    match pin.maps_uri.as_deref().filter(|u| !u.is_empty()) {
        Some(maps_uri) => {
            html.push_str("<a href=\"");
            html.push_str(&html_escape(maps_uri));
            html.push_str("\" target=\"_blank\" class=\"bizmap-directions\">Open in Google Maps</a>");
        }
        None => {
            html.push_str("<a href=\"");
            html.push_str(&html_escape(&directions_url(pin.lat, pin.lng)));
            html.push_str("\" target=\"_blank\" class=\"bizmap-directions\">Get Directions</a>");
        }
    }

    html.push_str("</div>"); // buttons

    if let Some(thumbnail) = pin.thumbnail.as_deref().filter(|t| !t.is_empty()) {
        html.push_str("<div class=\"bizmap-popup-thumbnail\"><img src=\"");
        html.push_str(&html_escape(thumbnail));
        html.push_str("\" alt=\"");
        html.push_str(&title);
        html.push_str("\"></div>");
    }

    html.push_str("</div>");
    html
}

/// One marker per pin, in order. Pins with a non-finite coordinate are
/// skipped.
pub fn build_markers(pins: &[BusinessPin]) -> Vec<MapMarker> {
    pins.iter()
        .filter(|pin| pin.lat.is_finite() && pin.lng.is_finite())
        .map(|pin| MapMarker {
            id: pin.id,
            lat: pin.lat,
            lng: pin.lng,
            popup: build_popup_html(pin),
        })
        .collect()
}
