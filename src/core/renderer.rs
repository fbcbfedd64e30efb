use crate::core::center::calculate_map_center;
use crate::core::html::{
    html_escape, js_string_escape, sanitize_html_class, sanitize_slug, script_safe_json,
    unique_map_id,
};
use crate::core::marker::build_markers;
use crate::core::options::{BusinessMapOptions, MapOptions};
use crate::domain::model::{BusinessPin, BusinessQuery, MapMarker, MapView};
use crate::domain::ports::BusinessDirectory;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub const MAP_ID_PREFIX: &str = "bizmap-";
pub const INIT_FUNCTION: &str = "bizmapInitMap";
pub const NO_BUSINESSES_MESSAGE: &str = "No businesses with location data found.";
pub const NO_LOCATION_MESSAGE: &str = "No location data found for this business.";

/// Renders directory listings as embeddable Leaflet maps.
pub struct MapRenderer<D: BusinessDirectory> {
    directory: D,
}

impl<D: BusinessDirectory> MapRenderer<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Payload for the multi-business map. `businesses` is empty when the
    /// directory has nothing to plot.
    pub async fn build_map_view(&self, options: &MapOptions) -> Result<MapView> {
        options.validate()?;

        let query = BusinessQuery {
            category: options
                .category
                .as_deref()
                .map(sanitize_slug)
                .filter(|slug| !slug.is_empty()),
            limit: options.limit,
        };

        tracing::debug!(
            "Querying {} (category: {:?}, limit: {})",
            self.directory.describe(),
            query.category,
            query.limit
        );
        let businesses = self.directory.query(&query).await?;
        let center = calculate_map_center(&businesses);
        let pins: Vec<BusinessPin> = businesses.iter().filter_map(|b| b.pin()).collect();

        tracing::debug!(
            "Map view: {} businesses, center ({}, {})",
            pins.len(),
            center.lat,
            center.lng
        );

        Ok(MapView {
            center,
            zoom: options.zoom,
            clustering: options.clustering,
            businesses: pins,
        })
    }

    /// Payload for a single business, or `None` when the business is unknown
    /// or has no coordinates.
    pub async fn build_business_view(&self, options: &BusinessMapOptions) -> Result<Option<MapView>> {
        options.validate()?;

        let business = self.directory.find_by_id(options.id).await?;
        let pin = match business.as_ref().and_then(|b| b.pin()) {
            Some(pin) => pin,
            None => {
                tracing::debug!("Business {} has no location data", options.id);
                return Ok(None);
            }
        };

        Ok(Some(MapView {
            center: pin.point(),
            zoom: options.zoom,
            clustering: false,
            businesses: vec![pin],
        }))
    }

    pub async fn render_map(&self, options: &MapOptions) -> Result<String> {
        let view = self.build_map_view(options).await?;

        if view.businesses.is_empty() {
            tracing::info!("No businesses with location data in {}", self.directory.describe());
            return Ok(error_paragraph(NO_BUSINESSES_MESSAGE));
        }

        let classes = css_classes(&["bizmap"], options.class.as_deref());
        render_embed(&classes, &options.height, &view)
    }

    pub async fn render_business_map(&self, options: &BusinessMapOptions) -> Result<String> {
        match self.build_business_view(options).await? {
            Some(view) => {
                let classes = css_classes(
                    &["bizmap", "bizmap-single-business-map"],
                    options.class.as_deref(),
                );
                render_embed(&classes, &options.height, &view)
            }
            None => Ok(error_paragraph(NO_LOCATION_MESSAGE)),
        }
    }
}

fn error_paragraph(message: &str) -> String {
    format!("<p class=\"bizmap-error\">{}</p>", html_escape(message))
}

fn css_classes(base: &[&str], extra: Option<&str>) -> String {
    let mut classes: Vec<String> = base.iter().map(|c| c.to_string()).collect();
    if let Some(extra) = extra.map(sanitize_html_class).filter(|c| !c.is_empty()) {
        classes.push(extra);
    }
    classes.join(" ")
}

/// Container markup plus the inline script that hands `view` and its markers
/// to the client.
pub fn render_embed(classes: &str, height: &str, view: &MapView) -> Result<String> {
    let map_id = unique_map_id(MAP_ID_PREFIX);
    let markers: Vec<MapMarker> = build_markers(&view.businesses);

    let payload = script_safe_json(&serde_json::to_string(view)?);
    let markers_json = script_safe_json(&serde_json::to_string(&markers)?);

    let mut html = String::new();
    html.push_str("<div class=\"");
    html.push_str(&html_escape(classes));
    html.push_str("\">\n    <div id=\"");
    html.push_str(&html_escape(&map_id));
    html.push_str("\" style=\"height: ");
    html.push_str(&html_escape(height));
    html.push_str("\"></div>\n</div>\n");

    html.push_str("<script type=\"text/javascript\">\n");
    html.push_str("(function () {\n");
    html.push_str("    var init = function () {\n");
    html.push_str(&format!("        if (typeof {} === 'function') {{\n", INIT_FUNCTION));
    html.push_str(&format!(
        "            {}('{}', {}, {});\n",
        INIT_FUNCTION,
        js_string_escape(&map_id),
        payload,
        markers_json
    ));
    html.push_str("        }\n");
    html.push_str("    };\n");
    html.push_str("    if (document.readyState === 'loading') {\n");
    html.push_str("        document.addEventListener('DOMContentLoaded', init);\n");
    html.push_str("    } else {\n");
    html.push_str("        init();\n");
    html.push_str("    }\n");
    html.push_str("})();\n");
    html.push_str("</script>\n");

    tracing::debug!("Rendered map container {} ({} markers)", map_id, markers.len());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryDirectory;
    use crate::domain::model::{Business, GeoPoint};

    fn business(id: u64, title: &str, lat: f64, lng: f64, category: &str) -> Business {
        let mut b = Business::new(id, title).with_coordinates(lat, lng);
        b.permalink = format!("https://example.com/business/{}", id);
        b.categories = vec![category.to_string()];
        b
    }

    fn directory() -> MemoryDirectory {
        let mut unplaced = Business::new(4, "Unplaced");
        unplaced.categories = vec!["restaurants".to_string()];

        MemoryDirectory::new(vec![
            business(1, "Pizza Place", 40.0, -74.0, "restaurants"),
            business(2, "Noodle Bar", 42.0, -73.0, "restaurants"),
            business(3, "Book Shop", 10.0, 10.0, "shops"),
            unplaced,
        ])
    }

    #[tokio::test]
    async fn test_map_view_filters_by_category() {
        let renderer = MapRenderer::new(directory());
        let options = MapOptions {
            category: Some("Restaurants".to_string()),
            ..MapOptions::default()
        };

        let view = renderer.build_map_view(&options).await.unwrap();

        assert_eq!(view.businesses.len(), 2);
        assert!((view.center.lat - 41.0).abs() < 1e-9);
        assert!((view.center.lng - -73.5).abs() < 1e-9);
        assert_eq!(view.zoom, 13);
        assert!(view.clustering);
    }

    #[tokio::test]
    async fn test_map_view_respects_limit() {
        let renderer = MapRenderer::new(directory());
        let options = MapOptions {
            limit: 1,
            ..MapOptions::default()
        };

        let view = renderer.build_map_view(&options).await.unwrap();
        assert_eq!(view.businesses.len(), 1);
        assert_eq!(view.center, GeoPoint::new(40.0, -74.0));
    }

    #[tokio::test]
    async fn test_render_map_without_businesses() {
        let renderer = MapRenderer::new(directory());
        let options = MapOptions {
            category: Some("museums".to_string()),
            ..MapOptions::default()
        };

        let html = renderer.render_map(&options).await.unwrap();
        assert_eq!(
            html,
            "<p class=\"bizmap-error\">No businesses with location data found.</p>"
        );
    }

    #[tokio::test]
    async fn test_render_map_embeds_payload_and_markers() {
        let renderer = MapRenderer::new(directory());
        let options = MapOptions {
            height: "500px".to_string(),
            zoom: 14,
            clustering: false,
            class: Some("wide map".to_string()),
            ..MapOptions::default()
        };

        let html = renderer.render_map(&options).await.unwrap();

        assert!(html.contains("<div class=\"bizmap widemap\">"));
        assert!(html.contains("style=\"height: 500px\""));
        assert!(html.contains("bizmapInitMap('bizmap-"));
        assert!(html.contains("\"zoom\":14"));
        assert!(html.contains("\"clustering\":false"));
        assert!(html.contains("\"title\":\"Book Shop\""));
        assert!(html.contains("\"popup\":"));
        assert!(!html.contains("Unplaced"));
    }

    #[tokio::test]
    async fn test_render_business_map() {
        let renderer = MapRenderer::new(directory());
        let options = BusinessMapOptions {
            class: Some("sidebar".to_string()),
            ..BusinessMapOptions::for_business(3)
        };

        let html = renderer.render_business_map(&options).await.unwrap();
        assert!(html.contains("<div class=\"bizmap bizmap-single-business-map sidebar\">"));
        assert!(html.contains("\"center\":{\"lat\":10.0,\"lng\":10.0}"));
        assert!(html.contains("\"zoom\":15"));
        assert!(html.contains("\"clustering\":false"));
    }

    #[tokio::test]
    async fn test_render_business_map_without_location() {
        let renderer = MapRenderer::new(directory());

        for id in [4, 99] {
            let html = renderer
                .render_business_map(&BusinessMapOptions::for_business(id))
                .await
                .unwrap();
            assert_eq!(
                html,
                "<p class=\"bizmap-error\">No location data found for this business.</p>"
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_zoom_is_rejected() {
        let renderer = MapRenderer::new(directory());
        let options = MapOptions {
            zoom: 25,
            ..MapOptions::default()
        };
        assert!(renderer.render_map(&options).await.is_err());
    }

    #[test]
    fn test_embed_never_closes_script_early() {
        let mut hostile = Business::new(1, "</script><script>alert(1)</script>")
            .with_coordinates(1.0, 2.0);
        hostile.permalink = "https://example.com".to_string();
        let pin = hostile.pin().unwrap();

        let view = MapView {
            center: pin.point(),
            zoom: 13,
            clustering: false,
            businesses: vec![pin],
        };

        let html = render_embed("bizmap", "400px", &view).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
