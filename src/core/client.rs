/// Leaflet init script that defines `bizmapInitMap`. Pages load it after
/// Leaflet (and optionally Leaflet.markercluster).
pub const CLIENT_SCRIPT: &str = include_str!("../../assets/bizmap.js");

pub const CLIENT_SCRIPT_FILENAME: &str = "bizmap.js";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renderer::INIT_FUNCTION;

    #[test]
    fn test_script_defines_init_function() {
        assert!(CLIENT_SCRIPT.contains(&format!("window.{} = function", INIT_FUNCTION)));
        assert!(CLIENT_SCRIPT.contains("invalidateSize"));
        assert!(CLIENT_SCRIPT.contains("markerClusterGroup"));
    }
}
