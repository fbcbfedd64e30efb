use crate::domain::model::{Business, GeoPoint};

/// New York City; used when there is nothing to center on.
pub const FALLBACK_CENTER: GeoPoint = GeoPoint {
    lat: 40.7128,
    lng: -74.0060,
};

/// Center point for a set of businesses.
///
/// Only businesses with both coordinates take part. With none the fallback is
/// returned, with exactly one its coordinates are returned unchanged, and
/// otherwise the arithmetic mean of latitudes and longitudes.
pub fn calculate_map_center(businesses: &[Business]) -> GeoPoint {
    center_of(businesses.iter().filter_map(Business::coordinates))
}

pub fn center_of<I>(points: I) -> GeoPoint
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut points = points.into_iter();

    let first = match points.next() {
        Some(point) => point,
        None => return FALLBACK_CENTER,
    };

    let (lat_sum, lng_sum, count) = points.fold(
        (first.lat, first.lng, 1usize),
        |(lat_sum, lng_sum, count), p| (lat_sum + p.lat, lng_sum + p.lng, count + 1),
    );

    if count == 1 {
        return first;
    }

    GeoPoint::new(lat_sum / count as f64, lng_sum / count as f64)
}
