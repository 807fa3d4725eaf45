//! Floor area of a room polygon given in geographic coordinates.
//!
//! Vertices are projected onto a local plane with an equirectangular
//! approximation centred on the polygon's mean latitude, then measured with
//! the shoelace formula. The approximation only holds at building scale:
//! polygons spanning more than a few hundred metres, or close to the poles,
//! drift away from their true geodesic area.

/// One polygon vertex as `[longitude, latitude]` in decimal degrees.
pub type Border = [f64; 2];

/// Metres per degree of longitude at the equator.
pub const METERS_PER_DEGREE_LONGITUDE: f64 = 111_320.0;

/// Metres per degree of latitude.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 110_540.0;

/// Area in square metres of the polygon traced by `borders`, rounded to two
/// decimals.
///
/// The polygon is implicitly closed. Traversal direction does not matter.
/// Fewer than three vertices describe no surface and yield `0.0`.
#[must_use]
pub fn compute_area(borders: &[Border]) -> f64 {
    if borders.len() < 3 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_latitude = borders.iter().map(|[_, lat]| lat).sum::<f64>() / borders.len() as f64;
    let x_scale = METERS_PER_DEGREE_LONGITUDE * mean_latitude.to_radians().cos();

    // Offsets from the first vertex keep the cross products small; the
    // shoelace sum is translation invariant.
    let [origin_lon, origin_lat] = borders[0];
    let projected: Vec<(f64, f64)> = borders
        .iter()
        .map(|[lon, lat]| {
            (
                (lon - origin_lon) * x_scale,
                (lat - origin_lat) * METERS_PER_DEGREE_LATITUDE,
            )
        })
        .collect();

    let twice_area: f64 = projected
        .iter()
        .zip(projected.iter().cycle().skip(1))
        .map(|((x0, y0), (x1, y1))| x0 * y1 - x1 * y0)
        .sum();

    round_to_hundredths(twice_area.abs() / 2.0)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
