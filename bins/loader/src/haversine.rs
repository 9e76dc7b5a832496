/// The Haversine great-circle distance between `(x0, y0)` and `(x1, y1)`
/// (longitude, latitude, in degrees) on a sphere of radius `earth_radius_km`.
/// The "external collaborator" the loader recomputes against the answer
/// file — deliberately outside the tokenizer/parser/profiler core.
pub fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64, earth_radius_km: f64) -> f64 {
    let lat1 = y0.to_radians();
    let lat2 = y1.to_radians();
    let d_lat = (y1 - y0).to_radians();
    let d_lon = (x1 - x0).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    earth_radius_km * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_distance_apart() {
        assert_eq!(reference_haversine(0.0, 0.0, 0.0, 0.0, 6372.8), 0.0);
    }

    #[test]
    fn known_pair_is_within_tolerance_of_the_reference_value() {
        let d = reference_haversine(0.1246, 51.5007, -74.0445, 40.6892, 6372.8);
        assert!((d - 5592.786422075844).abs() < 1e-6);
    }
}
