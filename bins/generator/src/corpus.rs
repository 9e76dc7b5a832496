use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One coordinate pair and its reference Haversine distance.
pub struct Pair {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub distance: f64,
}

/// Generates `count` pairs with a seeded PRNG so a given `(count, seed)`
/// always reproduces the same corpus — the same discipline the workspace's
/// benches use for repeatable sample sizes, just swapped to a seeded RNG
/// since the teacher has no coordinate data of its own to draw from.
pub fn generate(count: u64, seed: u64, earth_radius_km: f64) -> Vec<Pair> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x0 = rng.gen_range(-180.0..180.0);
            let y0 = rng.gen_range(-90.0..90.0);
            let x1 = rng.gen_range(-180.0..180.0);
            let y1 = rng.gen_range(-90.0..90.0);
            let distance = reference_haversine(x0, y0, x1, y1, earth_radius_km);
            Pair { x0, y0, x1, y1, distance }
        })
        .collect()
}

/// The Haversine great-circle distance between `(x0, y0)` and `(x1, y1)`
/// (longitude, latitude, in degrees) on a sphere of radius `earth_radius_km`.
/// Kept here rather than shared with the loader: each binary is its own
/// independent collaborator, and the formula is a handful of lines, so a
/// shared crate for it would be pure indirection.
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
    fn same_point_has_zero_distance() {
        assert_eq!(reference_haversine(0.0, 0.0, 0.0, 0.0, 6372.8), 0.0);
    }

    #[test]
    fn known_pair_matches_reference_value() {
        let d = reference_haversine(0.1246, 51.5007, -74.0445, 40.6892, 6372.8);
        assert!((d - 5592.786422075844).abs() < 1e-6);
    }

    #[test]
    fn same_seed_and_count_produce_the_same_corpus() {
        let a = generate(16, 42, 6372.8);
        let b = generate(16, 42, 6372.8);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x0, q.x0);
            assert_eq!(p.distance, q.distance);
        }
    }
}
