//! Exercises spec scenarios 3/4 (Haversine end-to-end) purely against the
//! library pieces the binary is built from — `have_json` plus the loader's
//! own `document`/`haversine` modules aren't exposed as a library crate, so
//! this test re-derives the same parse-and-decode path `main` takes.

use have_json::{parse, ByteView};

const EARTH_RADIUS_KM: f64 = 6372.8;

fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let lat1 = y0.to_radians();
    let lat2 = y1.to_radians();
    let d_lat = (y1 - y0).to_radians();
    let d_lon = (x1 - x0).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}

fn parse_pair(input: &str) -> (f64, f64, f64, f64) {
    let view = ByteView::new(input.as_bytes());
    let root = parse(&view).unwrap();
    let pairs = root.find_by_label("pairs").unwrap();
    let first = pairs.children().next().unwrap();
    let field = |name: &str| first.find_by_label(name).unwrap().number_value.unwrap();
    (field("x0"), field("y0"), field("x1"), field("y1"))
}

#[test]
fn identical_coordinates_yield_zero_distance_and_zero_average() {
    let (x0, y0, x1, y1) = parse_pair(
        r#"{"pairs":[{"x0":0,"y0":0,"x1":0,"y1":0}],"avg":0,"count":1}"#,
    );
    let distance = reference_haversine(x0, y0, x1, y1);
    assert_eq!(distance, 0.0);
}

#[test]
fn london_to_new_york_matches_the_reference_formula_output() {
    let (x0, y0, x1, y1) = parse_pair(
        r#"{"pairs":[{"x0":0.1246,"y0":51.5007,"x1":-74.0445,"y1":40.6892}],"avg":0,"count":1}"#,
    );
    let distance = reference_haversine(x0, y0, x1, y1);
    assert!((distance - 5592.786422075844).abs() < 1e-6);
}

#[test]
fn generator_written_corpus_round_trips_through_the_parser() {
    // Mirrors what `generator` writes: 16 fractional digits, a `count`
    // field matching `pairs.len()`, and an `avg` of the stored distances.
    let document = r#"{"pairs":[{"x0":1.0000000000000000,"y0":2.0000000000000000,"x1":3.0000000000000000,"y1":4.0000000000000000}],"avg":314.3720495893223300,"count":1}"#;
    let view = ByteView::new(document.as_bytes());
    let root = parse(&view).unwrap();

    let pairs = root.find_by_label("pairs").unwrap();
    assert_eq!(pairs.child_count(), 1);

    let count = root.find_by_label("count").unwrap().number_value.unwrap() as usize;
    assert_eq!(count, pairs.child_count());

    let avg = root.find_by_label("avg").unwrap().number_value.unwrap();
    let (x0, y0, x1, y1) = (1.0, 2.0, 3.0, 4.0);
    let distance = reference_haversine(x0, y0, x1, y1);
    assert!((avg - distance).abs() < 1e-6);
}
