use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::corpus::Pair;

/// Renders the `{ pairs, avg, count }` document as text with every number
/// printed to 16 fractional digits, exactly as the parser's tests expect.
/// `serde_json::Value` would round-trip these floats fine but prints them
/// with the shortest representation that round-trips, not a fixed digit
/// count, so the document is assembled directly rather than through
/// `Value`'s own serializer.
pub fn render_document(pairs: &[Pair], avg: f64) -> String {
    let mut out = String::with_capacity(64 + pairs.len() * 96);
    out.push_str("{\"pairs\":[");
    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write!(
            out,
            "{{\"x0\":{:.16},\"y0\":{:.16},\"x1\":{:.16},\"y1\":{:.16}}}",
            pair.x0, pair.y0, pair.x1, pair.y1
        )
        .unwrap();
    }
    write!(out, "],\"avg\":{avg:.16},\"count\":{}}}", pairs.len()).unwrap();
    out
}

pub fn write_document(path: impl AsRef<Path>, pairs: &[Pair], avg: f64) -> io::Result<()> {
    std::fs::write(path, render_document(pairs, avg))
}
