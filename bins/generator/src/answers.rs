use std::io::{self, Write, BufWriter};
use std::fs::File;
use std::path::Path;

use crate::corpus::Pair;

/// Writes the companion answer file: little-endian `u64 count`, then per
/// pair `f64 x0, y0, x1, y1, distance`, then a trailing `f64 avg`. Written
/// with explicit `to_le_bytes` calls rather than a binary-codec derive
/// macro, matching the workspace's preference for manual byte layout over
/// derived ones (`shm_layout::RingHeader`).
pub fn write_answers(path: impl AsRef<Path>, pairs: &[Pair], avg: f64) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    out.write_all(&(pairs.len() as u64).to_le_bytes())?;
    for pair in pairs {
        out.write_all(&pair.x0.to_le_bytes())?;
        out.write_all(&pair.y0.to_le_bytes())?;
        out.write_all(&pair.x1.to_le_bytes())?;
        out.write_all(&pair.y1.to_le_bytes())?;
        out.write_all(&pair.distance.to_le_bytes())?;
    }
    out.write_all(&avg.to_le_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn layout_matches_count_then_pairs_then_avg() {
        let pairs = vec![
            Pair { x0: 1.0, y0: 2.0, x1: 3.0, y1: 4.0, distance: 5.0 },
            Pair { x0: 6.0, y0: 7.0, x1: 8.0, y1: 9.0, distance: 10.0 },
        ];
        let dir = std::env::temp_dir();
        let path = dir.join(format!("have-answers-test-{}.bin", std::process::id()));
        write_answers(&path, &pairs, 7.5).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(bytes.len(), 8 + 2 * 5 * 8 + 8);
        let count = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        assert_eq!(count, 2);
        let avg = f64::from_le_bytes(bytes[bytes.len() - 8..].try_into().unwrap());
        assert_eq!(avg, 7.5);
    }
}
