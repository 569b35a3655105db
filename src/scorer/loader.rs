use super::Stats;
use crate::error::{M209Error, M209Result};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Loads letter counts from a tab-separated `letter<TAB>count` file.
///
/// Rows holding longer n-grams, non-letters or unparsable counts are
/// skipped, so a full n-gram table can be passed as is.
pub fn load_monograms<P: AsRef<Path>>(path: P) -> M209Result<Stats> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut counts = [0.0f64; 26];
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record?;
        if record.len() < 2 {
            skipped += 1;
            continue;
        }
        let token = record[0].trim();
        let letter = match token.as_bytes() {
            [c] if c.is_ascii_alphabetic() => c.to_ascii_uppercase() - b'A',
            _ => {
                skipped += 1;
                continue;
            }
        };
        match record[1].trim().parse::<f64>() {
            Ok(count) if count.is_finite() && count >= 0.0 => counts[letter as usize] += count,
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} rows in {}", skipped, path.display());
    }
    if counts.iter().all(|&c| c == 0.0) {
        return Err(M209Error::Config(format!(
            "No monogram counts found in {}",
            path.display()
        )));
    }
    info!("📂 Loaded monograms from {}", path.display());
    Stats::from_frequencies(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_monograms_ignores_bigrams() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "e\t300").unwrap();
        writeln!(file, "T\t200").unwrap();
        writeln!(file, "th\t999").unwrap();
        writeln!(file, "z\t1").unwrap();
        let stats = load_monograms(file.path()).unwrap();
        assert!((stats.frequencies[4] - 300.0 / 501.0).abs() < 1e-12);
        assert!(stats.monograms[4] > stats.monograms[19]);
        assert_eq!(stats.frequencies[0], 0.0);
    }

    #[test]
    fn test_load_monograms_rejects_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(load_monograms(file.path()), Err(M209Error::Config(_))));
    }
}
