use std::{fmt, path::PathBuf};

use crate::assets::AssetRecord;

/// Per-asset sizes of one run, printed as a build diagnostic.
#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub original: usize,
    pub encoded: usize,
    pub filename: PathBuf,
}

impl Report {
    pub fn new(assets: &[AssetRecord]) -> Self {
        let rows = assets
            .iter()
            .map(|asset| ReportRow {
                original: asset.original_len,
                encoded: asset.body.len(),
                filename: asset.source.clone(),
            })
            .collect();
        Self { rows }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8} {:>8} {}", "original", "encoded", "filename")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>8} {:>8} {}",
                row.original,
                row.encoded,
                row.filename.display()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_table() {
        let report = Report {
            rows: vec![
                ReportRow {
                    original: 10,
                    encoded: 40,
                    filename: PathBuf::from("assets/graphicarts/a.svg"),
                },
                ReportRow {
                    original: 1234567,
                    encoded: 98765,
                    filename: PathBuf::from("assets/index.html"),
                },
            ],
        };
        assert_eq!(
            report.to_string(),
            "original  encoded filename\n      10       40 assets/graphicarts/a.svg\n 1234567    98765 assets/index.html\n"
        );
    }
}
