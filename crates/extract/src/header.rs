//! Header-row discovery.
//!
//! Carrier exports bury the real header under title rows, logos and blank
//! lines, and no two sources bury it at the same depth. The locator scores
//! each leading row by how many known header keywords its concatenated text
//! contains, then splits the sheet at the best-scoring row.

use crate::grid::{unique_labels, HeaderedTable, RawSheet};

/// How many leading rows are scanned for a header.
pub const DEFAULT_SCAN_LIMIT: usize = 30;

/// Default header vocabulary.
pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "MB/L NO", "BOOKING NO", "POL", "POD", "VOL", "V/V", "CONTAINER", "CNTR",
];

#[derive(Debug, Clone)]
pub struct HeaderLocator {
    keywords: Vec<String>,
    scan_limit: usize,
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            DEFAULT_SCAN_LIMIT,
        )
    }
}

impl HeaderLocator {
    pub fn new(keywords: Vec<String>, scan_limit: usize) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_uppercase()).collect(),
            scan_limit,
        }
    }

    /// Keyword score for one row: how many vocabulary entries appear as
    /// substrings of the upper-cased concatenation of its cells.
    pub fn score_row(&self, cells: &[String]) -> usize {
        let text = cells.join(" ").to_uppercase();
        self.keywords.iter().filter(|k| text.contains(k.as_str())).count()
    }

    /// Split `raw` at the best-scoring row within the scan limit.
    ///
    /// Ties go to the earlier row. Returns `None` when no row scores above
    /// zero, which callers treat as "not a data sheet" and skip. A repeated
    /// header further down the sheet is not detected; only the single best
    /// row in the scan window is used.
    pub fn locate(&self, raw: &RawSheet) -> Option<HeaderedTable> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, row) in raw.rows.iter().take(self.scan_limit).enumerate() {
            let score = self.score_row(row);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((idx, score));
            }
        }
        let (header_row, score) = best?;

        // Table width is the widest row of the sheet; a short header row
        // grows Unknown_Col labels rather than truncating data cells.
        let width = raw.rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut header = raw.rows[header_row].clone();
        header.resize(width, String::new());
        let labels = unique_labels(&header);
        let rows = raw.rows[header_row + 1..]
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, String::new());
                row
            })
            .collect();

        Some(HeaderedTable {
            sheet_name: raw.name.clone(),
            labels,
            rows,
            header_row,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> RawSheet {
        RawSheet::new(
            "Sheet1",
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn locate_finds_header_under_title_noise() {
        let raw = sheet(&[
            &["ACME FORWARDING CO", "", ""],
            &["WEEK 34 LOADING PLAN", "", ""],
            &["MB/L NO", "CNTR NO", "POL"],
            &["MBL001", "MAEU1234567", "TOKYO"],
        ]);
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.header_row, 2);
        assert_eq!(table.labels, vec!["MB/L NO", "CNTR NO", "POL"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "MBL001");
    }

    #[test]
    fn locate_is_case_insensitive() {
        let raw = sheet(&[&["mb/l no", "container", "pol"], &["a", "b", "c"]]);
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.header_row, 0);
        assert_eq!(table.score, 3); // MB/L NO, CONTAINER, POL
    }

    #[test]
    fn locate_prefers_higher_score() {
        // Row 0 mentions one keyword, row 1 mentions two.
        let raw = sheet(&[
            &["POL schedule", ""],
            &["MB/L NO", "V/V"],
            &["MBL001", "VESSEL A"],
        ]);
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.header_row, 1);
    }

    #[test]
    fn locate_breaks_ties_toward_earlier_row() {
        let raw = sheet(&[
            &["POL", "POD"],
            &["POL", "POD"],
            &["data", "data"],
        ]);
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.header_row, 0);
    }

    #[test]
    fn locate_returns_none_without_keywords() {
        let raw = sheet(&[
            &["quarterly revenue", "eur"],
            &["q1", "1200"],
        ]);
        assert!(HeaderLocator::default().locate(&raw).is_none());
    }

    #[test]
    fn locate_ignores_rows_past_scan_limit() {
        let mut rows: Vec<Vec<String>> = (0..40)
            .map(|i| vec![format!("note {i}"), String::new()])
            .collect();
        rows.push(vec!["MB/L NO".into(), "CNTR NO".into()]);
        let raw = RawSheet::new("Deep", rows);
        assert!(HeaderLocator::default().locate(&raw).is_none());
    }

    #[test]
    fn locate_discards_rows_above_header() {
        let raw = sheet(&[
            &["CNTR ABCD1111111 stray note", ""],
            &["MB/L NO", "CNTR NO"],
            &["MBL001", "MAEU1234567"],
        ]);
        let table = HeaderLocator::default().locate(&raw).unwrap();
        // Row 0 scores 1 (CNTR) but row 1 scores 2; row 0 is gone.
        assert_eq!(table.header_row, 1);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn locate_pads_short_data_rows_to_header_width() {
        let raw = RawSheet::new(
            "Ragged",
            vec![
                vec!["MB/L NO".into(), "CNTR NO".into(), "POL".into()],
                vec!["MBL001".into()],
            ],
        );
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "");
    }

    #[test]
    fn locate_grows_labels_for_overwide_data_rows() {
        let raw = RawSheet::new(
            "Wide",
            vec![
                vec!["MB/L NO".into(), "CNTR NO".into()],
                vec!["MBL001".into(), "MAEU1234567".into(), "stray".into()],
            ],
        );
        let table = HeaderLocator::default().locate(&raw).unwrap();
        assert_eq!(table.labels, vec!["MB/L NO", "CNTR NO", "Unknown_Col"]);
        assert_eq!(table.rows[0][2], "stray");
    }
}
