//! Field extraction from free-text rows.
//!
//! Carrier exports rarely keep one value per cell: container numbers show up
//! inside remarks, types ride along in the volume column, transshipment
//! chains land wherever the clerk typed them. Every extractor here therefore
//! scans the whole row's text instead of trusting a single column; only the
//! bill of lading and the voyage fallback read a resolved column.

use regex::Regex;

use crate::model::ContainerType;

/// Values treated as "no value" when read from a resolved column.
pub const DEFAULT_NULL_TOKENS: [&str; 5] = ["NAN", "NONE", "", "NA", "UNKNOWN_COL"];

/// Characters replaced with spaces before container-code scanning, so codes
/// glued to punctuation still match.
const SEPARATORS: [char; 6] = ['/', ',', '&', ';', '-', ':'];

/// Transshipment marker; a cell containing it is an authoritative voyage.
pub const TRANSSHIP_MARKER: &str = "=>";

/// All row-level extractions, with patterns compiled once.
#[derive(Debug)]
pub struct FieldExtractor {
    container: Regex,
    types: Vec<(Regex, ContainerType)>,
    null_tokens: Vec<String>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&DEFAULT_NULL_TOKENS.map(String::from))
    }
}

impl FieldExtractor {
    pub fn new(null_tokens: &[String]) -> Self {
        // ISO 6346 shape: four letters, optional whitespace, 6-7 digits.
        let container = Regex::new(r"\b[A-Z]{4}\s*[0-9]{6,7}\b").unwrap();
        let types = vec![
            (
                Regex::new(r"40\s*(HC|HQ|H/C)").unwrap(),
                ContainerType::FortyHighCube,
            ),
            (
                Regex::new(r#"45\s*(HC|HQ|FT|'|")"#).unwrap(),
                ContainerType::FortyFiveHighCube,
            ),
            (
                Regex::new(r#"20\s*(DC|GP|DV|ST|FT|'|")"#).unwrap(),
                ContainerType::TwentyDry,
            ),
            (
                Regex::new(r"40\s*(DC|GP|DV|ST)").unwrap(),
                ContainerType::FortyDry,
            ),
            (
                Regex::new(r#"40\s*('|")"#).unwrap(),
                ContainerType::FortyDry,
            ),
        ];
        Self {
            container,
            types,
            null_tokens: null_tokens.iter().map(|t| t.trim().to_uppercase()).collect(),
        }
    }

    fn is_null_token(&self, value: &str) -> bool {
        let upper = value.trim().to_uppercase();
        self.null_tokens.iter().any(|t| *t == upper)
    }

    /// All container codes in the row, in order of first appearance,
    /// duplicates collapsed.
    ///
    /// Row text is upper-cased and punctuation separators become spaces
    /// before matching, so `"MAEU-1234567/TCLU7654321"` yields both codes.
    /// A match is kept only if it is 10 or 11 characters after internal
    /// whitespace is stripped.
    pub fn containers(&self, cells: &[String]) -> Vec<String> {
        let text: String = cells
            .join(" ")
            .to_uppercase()
            .chars()
            .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
            .collect();

        let mut out: Vec<String> = Vec::new();
        for m in self.container.find_iter(&text) {
            let cleaned: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            if (10..=11).contains(&cleaned.len()) && !out.contains(&cleaned) {
                out.push(cleaned);
            }
        }
        out
    }

    /// Container type mentioned in the row, if any.
    ///
    /// Every pattern is evaluated; when two or more distinct types match the
    /// same row the result is [`ContainerType::Suspicious`], surfaced for
    /// review rather than resolved by picking one. Note the type scan runs
    /// on the raw upper-cased text (no separator replacement), so spellings
    /// like `40H/C` stay matchable.
    pub fn container_type(&self, cells: &[String]) -> Option<ContainerType> {
        let text = cells.join(" ").to_uppercase();
        let mut found: Vec<ContainerType> = Vec::new();
        for (re, ty) in &self.types {
            if re.is_match(&text) && !found.contains(ty) {
                found.push(*ty);
            }
        }
        match found.as_slice() {
            [] => None,
            [one] => Some(*one),
            _ => Some(ContainerType::Suspicious),
        }
    }

    /// Voyage text for the row.
    ///
    /// A cell containing the `=>` transshipment marker wins outright,
    /// wherever it sits, and is returned verbatim (trimmed). Otherwise the
    /// resolved voyage column is used when it holds a non-null value.
    pub fn voyage(&self, cells: &[String], voyage_col: Option<usize>) -> String {
        for cell in cells {
            let trimmed = cell.trim();
            if trimmed.contains(TRANSSHIP_MARKER) {
                return trimmed.to_string();
            }
        }
        if let Some(value) = voyage_col.and_then(|i| cells.get(i)) {
            let trimmed = value.trim();
            if !self.is_null_token(trimmed) {
                return trimmed.to_string();
            }
        }
        String::new()
    }

    /// Bill-of-lading value from the resolved column, upper-cased and
    /// trimmed; `None` when the column is missing or holds a null token.
    pub fn bill_of_lading(&self, cells: &[String], bl_col: Option<usize>) -> Option<String> {
        let value = bl_col.and_then(|i| cells.get(i))?.trim().to_uppercase();
        if self.is_null_token(&value) {
            None
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    // ── Containers ─────────────────────────────────────────────────────────

    #[test]
    fn containers_plain_code() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.containers(&row(&["MAEU1234567"])), vec!["MAEU1234567"]);
    }

    #[test]
    fn containers_tolerate_internal_whitespace() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.containers(&row(&["MAEU 1234567"])), vec!["MAEU1234567"]);
    }

    #[test]
    fn containers_split_on_punctuation() {
        let ex = FieldExtractor::default();
        assert_eq!(
            ex.containers(&row(&["MAEU-1234567/TCLU7654321"])),
            vec!["MAEU1234567", "TCLU7654321"]
        );
    }

    #[test]
    fn containers_accept_six_digit_codes() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.containers(&row(&["ABCD123456"])), vec!["ABCD123456"]);
    }

    #[test]
    fn containers_reject_eight_digit_runs() {
        let ex = FieldExtractor::default();
        assert!(ex.containers(&row(&["ABCD12345678"])).is_empty());
    }

    #[test]
    fn containers_reject_three_letter_prefix() {
        let ex = FieldExtractor::default();
        assert!(ex.containers(&row(&["ABC1234567"])).is_empty());
    }

    #[test]
    fn containers_found_across_cells_and_in_remarks() {
        let ex = FieldExtractor::default();
        let cells = row(&["MBL001", "2x40HC", "remark: tclu9876543 via BUSAN"]);
        assert_eq!(ex.containers(&cells), vec!["TCLU9876543"]);
    }

    #[test]
    fn containers_dedup_preserving_first_appearance() {
        let ex = FieldExtractor::default();
        let cells = row(&["TCLU7654321 MAEU1234567", "MAEU1234567"]);
        assert_eq!(ex.containers(&cells), vec!["TCLU7654321", "MAEU1234567"]);
    }

    // ── Container type ─────────────────────────────────────────────────────

    #[test]
    fn type_40hc_variants() {
        let ex = FieldExtractor::default();
        for text in ["1X40HC", "40 HQ", "40H/C"] {
            assert_eq!(
                ex.container_type(&row(&[text])),
                Some(ContainerType::FortyHighCube),
                "{text}"
            );
        }
    }

    #[test]
    fn type_45hc_variants() {
        let ex = FieldExtractor::default();
        for text in ["45HC", "45 FT", "45'"] {
            assert_eq!(
                ex.container_type(&row(&[text])),
                Some(ContainerType::FortyFiveHighCube),
                "{text}"
            );
        }
    }

    #[test]
    fn type_20dc_variants() {
        let ex = FieldExtractor::default();
        for text in ["20DC", "2 X 20 GP", "20'", "20FT"] {
            assert_eq!(
                ex.container_type(&row(&[text])),
                Some(ContainerType::TwentyDry),
                "{text}"
            );
        }
    }

    #[test]
    fn type_40dc_variants() {
        let ex = FieldExtractor::default();
        for text in ["40DC", "40 GP", "40ST", "40'"] {
            assert_eq!(
                ex.container_type(&row(&[text])),
                Some(ContainerType::FortyDry),
                "{text}"
            );
        }
    }

    #[test]
    fn type_absent_when_nothing_matches() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.container_type(&row(&["MBL001", "TOKYO"])), None);
    }

    #[test]
    fn mixed_types_are_suspicious() {
        let ex = FieldExtractor::default();
        assert_eq!(
            ex.container_type(&row(&["1X40HC + 1X20DC"])),
            Some(ContainerType::Suspicious)
        );
    }

    #[test]
    fn foot_mark_conflicts_like_any_other_pattern() {
        // A row carrying both "40 HC" and a bare "40'" mixes high-cube and
        // dry-van evidence; that is ambiguous, not a high-cube.
        let ex = FieldExtractor::default();
        assert_eq!(
            ex.container_type(&row(&["40 HC", "40'"])),
            Some(ContainerType::Suspicious)
        );
    }

    #[test]
    fn same_type_via_two_patterns_is_not_suspicious() {
        // "20FT" and "20GP" both resolve to 20DC; one distinct type only.
        let ex = FieldExtractor::default();
        assert_eq!(
            ex.container_type(&row(&["20FT", "20GP"])),
            Some(ContainerType::TwentyDry)
        );
    }

    // ── Voyage ─────────────────────────────────────────────────────────────

    #[test]
    fn voyage_marker_cell_returned_verbatim() {
        let ex = FieldExtractor::default();
        let cells = row(&["MBL001", "  TOKYO=>BUSAN  ", "40HC"]);
        assert_eq!(ex.voyage(&cells, None), "TOKYO=>BUSAN");
    }

    #[test]
    fn voyage_marker_beats_voyage_column() {
        let ex = FieldExtractor::default();
        let cells = row(&["VSL AURORA 012E", "note: SHA=>SIN leg 2"]);
        assert_eq!(ex.voyage(&cells, Some(0)), "note: SHA=>SIN leg 2");
    }

    #[test]
    fn voyage_falls_back_to_column() {
        let ex = FieldExtractor::default();
        let cells = row(&["MBL001", "VSL AURORA 012E"]);
        assert_eq!(ex.voyage(&cells, Some(1)), "VSL AURORA 012E");
    }

    #[test]
    fn voyage_column_null_tokens_read_as_empty() {
        let ex = FieldExtractor::default();
        for null in ["", "nan", "None"] {
            let cells = row(&["MBL001", null]);
            assert_eq!(ex.voyage(&cells, Some(1)), "", "{null:?}");
        }
    }

    #[test]
    fn voyage_empty_without_column_or_marker() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.voyage(&row(&["MBL001"]), None), "");
    }

    // ── Bill of lading ─────────────────────────────────────────────────────

    #[test]
    fn bill_of_lading_uppercased_and_trimmed() {
        let ex = FieldExtractor::default();
        let cells = row(&[" mbl x 001 ", "rest"]);
        assert_eq!(ex.bill_of_lading(&cells, Some(0)), Some("MBL X 001".into()));
    }

    #[test]
    fn bill_of_lading_null_tokens_are_absent() {
        let ex = FieldExtractor::default();
        for null in ["nan", "NONE", "", "na", "Unknown_Col"] {
            let cells = row(&[null]);
            assert_eq!(ex.bill_of_lading(&cells, Some(0)), None, "{null:?}");
        }
    }

    #[test]
    fn bill_of_lading_absent_without_column() {
        let ex = FieldExtractor::default();
        assert_eq!(ex.bill_of_lading(&row(&["MBL001"]), None), None);
    }
}
