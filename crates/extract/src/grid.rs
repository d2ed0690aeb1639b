use std::collections::HashMap;

/// Placeholder label for blank or null-like header cells.
pub const UNKNOWN_LABEL: &str = "Unknown_Col";

// ---------------------------------------------------------------------------
// Raw grid
// ---------------------------------------------------------------------------

/// An untyped grid of text cells read from one worksheet. No header assumed;
/// every cell is already rendered to plain text by the reader.
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self { name: name.into(), rows }
    }
}

// ---------------------------------------------------------------------------
// Headered table
// ---------------------------------------------------------------------------

/// A sheet split at its detected header row: unique column labels above,
/// data rows below. Rows above the header are gone.
#[derive(Debug, Clone)]
pub struct HeaderedTable {
    pub sheet_name: String,
    pub labels: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Zero-based index of the header row within the raw sheet.
    pub header_row: usize,
    /// Keyword score the header row achieved.
    pub score: usize,
}

/// Deduplicate header labels.
///
/// Labels are trimmed; blank or null-like labels become [`UNKNOWN_LABEL`].
/// A repeated label gets `.1`, `.2`, ... appended in order of recurrence,
/// with the first occurrence left unsuffixed. Suffixed names are themselves
/// registered, so a literal `X.1` colliding with a generated one still comes
/// out unique.
pub fn unique_labels(raw: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());
    for label in raw {
        let trimmed = label.trim();
        let mut name = if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("none")
        {
            UNKNOWN_LABEL.to_string()
        } else {
            trimmed.to_string()
        };
        if let Some(&count) = seen.get(&name) {
            let mut next = count + 1;
            let mut candidate = format!("{name}.{next}");
            // A generated suffix can collide with a label already taken
            // verbatim; keep counting until the slot is free.
            while seen.contains_key(&candidate) {
                next += 1;
                candidate = format!("{name}.{next}");
            }
            seen.insert(name.clone(), next);
            name = candidate;
        }
        seen.entry(name.clone()).or_insert(0);
        out.push(name);
    }
    out
}
