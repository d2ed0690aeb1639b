// Loading-list CSV export
//
// One file per vessel group, two columns, semicolon-delimited by default.
// The terminal systems that ingest these files require a UTF-8 BOM prefix.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use stowage_recon::LoadingGroup;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write one loading-list group as a BOM-prefixed delimited file with a
/// `Container No` / `Container Type` header.
pub fn export_loading_list(group: &LoadingGroup, delimiter: u8, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM).map_err(|e| e.to_string())?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer
        .write_record(["Container No", "Container Type"])
        .map_err(|e| e.to_string())?;

    for line in &group.lines {
        writer
            .write_record([line.container_no.as_str(), line.container_type.as_str()])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
