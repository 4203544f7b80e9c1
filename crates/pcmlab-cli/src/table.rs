//! CSV export of the codec table.
//!
//! One header line followed by one row per sampled point:
//! `time,code,decoded,error`.

use anyhow::{Context, Result};
use pcmlab_core::ExportTable;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default file name for the exported table.
pub const TABLE_FILE_NAME: &str = "codec_table.csv";

/// Writes the table as CSV to any writer.
pub fn write_csv<W: Write>(table: &ExportTable, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", ExportTable::COLUMNS.join(","))?;
    for row in &table.rows {
        writeln!(
            writer,
            "{},{},{},{}",
            format_float(row.time),
            row.code,
            format_float(row.decoded),
            format_float(row.error)
        )?;
    }
    writer.flush()
}

/// Formats the table as a CSV string.
pub fn format_csv(table: &ExportTable) -> Result<String> {
    let mut output = Vec::new();
    write_csv(table, &mut output)?;
    String::from_utf8(output).map_err(|e| anyhow::anyhow!("UTF-8 error: {}", e))
}

/// Writes the table to a CSV file, creating parent directories as needed.
pub fn write_csv_file(table: &ExportTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    write_csv(table, BufWriter::new(file))
        .with_context(|| format!("Failed to write table: {}", path.display()))
}

/// Shortest round-tripping representation; `NaN`, `inf` and `-inf` for
/// non-finite values.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
