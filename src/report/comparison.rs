use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::formula::{self, CentRange};

pub const FILE_PREFIX: &str = "pitch_bend_table_";
pub const FILE_EXTENSION: &str = "csv";

/// Column names, in row order
pub const HEADER: [&str; 9] = [
    "Offset in cents",
    "PB MIDI1",
    "PB Hex MIDI1",
    "ΔPB MIDI1",
    "Pitch from MIDI1",
    "PB MIDI2",
    "PB Hex MIDI2",
    "ΔPB MIDI2",
    "Pitch from MIDI2",
];

/// One whole-cent offset encoded and decoded through both MIDI generations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub offset_cents: i64,
    pub midi1: i64,
    pub midi1_hex: String,
    pub midi1_delta: i64,
    pub midi1_pitch: i64,
    pub midi2: i64,
    pub midi2_hex: String,
    pub midi2_delta: i64,
    pub midi2_pitch: i64,
}

/// Build rows for every offset in `-range..=range`
///
/// Deltas are against the previous row; the first row is measured from 0.
pub fn comparison_rows(range: CentRange) -> Vec<ComparisonRow> {
    let mut last_midi1 = 0;
    let mut last_midi2 = 0;

    range
        .offsets()
        .map(|offset| {
            let midi1 = formula::pitch_bend_midi1(offset, range);
            let midi2 = formula::pitch_bend_midi2(offset, range);

            let row = ComparisonRow {
                offset_cents: offset,
                midi1,
                midi1_hex: format!("0x{:04X}", midi1),
                midi1_delta: midi1 - last_midi1,
                midi1_pitch: formula::pitch_from_midi1(midi1, range),
                midi2,
                midi2_hex: format!("0x{:08X}", midi2),
                midi2_delta: midi2 - last_midi2,
                midi2_pitch: formula::pitch_from_midi2(midi2, range),
            };

            last_midi1 = midi1;
            last_midi2 = midi2;
            row
        })
        .collect()
}

/// Write the comparison table for one range as CSV with a header row
///
/// Hex cells are quoted (`"0x2000"`); the header and numeric cells are not.
pub fn write_comparison<W: Write>(range: CentRange, mut out: W) -> Result<()> {
    let mut header = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut out);
    header.write_record(HEADER)?;
    header.flush()?;
    drop(header);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut out);

    for row in comparison_rows(range) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// File name used for a range, e.g. `pitch_bend_table_200.csv`
pub fn table_file_name(range: CentRange) -> String {
    format!("{}{}.{}", FILE_PREFIX, range.cents(), FILE_EXTENSION)
}

/// Write one comparison CSV per range into `dir`, returning the paths written
pub fn export_tables(ranges: &[CentRange], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(ranges.len());
    for &range in ranges {
        let path = dir.join(table_file_name(range));
        let file = File::create(&path)?;
        write_comparison(range, file)?;
        info!("Wrote {} ({} rows)", path.display(), 2 * range.cents() + 1);
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cents(c: i64) -> CentRange {
        CentRange::new(c).unwrap()
    }

    #[test]
    fn test_row_count() {
        assert_eq!(comparison_rows(cents(100)).len(), 201);
        assert_eq!(comparison_rows(cents(9600)).len(), 19201);
    }

    #[test]
    fn test_csv_head() {
        let mut out = Vec::new();
        write_comparison(cents(100), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let head: Vec<&str> = text.lines().take(5).collect();

        assert_eq!(
            head,
            vec![
                "Offset in cents,PB MIDI1,PB Hex MIDI1,ΔPB MIDI1,Pitch from MIDI1,PB MIDI2,PB Hex MIDI2,ΔPB MIDI2,Pitch from MIDI2",
                r#"-100,0,"0x0000",0,-100,0,"0x00000000",0,-100"#,
                r#"-99,82,"0x0052",82,-99,21474837,"0x0147AE15",21474837,-99"#,
                r#"-98,164,"0x00A4",82,-98,42949673,"0x028F5C29",21474836,-98"#,
                r#"-97,246,"0x00F6",82,-97,64424510,"0x03D70A3E",21474837,-97"#,
            ]
        );
    }

    #[test]
    fn test_top_rows_clamp() {
        let rows = comparison_rows(cents(100));
        let last = rows.last().unwrap();
        assert_eq!(last.offset_cents, 100);
        assert_eq!(last.midi1, 0x3FFF);
        assert_eq!(last.midi1_hex, "0x3FFF");
        assert_eq!(last.midi1_pitch, 100);
        assert_eq!(last.midi2_hex, "0xFFFFFFFF");
        assert_eq!(last.midi2_pitch, 100);

        let center = &rows[100];
        assert_eq!(center.offset_cents, 0);
        assert_eq!(center.midi1_hex, "0x2000");
        assert_eq!(center.midi2_hex, "0x80000000");
        assert_eq!(center.midi1_pitch, 0);
    }

    #[test]
    fn test_export_tables() {
        let dir = tempfile::tempdir().unwrap();
        let ranges = [cents(100), cents(200)];
        let written = export_tables(&ranges, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], dir.path().join("pitch_bend_table_100.csv"));
        assert_eq!(written[1], dir.path().join("pitch_bend_table_200.csv"));

        let content = std::fs::read_to_string(&written[1]).unwrap();
        // header + 401 rows
        assert_eq!(content.lines().count(), 402);
    }
}
