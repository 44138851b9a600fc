use std::io::Write;

use crate::bend::PitchBendTable;
use crate::error::Result;

/// Write the full raw-value listing of a table as `raw,semitones,cents` lines
pub fn write_listing<W: Write>(table: &PitchBendTable, precision: usize, out: &mut W) -> Result<()> {
    writeln!(out, "raw,semitones,cents")?;
    for (raw, deviation) in table.iter() {
        writeln!(
            out,
            "{},{:.*},{:.*}",
            raw,
            precision,
            deviation.semitones(),
            precision,
            deviation.cents()
        )?;
    }
    out.flush()?;
    Ok(())
}
